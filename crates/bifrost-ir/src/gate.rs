//! Quantum gate types.
//!
//! [`StandardGate`] covers Bifrost's built-in gate vocabulary with concrete
//! `f64` angles (radians). Composite standard gates expose a [`definition`]
//! in terms of strictly smaller primitives; [`CustomGate`] carries an
//! optional definition sub-circuit for the same purpose. Definitions are
//! what the interop layer expands when a downstream consumer does not
//! recognize an operation.
//!
//! [`definition`]: StandardGate::definition

use serde::{Deserialize, Serialize};

use crate::bit::{ClbitId, QubitId};
use crate::circuit::Circuit;
use crate::instruction::Instruction;

/// Standard gates with known semantics. All angles are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StandardGate {
    // Single-qubit gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),
    /// Phased X rotation R(θ, φ) = Rz(φ)·Rx(θ)·Rz(-φ).
    R(f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx(f64),
    /// Controlled rotation around Y.
    CRy(f64),
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),
    /// Controlled universal gate CU(θ, φ, λ).
    CU(f64, f64, f64),
    /// XX rotation gate.
    RXX(f64),
    /// YY rotation gate.
    RYY(f64),
    /// ZZ rotation gate.
    RZZ(f64),
    /// ZX rotation gate (cross-resonance interaction).
    RZX(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(..) => "u",
            StandardGate::R(..) => "r",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::CU(..) => "cu",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::RZX(_) => "rzx",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U(..)
            | StandardGate::R(..) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_)
            | StandardGate::CU(..)
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_)
            | StandardGate::RZX(_) => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Get the angle parameters of this gate, in radians.
    pub fn params(&self) -> Vec<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CRx(t)
            | StandardGate::CRy(t)
            | StandardGate::CRz(t)
            | StandardGate::CP(t)
            | StandardGate::RXX(t)
            | StandardGate::RYY(t)
            | StandardGate::RZZ(t)
            | StandardGate::RZX(t) => vec![*t],

            StandardGate::R(t, p) => vec![*t, *p],

            StandardGate::U(a, b, c) | StandardGate::CU(a, b, c) => vec![*a, *b, *c],

            _ => vec![],
        }
    }

    /// Get the definition of a composite gate in terms of smaller primitives,
    /// bound to the given qubit operands.
    ///
    /// Returns `None` for gates that are themselves primitive. Definitions
    /// strictly reduce toward the single- and two-qubit primitive basis, so
    /// recursive expansion terminates.
    ///
    /// # Panics
    ///
    /// Panics if `qubits.len()` does not match [`num_qubits`](Self::num_qubits).
    pub fn definition(&self, qubits: &[QubitId]) -> Option<Vec<Instruction>> {
        assert_eq!(
            qubits.len() as u32,
            self.num_qubits(),
            "definition of {} takes {} qubits",
            self.name(),
            self.num_qubits(),
        );

        match self {
            StandardGate::Swap => {
                let (a, b) = (qubits[0], qubits[1]);
                Some(vec![
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                    Instruction::two_qubit_gate(StandardGate::CX, b, a),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                ])
            }

            // rzx(θ) = (1 ⊗ H) · rzz(θ) · (1 ⊗ H), with rzz built from CX·Rz·CX.
            StandardGate::RZX(theta) => {
                let (a, b) = (qubits[0], qubits[1]);
                Some(vec![
                    Instruction::single_qubit_gate(StandardGate::H, b),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                    Instruction::single_qubit_gate(StandardGate::Rz(*theta), b),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                    Instruction::single_qubit_gate(StandardGate::H, b),
                ])
            }

            StandardGate::CH => {
                let (a, b) = (qubits[0], qubits[1]);
                Some(vec![
                    Instruction::single_qubit_gate(StandardGate::S, b),
                    Instruction::single_qubit_gate(StandardGate::H, b),
                    Instruction::single_qubit_gate(StandardGate::T, b),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                    Instruction::single_qubit_gate(StandardGate::Tdg, b),
                    Instruction::single_qubit_gate(StandardGate::H, b),
                    Instruction::single_qubit_gate(StandardGate::Sdg, b),
                ])
            }

            StandardGate::CCX => {
                let (a, b, c) = (qubits[0], qubits[1], qubits[2]);
                Some(vec![
                    Instruction::single_qubit_gate(StandardGate::H, c),
                    Instruction::two_qubit_gate(StandardGate::CX, b, c),
                    Instruction::single_qubit_gate(StandardGate::Tdg, c),
                    Instruction::two_qubit_gate(StandardGate::CX, a, c),
                    Instruction::single_qubit_gate(StandardGate::T, c),
                    Instruction::two_qubit_gate(StandardGate::CX, b, c),
                    Instruction::single_qubit_gate(StandardGate::Tdg, c),
                    Instruction::two_qubit_gate(StandardGate::CX, a, c),
                    Instruction::single_qubit_gate(StandardGate::T, b),
                    Instruction::single_qubit_gate(StandardGate::T, c),
                    Instruction::single_qubit_gate(StandardGate::H, c),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                    Instruction::single_qubit_gate(StandardGate::T, a),
                    Instruction::single_qubit_gate(StandardGate::Tdg, b),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                ])
            }

            StandardGate::CSwap => {
                let (a, b, c) = (qubits[0], qubits[1], qubits[2]);
                Some(vec![
                    Instruction::two_qubit_gate(StandardGate::CX, c, b),
                    Instruction::gate(StandardGate::CCX, [a, b, c]),
                    Instruction::two_qubit_gate(StandardGate::CX, c, b),
                ])
            }

            // cu(θ,φ,λ) decomposed to phase + controlled rotations.
            StandardGate::CU(theta, phi, lambda) => {
                let (a, b) = (qubits[0], qubits[1]);
                Some(vec![
                    Instruction::single_qubit_gate(StandardGate::P((lambda + phi) / 2.0), a),
                    Instruction::single_qubit_gate(StandardGate::P((lambda - phi) / 2.0), b),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                    Instruction::single_qubit_gate(
                        StandardGate::U(-theta / 2.0, 0.0, -(phi + lambda) / 2.0),
                        b,
                    ),
                    Instruction::two_qubit_gate(StandardGate::CX, a, b),
                    Instruction::single_qubit_gate(StandardGate::U(theta / 2.0, *phi, 0.0), b),
                ])
            }

            _ => None,
        }
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }
}

/// A user-defined gate with an optional definition sub-circuit.
///
/// The definition, when present, expresses this gate over the standard
/// vocabulary; consumers that do not recognize the gate by name expand it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Angle parameters, in radians.
    pub params: Vec<f64>,
    /// Optional definition over standard gates. The definition circuit's
    /// qubit indices are positional: definition qubit `i` binds to operand `i`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Box<Circuit>>,
}

impl CustomGate {
    /// Create a new custom gate without a definition.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
            definition: None,
        }
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }

    /// Attach a definition sub-circuit.
    ///
    /// # Panics
    ///
    /// Panics if the definition's qubit count does not match `num_qubits`.
    #[must_use]
    pub fn with_definition(mut self, definition: Circuit) -> Self {
        assert_eq!(
            definition.num_qubits(),
            self.num_qubits,
            "definition of {} must span exactly {} qubits",
            self.name,
            self.num_qubits,
        );
        self.definition = Some(Box::new(definition));
        self
    }
}

/// Classical condition attached to a gate: apply only when the given
/// classical bit holds `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    /// The classical bit tested.
    pub clbit: ClbitId,
    /// The value to compare against (0 or 1).
    pub value: u64,
}

impl ClassicalCondition {
    /// Create a new classical condition.
    pub fn new(clbit: ClbitId, value: u64) -> Self {
        Self { clbit, value }
    }
}

/// A gate together with its optional classical condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional classical condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            condition: None,
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            condition: None,
        }
    }

    /// Add a classical condition to the gate.
    #[must_use]
    pub fn with_condition(mut self, condition: ClassicalCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Get the angle parameters, in radians.
    pub fn params(&self) -> Vec<f64> {
        match &self.kind {
            GateKind::Standard(g) => g.params(),
            GateKind::Custom(g) => g.params.clone(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
