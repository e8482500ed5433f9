//! The Sindri operation taxonomy.
//!
//! Operation names follow Sindri's own spelling (`U3`, `XXPhase`,
//! `ISwapMax`, ...), which differs from the lowercase host convention in a
//! handful of places; callers converting from other naming schemes are
//! expected to handle the mapping themselves.

use serde::{Deserialize, Serialize};

/// Every operation Sindri recognizes.
///
/// Rotation parameters are in half-turns throughout the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OpType {
    /// Identity (explicit no-op).
    Noop,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// S (sqrt(Z)).
    S,
    /// S-dagger.
    Sdg,
    /// T (fourth root of Z).
    T,
    /// T-dagger.
    Tdg,
    /// sqrt(X).
    SX,
    /// sqrt(X)-dagger.
    SXdg,
    /// X rotation.
    Rx,
    /// Y rotation.
    Ry,
    /// Z rotation.
    Rz,
    /// Diagonal phase rotation.
    U1,
    /// Fixed-θ universal gate U2(φ, λ).
    U2,
    /// Universal single-qubit gate U3(θ, φ, λ).
    U3,
    /// Sindri's canonical single-qubit form: TK1(α, β, γ) = Rz(α)·Rx(β)·Rz(γ).
    TK1,
    /// Phased X rotation PhasedX(θ, φ).
    PhasedX,

    /// Controlled-X.
    CX,
    /// Controlled-Y.
    CY,
    /// Controlled-Z.
    CZ,
    /// Controlled-Hadamard.
    CH,
    /// Controlled X rotation.
    CRx,
    /// Controlled Y rotation.
    CRy,
    /// Controlled Z rotation.
    CRz,
    /// Controlled U1.
    CU1,
    /// Controlled U3.
    CU3,
    /// SWAP.
    SWAP,
    /// Maximally-entangling iSWAP.
    ISwapMax,
    /// XX interaction rotation.
    XXPhase,
    /// YY interaction rotation.
    YYPhase,
    /// ZZ interaction rotation.
    ZZPhase,

    /// Toffoli.
    CCX,
    /// Fredkin.
    CSWAP,

    /// Measurement into a classical bit.
    Measure,
    /// Reset to |0⟩.
    Reset,
    /// Barrier.
    Barrier,
    /// A boxed sub-circuit, inlined by `DecomposeBoxes`.
    CircBox,
}

/// All operation types, for enumeration-based lookups.
pub const ALL_OPTYPES: &[OpType] = &[
    OpType::Noop,
    OpType::X,
    OpType::Y,
    OpType::Z,
    OpType::H,
    OpType::S,
    OpType::Sdg,
    OpType::T,
    OpType::Tdg,
    OpType::SX,
    OpType::SXdg,
    OpType::Rx,
    OpType::Ry,
    OpType::Rz,
    OpType::U1,
    OpType::U2,
    OpType::U3,
    OpType::TK1,
    OpType::PhasedX,
    OpType::CX,
    OpType::CY,
    OpType::CZ,
    OpType::CH,
    OpType::CRx,
    OpType::CRy,
    OpType::CRz,
    OpType::CU1,
    OpType::CU3,
    OpType::SWAP,
    OpType::ISwapMax,
    OpType::XXPhase,
    OpType::YYPhase,
    OpType::ZZPhase,
    OpType::CCX,
    OpType::CSWAP,
    OpType::Measure,
    OpType::Reset,
    OpType::Barrier,
    OpType::CircBox,
];

impl OpType {
    /// Get Sindri's name for this operation.
    pub fn name(self) -> &'static str {
        match self {
            OpType::Noop => "Noop",
            OpType::X => "X",
            OpType::Y => "Y",
            OpType::Z => "Z",
            OpType::H => "H",
            OpType::S => "S",
            OpType::Sdg => "Sdg",
            OpType::T => "T",
            OpType::Tdg => "Tdg",
            OpType::SX => "SX",
            OpType::SXdg => "SXdg",
            OpType::Rx => "Rx",
            OpType::Ry => "Ry",
            OpType::Rz => "Rz",
            OpType::U1 => "U1",
            OpType::U2 => "U2",
            OpType::U3 => "U3",
            OpType::TK1 => "TK1",
            OpType::PhasedX => "PhasedX",
            OpType::CX => "CX",
            OpType::CY => "CY",
            OpType::CZ => "CZ",
            OpType::CH => "CH",
            OpType::CRx => "CRx",
            OpType::CRy => "CRy",
            OpType::CRz => "CRz",
            OpType::CU1 => "CU1",
            OpType::CU3 => "CU3",
            OpType::SWAP => "SWAP",
            OpType::ISwapMax => "ISwapMax",
            OpType::XXPhase => "XXPhase",
            OpType::YYPhase => "YYPhase",
            OpType::ZZPhase => "ZZPhase",
            OpType::CCX => "CCX",
            OpType::CSWAP => "CSWAP",
            OpType::Measure => "Measure",
            OpType::Reset => "Reset",
            OpType::Barrier => "Barrier",
            OpType::CircBox => "CircBox",
        }
    }

    /// Look up an operation by its exact Sindri name.
    pub fn from_name(name: &str) -> Option<OpType> {
        ALL_OPTYPES.iter().copied().find(|op| op.name() == name)
    }

    /// Number of qubits, or `None` for variadic operations.
    pub fn n_qubits(self) -> Option<u32> {
        match self {
            OpType::Noop
            | OpType::X
            | OpType::Y
            | OpType::Z
            | OpType::H
            | OpType::S
            | OpType::Sdg
            | OpType::T
            | OpType::Tdg
            | OpType::SX
            | OpType::SXdg
            | OpType::Rx
            | OpType::Ry
            | OpType::Rz
            | OpType::U1
            | OpType::U2
            | OpType::U3
            | OpType::TK1
            | OpType::PhasedX
            | OpType::Measure
            | OpType::Reset => Some(1),

            OpType::CX
            | OpType::CY
            | OpType::CZ
            | OpType::CH
            | OpType::CRx
            | OpType::CRy
            | OpType::CRz
            | OpType::CU1
            | OpType::CU3
            | OpType::SWAP
            | OpType::ISwapMax
            | OpType::XXPhase
            | OpType::YYPhase
            | OpType::ZZPhase => Some(2),

            OpType::CCX | OpType::CSWAP => Some(3),

            OpType::Barrier | OpType::CircBox => None,
        }
    }

    /// Number of half-turn parameters this operation takes.
    pub fn n_params(self) -> u32 {
        match self {
            OpType::Rx
            | OpType::Ry
            | OpType::Rz
            | OpType::U1
            | OpType::CRx
            | OpType::CRy
            | OpType::CRz
            | OpType::CU1
            | OpType::XXPhase
            | OpType::YYPhase
            | OpType::ZZPhase => 1,

            OpType::U2 | OpType::PhasedX => 2,

            OpType::U3 | OpType::TK1 | OpType::CU3 => 3,

            _ => 0,
        }
    }

    /// Check whether this operation is a unitary gate.
    pub fn is_gate(self) -> bool {
        !matches!(
            self,
            OpType::Measure | OpType::Reset | OpType::Barrier | OpType::CircBox
        )
    }

    /// Check whether this gate is its own inverse.
    pub fn is_self_inverse(self) -> bool {
        matches!(
            self,
            OpType::Noop
                | OpType::X
                | OpType::Y
                | OpType::Z
                | OpType::H
                | OpType::CX
                | OpType::CY
                | OpType::CZ
                | OpType::CH
                | OpType::SWAP
                | OpType::CCX
                | OpType::CSWAP
        )
    }

    /// The inverse of a parameter-free gate, when it is another single
    /// operation in the taxonomy.
    pub fn dagger(self) -> Option<OpType> {
        match self {
            op if op.is_self_inverse() => Some(op),
            OpType::S => Some(OpType::Sdg),
            OpType::Sdg => Some(OpType::S),
            OpType::T => Some(OpType::Tdg),
            OpType::Tdg => Some(OpType::T),
            OpType::SX => Some(OpType::SXdg),
            OpType::SXdg => Some(OpType::SX),
            _ => None,
        }
    }

    /// Check whether this gate is diagonal in the computational basis and
    /// therefore acts trivially on |0⟩ up to phase.
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            OpType::Noop
                | OpType::Z
                | OpType::S
                | OpType::Sdg
                | OpType::T
                | OpType::Tdg
                | OpType::Rz
                | OpType::U1
                | OpType::CZ
                | OpType::CRz
                | OpType::CU1
                | OpType::ZZPhase
        )
    }

    /// Check whether this gate is a plain axis rotation whose adjacent
    /// repetitions merge by adding parameters.
    pub fn is_rotation(self) -> bool {
        matches!(
            self,
            OpType::Rx
                | OpType::Ry
                | OpType::Rz
                | OpType::U1
                | OpType::CRx
                | OpType::CRy
                | OpType::CRz
                | OpType::CU1
                | OpType::XXPhase
                | OpType::YYPhase
                | OpType::ZZPhase
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for &op in ALL_OPTYPES {
            assert_eq!(OpType::from_name(op.name()), Some(op));
        }
    }

    #[test]
    fn test_arities() {
        assert_eq!(OpType::H.n_qubits(), Some(1));
        assert_eq!(OpType::XXPhase.n_qubits(), Some(2));
        assert_eq!(OpType::CCX.n_qubits(), Some(3));
        assert_eq!(OpType::Barrier.n_qubits(), None);
        assert_eq!(OpType::TK1.n_params(), 3);
        assert_eq!(OpType::PhasedX.n_params(), 2);
    }

    #[test]
    fn test_dagger_pairs() {
        assert_eq!(OpType::S.dagger(), Some(OpType::Sdg));
        assert_eq!(OpType::H.dagger(), Some(OpType::H));
        assert_eq!(OpType::Rz.dagger(), None);
    }
}
