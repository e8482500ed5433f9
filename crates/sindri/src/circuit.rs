//! The Sindri circuit value.
//!
//! A circuit is an ordered operation list over flat-indexed qubits and
//! classical bits. All rotation parameters are in **half-turns**: a
//! parameter of `1.0` is a half rotation (π radians).

use serde::{Deserialize, Serialize};

use crate::error::{SindriError, SindriResult};
use crate::optype::OpType;

/// Classical condition on an operation: run only when `bit` holds `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The classical bit tested.
    pub bit: u32,
    /// The value compared against.
    pub value: u64,
}

/// One operation in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    /// The operation type.
    pub optype: OpType,
    /// Half-turn parameters.
    pub params: Vec<f64>,
    /// Qubit operands.
    pub qubits: Vec<u32>,
    /// Classical bit operands (measurement results).
    pub bits: Vec<u32>,
    /// Optional classical condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Boxed sub-circuit, for `OpType::CircBox` only. Box qubit `i` binds
    /// positionally to operand `i`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcircuit: Option<Box<Circuit>>,
}

impl Op {
    /// Create a gate operation.
    pub fn gate(optype: OpType, params: Vec<f64>, qubits: Vec<u32>) -> Self {
        Self {
            optype,
            params,
            qubits,
            bits: vec![],
            condition: None,
            subcircuit: None,
        }
    }

    /// Attach a classical condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A Sindri circuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits.
    n_qubits: u32,
    /// Number of classical bits.
    n_bits: u32,
    /// Operations in program order.
    ops: Vec<Op>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new(n_qubits: u32, n_bits: u32) -> Self {
        Self {
            n_qubits,
            n_bits,
            ops: vec![],
        }
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Number of classical bits.
    pub fn n_bits(&self) -> u32 {
        self.n_bits
    }

    /// Operations in program order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Total number of operations.
    pub fn n_ops(&self) -> usize {
        self.ops.len()
    }

    /// Count operations of one type.
    pub fn count(&self, optype: OpType) -> usize {
        self.ops.iter().filter(|op| op.optype == optype).count()
    }

    /// Append an operation after validating operands.
    pub fn push(&mut self, op: Op) -> SindriResult<()> {
        for &qubit in &op.qubits {
            if qubit >= self.n_qubits {
                return Err(SindriError::QubitOutOfRange {
                    qubit,
                    n_qubits: self.n_qubits,
                });
            }
        }
        for &bit in &op.bits {
            if bit >= self.n_bits {
                return Err(SindriError::BitOutOfRange {
                    bit,
                    n_bits: self.n_bits,
                });
            }
        }
        if let Some(expected) = op.optype.n_qubits() {
            let got = op.qubits.len() as u32;
            if expected != got {
                return Err(SindriError::ArityMismatch {
                    op: op.optype,
                    expected,
                    got,
                });
            }
        }
        if op.optype != OpType::CircBox {
            let expected = op.optype.n_params();
            let got = op.params.len() as u32;
            if expected != got {
                return Err(SindriError::ParamCountMismatch {
                    op: op.optype,
                    expected,
                    got,
                });
            }
        }
        if op.optype == OpType::CircBox && op.subcircuit.is_none() {
            return Err(SindriError::InvalidCircBox(
                "CircBox op without a sub-circuit".into(),
            ));
        }
        self.ops.push(op);
        Ok(())
    }

    /// Append a gate operation.
    pub fn add_gate(
        &mut self,
        optype: OpType,
        params: Vec<f64>,
        qubits: Vec<u32>,
    ) -> SindriResult<&mut Self> {
        self.push(Op::gate(optype, params, qubits))?;
        Ok(self)
    }

    /// Append a measurement.
    pub fn add_measure(&mut self, qubit: u32, bit: u32) -> SindriResult<&mut Self> {
        self.push(Op {
            optype: OpType::Measure,
            params: vec![],
            qubits: vec![qubit],
            bits: vec![bit],
            condition: None,
            subcircuit: None,
        })?;
        Ok(self)
    }

    /// Append a boxed sub-circuit on the given qubits.
    pub fn add_circbox(&mut self, subcircuit: Circuit, qubits: Vec<u32>) -> SindriResult<&mut Self> {
        if subcircuit.n_qubits() != qubits.len() as u32 {
            return Err(SindriError::InvalidCircBox(format!(
                "box spans {} qubits but {} operands were given",
                subcircuit.n_qubits(),
                qubits.len(),
            )));
        }
        self.push(Op {
            optype: OpType::CircBox,
            params: vec![],
            qubits,
            bits: vec![],
            condition: None,
            subcircuit: Some(Box::new(subcircuit)),
        })?;
        Ok(self)
    }

    /// Replace the operation list wholesale. Used by passes that rebuild.
    pub fn set_ops(&mut self, ops: Vec<Op>) {
        self.ops = ops;
    }

    /// Grow the qubit count. Used by placement and routing, which may move
    /// operations onto higher-indexed device qubits.
    pub fn expand_to(&mut self, n_qubits: u32) {
        self.n_qubits = self.n_qubits.max(n_qubits);
    }

    /// Take the operation list, leaving the circuit empty.
    pub fn take_ops(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_count() {
        let mut circ = Circuit::new(2, 2);
        circ.add_gate(OpType::H, vec![], vec![0]).unwrap();
        circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();
        circ.add_measure(0, 0).unwrap();
        circ.add_measure(1, 1).unwrap();

        assert_eq!(circ.n_ops(), 4);
        assert_eq!(circ.count(OpType::Measure), 2);
        assert_eq!(circ.count(OpType::CX), 1);
    }

    #[test]
    fn test_param_count_checked() {
        let mut circ = Circuit::new(1, 0);
        let err = circ.add_gate(OpType::Rz, vec![], vec![0]).unwrap_err();
        assert!(matches!(err, SindriError::ParamCountMismatch { .. }));
    }

    #[test]
    fn test_arity_checked() {
        let mut circ = Circuit::new(2, 0);
        let err = circ.add_gate(OpType::CX, vec![], vec![0]).unwrap_err();
        assert!(matches!(err, SindriError::ArityMismatch { .. }));
    }

    #[test]
    fn test_circbox_requires_subcircuit() {
        let mut circ = Circuit::new(2, 0);
        let mut boxed = Circuit::new(2, 0);
        boxed.add_gate(OpType::CZ, vec![], vec![0, 1]).unwrap();
        circ.add_circbox(boxed, vec![0, 1]).unwrap();
        assert_eq!(circ.count(OpType::CircBox), 1);

        let err = circ
            .push(Op::gate(OpType::CircBox, vec![], vec![0, 1]))
            .unwrap_err();
        assert!(matches!(err, SindriError::InvalidCircBox(_)));
    }
}
