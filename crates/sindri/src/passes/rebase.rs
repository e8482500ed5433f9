//! Gate-set rebasing and box expansion.

use rustc_hash::FxHashSet;

use crate::circuit::{Circuit, Op};
use crate::decompose::{Tk1Replacement, tk1_angles};
use crate::error::{SindriError, SindriResult};
use crate::optype::OpType;
use crate::passes::{OptPass, splice};

/// Inline every boxed sub-circuit, recursively.
#[derive(Debug, Default)]
pub struct DecomposeBoxes;

impl DecomposeBoxes {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }

    fn inline(op: &Op, out: &mut Vec<Op>) -> SindriResult<bool> {
        let sub = op
            .subcircuit
            .as_deref()
            .ok_or_else(|| SindriError::InvalidCircBox("CircBox without a sub-circuit".into()))?;
        if sub.n_bits() > 0 {
            return Err(SindriError::InvalidCircBox(
                "boxed sub-circuits must be purely quantum".into(),
            ));
        }
        for sop in sub.ops() {
            let mut mapped = sop.clone();
            mapped.qubits = sop.qubits.iter().map(|&q| op.qubits[q as usize]).collect();
            if mapped.condition.is_none() {
                mapped.condition = op.condition;
            }
            if mapped.optype == OpType::CircBox {
                Self::inline(&mapped, out)?;
            } else {
                out.push(mapped);
            }
        }
        Ok(true)
    }
}

impl OptPass for DecomposeBoxes {
    fn name(&self) -> &str {
        "DecomposeBoxes"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let ops = circuit.take_ops();
        let mut out = Vec::with_capacity(ops.len());
        let mut changed = false;
        for op in ops {
            if op.optype == OpType::CircBox {
                changed |= Self::inline(&op, &mut out)?;
            } else {
                out.push(op);
            }
        }
        circuit.set_ops(out);
        Ok(changed)
    }
}

/// Rewrite a circuit over a chosen gate set.
///
/// Two-qubit gates route through a caller-supplied CX realization; single
/// qubit gates are canonicalized to TK1 triples and realized through the
/// caller's TK1 replacement. Gates outside the library's decomposition
/// tables fail with [`SindriError::CannotRebase`].
pub struct Rebase {
    /// The gate set to rewrite into.
    pub gateset: FxHashSet<OpType>,
    /// Replacement circuit for CX, over qubits `[0, 1]`.
    pub cx_replacement: Circuit,
    /// Realization of TK1 triples.
    pub tk1_replacement: Tk1Replacement,
}

impl Rebase {
    /// Create a rebase pass.
    pub fn new(
        gateset: FxHashSet<OpType>,
        cx_replacement: Circuit,
        tk1_replacement: Tk1Replacement,
    ) -> Self {
        Self {
            gateset,
            cx_replacement,
            tk1_replacement,
        }
    }

    fn rebase_op(&self, op: Op, out: &mut Vec<Op>) -> SindriResult<bool> {
        if op.optype == OpType::CircBox {
            return Err(SindriError::CannotRebase { op: OpType::CircBox });
        }
        if !op.optype.is_gate() || self.gateset.contains(&op.optype) {
            out.push(op);
            return Ok(false);
        }
        if op.optype == OpType::CX {
            splice(&self.cx_replacement, &op.qubits, op.condition, out);
            return Ok(true);
        }
        if op.qubits.len() == 1 {
            if let Some((alpha, beta, gamma)) = tk1_angles(&op) {
                let replacement = self.tk1_replacement.circuit(alpha, beta, gamma);
                splice(&replacement, &op.qubits, op.condition, out);
                return Ok(true);
            }
            return Err(SindriError::CannotRebase { op: op.optype });
        }
        if let Some(decomp) = cx_decomposition(&op) {
            for mut step in decomp {
                if step.condition.is_none() {
                    step.condition = op.condition;
                }
                self.rebase_op(step, out)?;
            }
            return Ok(true);
        }
        Err(SindriError::CannotRebase { op: op.optype })
    }
}

impl OptPass for Rebase {
    fn name(&self) -> &str {
        "Rebase"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let ops = circuit.take_ops();
        let mut out = Vec::with_capacity(ops.len());
        let mut changed = false;
        for op in ops {
            changed |= self.rebase_op(op, &mut out)?;
        }
        circuit.set_ops(out);
        Ok(changed)
    }
}

/// Express a multi-qubit gate over CX plus single-qubit gates.
///
/// Qubits in the returned ops are already bound to the input's operands.
fn cx_decomposition(op: &Op) -> Option<Vec<Op>> {
    let g = |optype, params: Vec<f64>, qubits: Vec<u32>| Op::gate(optype, params, qubits);
    let q = &op.qubits;
    let p = |i: usize| op.params.get(i).copied().unwrap_or(0.0);

    let ops = match op.optype {
        OpType::CZ => vec![
            g(OpType::H, vec![], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::H, vec![], vec![q[1]]),
        ],
        OpType::CY => vec![
            g(OpType::Sdg, vec![], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::S, vec![], vec![q[1]]),
        ],
        OpType::CH => vec![
            g(OpType::S, vec![], vec![q[1]]),
            g(OpType::H, vec![], vec![q[1]]),
            g(OpType::T, vec![], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Tdg, vec![], vec![q[1]]),
            g(OpType::H, vec![], vec![q[1]]),
            g(OpType::Sdg, vec![], vec![q[1]]),
        ],
        OpType::SWAP => vec![
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::CX, vec![], vec![q[1], q[0]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
        ],
        OpType::ISwapMax => vec![
            g(OpType::S, vec![], vec![q[0]]),
            g(OpType::S, vec![], vec![q[1]]),
            g(OpType::H, vec![], vec![q[0]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::CX, vec![], vec![q[1], q[0]]),
            g(OpType::H, vec![], vec![q[1]]),
        ],
        OpType::ZZPhase => vec![
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Rz, vec![p(0)], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
        ],
        OpType::XXPhase => vec![
            g(OpType::H, vec![], vec![q[0]]),
            g(OpType::H, vec![], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Rz, vec![p(0)], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::H, vec![], vec![q[0]]),
            g(OpType::H, vec![], vec![q[1]]),
        ],
        OpType::YYPhase => vec![
            g(OpType::Rx, vec![0.5], vec![q[0]]),
            g(OpType::Rx, vec![0.5], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Rz, vec![p(0)], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Rx, vec![-0.5], vec![q[0]]),
            g(OpType::Rx, vec![-0.5], vec![q[1]]),
        ],
        OpType::CRz => vec![
            g(OpType::Rz, vec![p(0) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Rz, vec![-p(0) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
        ],
        OpType::CRx => vec![
            g(OpType::H, vec![], vec![q[1]]),
            g(OpType::Rz, vec![p(0) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Rz, vec![-p(0) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::H, vec![], vec![q[1]]),
        ],
        OpType::CRy => vec![
            g(OpType::Ry, vec![p(0) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::Ry, vec![-p(0) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
        ],
        OpType::CU1 => vec![
            g(OpType::U1, vec![p(0) / 2.0], vec![q[0]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::U1, vec![-p(0) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::U1, vec![p(0) / 2.0], vec![q[1]]),
        ],
        OpType::CU3 => vec![
            g(OpType::U1, vec![(p(2) + p(1)) / 2.0], vec![q[0]]),
            g(OpType::U1, vec![(p(2) - p(1)) / 2.0], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(
                OpType::U3,
                vec![-p(0) / 2.0, 0.0, -(p(1) + p(2)) / 2.0],
                vec![q[1]],
            ),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::U3, vec![p(0) / 2.0, p(1), 0.0], vec![q[1]]),
        ],
        OpType::CCX => vec![
            g(OpType::H, vec![], vec![q[2]]),
            g(OpType::CX, vec![], vec![q[1], q[2]]),
            g(OpType::Tdg, vec![], vec![q[2]]),
            g(OpType::CX, vec![], vec![q[0], q[2]]),
            g(OpType::T, vec![], vec![q[2]]),
            g(OpType::CX, vec![], vec![q[1], q[2]]),
            g(OpType::Tdg, vec![], vec![q[2]]),
            g(OpType::CX, vec![], vec![q[0], q[2]]),
            g(OpType::T, vec![], vec![q[1]]),
            g(OpType::T, vec![], vec![q[2]]),
            g(OpType::H, vec![], vec![q[2]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
            g(OpType::T, vec![], vec![q[0]]),
            g(OpType::Tdg, vec![], vec![q[1]]),
            g(OpType::CX, vec![], vec![q[0], q[1]]),
        ],
        OpType::CSWAP => vec![
            g(OpType::CX, vec![], vec![q[2], q[1]]),
            g(OpType::CCX, vec![], vec![q[0], q[1], q[2]]),
            g(OpType::CX, vec![], vec![q[2], q[1]]),
        ],
        _ => return None,
    };
    Some(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateset(ops: &[OpType]) -> FxHashSet<OpType> {
        ops.iter().copied().collect()
    }

    fn plain_cx() -> Circuit {
        let mut circ = Circuit::new(2, 0);
        circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();
        circ
    }

    #[test]
    fn test_rebase_keeps_gates_in_set() {
        let rebase = Rebase::new(
            gateset(&[OpType::CX, OpType::Rz, OpType::SX, OpType::H]),
            plain_cx(),
            Tk1Replacement::XSxRz,
        );
        let mut circ = Circuit::new(2, 0);
        circ.add_gate(OpType::H, vec![], vec![0]).unwrap();
        circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();
        assert!(!rebase.apply(&mut circ).unwrap());
        assert_eq!(circ.n_ops(), 2);
    }

    #[test]
    fn test_rebase_cz_through_cx() {
        let rebase = Rebase::new(
            gateset(&[OpType::CX, OpType::Rz, OpType::SX]),
            plain_cx(),
            Tk1Replacement::XSxRz,
        );
        let mut circ = Circuit::new(2, 0);
        circ.add_gate(OpType::CZ, vec![], vec![0, 1]).unwrap();
        rebase.apply(&mut circ).unwrap();
        assert_eq!(circ.count(OpType::CZ), 0);
        assert_eq!(circ.count(OpType::CX), 1);
        // The two H sandwiches became Rz/SX ladders.
        assert!(circ.count(OpType::SX) > 0);
    }

    #[test]
    fn test_rebase_cx_uses_replacement() {
        // CZ-native target: CX realized as H·CZ·H.
        let mut cx_repl = Circuit::new(2, 0);
        cx_repl.add_gate(OpType::H, vec![], vec![1]).unwrap();
        cx_repl.add_gate(OpType::CZ, vec![], vec![0, 1]).unwrap();
        cx_repl.add_gate(OpType::H, vec![], vec![1]).unwrap();

        let rebase = Rebase::new(
            gateset(&[OpType::CZ, OpType::H, OpType::Rz]),
            cx_repl,
            Tk1Replacement::U3,
        );
        let mut circ = plain_cx();
        rebase.apply(&mut circ).unwrap();
        assert_eq!(circ.count(OpType::CX), 0);
        assert_eq!(circ.count(OpType::CZ), 1);
        assert_eq!(circ.count(OpType::H), 2);
    }

    #[test]
    fn test_rebase_condition_carries_through() {
        let rebase = Rebase::new(
            gateset(&[OpType::CX, OpType::U3]),
            plain_cx(),
            Tk1Replacement::U3,
        );
        let mut circ = Circuit::new(1, 1);
        circ.push(
            Op::gate(OpType::H, vec![], vec![0])
                .with_condition(crate::circuit::Condition { bit: 0, value: 1 }),
        )
        .unwrap();
        rebase.apply(&mut circ).unwrap();
        assert!(circ.ops().iter().all(|op| op.condition.is_some()));
    }

    #[test]
    fn test_decompose_boxes_inlines_recursively() {
        let mut inner = Circuit::new(2, 0);
        inner.add_gate(OpType::CZ, vec![], vec![0, 1]).unwrap();

        let mut middle = Circuit::new(2, 0);
        middle.add_circbox(inner, vec![0, 1]).unwrap();
        middle.add_gate(OpType::H, vec![], vec![0]).unwrap();

        let mut circ = Circuit::new(3, 0);
        circ.add_circbox(middle, vec![1, 2]).unwrap();

        DecomposeBoxes::new().apply(&mut circ).unwrap();
        assert_eq!(circ.count(OpType::CircBox), 0);
        assert_eq!(circ.count(OpType::CZ), 1);
        assert_eq!(circ.ops()[0].qubits, vec![1, 2]);
        assert_eq!(circ.ops()[1].qubits, vec![1]);
    }
}
