//! Single-qubit decomposition helpers.
//!
//! Sindri's canonical single-qubit form is `TK1(α, β, γ) = Rz(α)·Rx(β)·Rz(γ)`
//! (matrix order; `Rz(γ)` acts first). Rebasing expresses foreign
//! single-qubit gates as TK1 triples and then replaces the triple with a
//! target-friendly realization. All angles are half-turns and all identities
//! hold up to global phase.

use crate::circuit::{Circuit, Op};
use crate::optype::OpType;

/// How to realize a TK1 triple over a concrete gate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tk1Replacement {
    /// `Rz`/`SX` ladder: TK1(α,β,γ) = Rz(α+½)·SX·Rz(β+1)·SX·Rz(γ+½).
    XSxRz,
    /// A single `U3` gate: TK1(α,β,γ) = U3(β, α−½, γ+½).
    U3,
}

impl Tk1Replacement {
    /// Build the 1-qubit replacement circuit for `TK1(alpha, beta, gamma)`.
    ///
    /// Zero-angle `Rz` links are elided, and a triple with no `Rx` component
    /// collapses to one `Rz`.
    pub fn circuit(self, alpha: f64, beta: f64, gamma: f64) -> Circuit {
        let mut circ = Circuit::new(1, 0);
        match self {
            Tk1Replacement::XSxRz => {
                if is_zero_mod2(beta) {
                    push_rz(&mut circ, alpha + beta + gamma);
                } else {
                    push_rz(&mut circ, gamma + 0.5);
                    circ.add_gate(OpType::SX, vec![], vec![0]).expect("1q op");
                    push_rz(&mut circ, beta + 1.0);
                    circ.add_gate(OpType::SX, vec![], vec![0]).expect("1q op");
                    push_rz(&mut circ, alpha + 0.5);
                }
            }
            Tk1Replacement::U3 => {
                circ.add_gate(OpType::U3, vec![beta, alpha - 0.5, gamma + 0.5], vec![0])
                    .expect("1q op");
            }
        }
        circ
    }
}

fn push_rz(circ: &mut Circuit, angle: f64) {
    if !is_zero_mod2(angle) {
        circ.add_gate(OpType::Rz, vec![angle], vec![0]).expect("1q op");
    }
}

pub(crate) fn is_zero_mod2(angle: f64) -> bool {
    let r = angle.rem_euclid(2.0);
    r.abs() < 1e-12 || (2.0 - r).abs() < 1e-12
}

/// The TK1 triple of a single-qubit gate, in half-turns.
///
/// Returns `None` for operations with no known triple (multi-qubit and
/// non-unitary operations).
pub fn tk1_angles(op: &Op) -> Option<(f64, f64, f64)> {
    let p = |i: usize| op.params.get(i).copied().unwrap_or(0.0);
    match op.optype {
        OpType::Noop => Some((0.0, 0.0, 0.0)),
        OpType::X => Some((0.0, 1.0, 0.0)),
        OpType::Y => Some((0.5, 1.0, -0.5)),
        OpType::Z => Some((1.0, 0.0, 0.0)),
        OpType::H => Some((0.5, 0.5, 0.5)),
        OpType::S => Some((0.5, 0.0, 0.0)),
        OpType::Sdg => Some((-0.5, 0.0, 0.0)),
        OpType::T => Some((0.25, 0.0, 0.0)),
        OpType::Tdg => Some((-0.25, 0.0, 0.0)),
        OpType::SX => Some((0.0, 0.5, 0.0)),
        OpType::SXdg => Some((0.0, -0.5, 0.0)),
        OpType::Rx => Some((0.0, p(0), 0.0)),
        OpType::Ry => Some((0.5, p(0), -0.5)),
        OpType::Rz | OpType::U1 => Some((p(0), 0.0, 0.0)),
        OpType::U2 => Some((p(0) + 0.5, 0.5, p(1) - 0.5)),
        OpType::U3 => Some((p(1) + 0.5, p(0), p(2) - 0.5)),
        OpType::TK1 => Some((p(0), p(1), p(2))),
        OpType::PhasedX => Some((p(1), p(0), -p(1))),
        _ => None,
    }
}
