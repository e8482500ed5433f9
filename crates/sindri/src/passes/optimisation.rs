//! Peephole optimisation passes.
//!
//! These all share the same linear-scan machinery: walk the operation list
//! once, tracking the last operation that touched each qubit, and merge or
//! cancel against it. Anything a single sweep misses is picked up by
//! running to a fixpoint.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, Op};
use crate::decompose::is_zero_mod2;
use crate::error::SindriResult;
use crate::optype::OpType;
use crate::passes::OptPass;

/// Pauli-string synthesis strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthStrategy {
    /// Synthesize each string on its own.
    Individual,
    /// Synthesize strings in commuting pairs.
    Pairwise,
    /// Synthesize whole commuting sets.
    Sets,
}

/// CX-ladder layout used when synthesizing multi-qubit rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CxConfig {
    /// Linear chain of CXs.
    Snake,
    /// All CXs share one control.
    Star,
    /// Balanced tree of CXs.
    Tree,
    /// Use a single multi-qubit interaction where available.
    MultiQGate,
}

/// Index of the op that last touched every one of `qubits`, when that is a
/// single common op.
fn common_last(last: &FxHashMap<u32, usize>, qubits: &[u32]) -> Option<usize> {
    let mut iter = qubits.iter();
    let first = *last.get(iter.next()?)?;
    for q in iter {
        if *last.get(q)? != first {
            return None;
        }
    }
    Some(first)
}

/// Merge adjacent same-axis rotations on identical operands.
fn merge_adjacent_rotations(circ: &mut Circuit) -> bool {
    let ops = circ.take_ops();
    let mut out: Vec<Op> = Vec::with_capacity(ops.len());
    let mut dead: Vec<bool> = Vec::with_capacity(ops.len());
    let mut last: FxHashMap<u32, usize> = FxHashMap::default();
    let mut changed = false;

    for op in ops {
        if op.optype.is_rotation() && op.condition.is_none() {
            if let Some(idx) = common_last(&last, &op.qubits) {
                let prev = &mut out[idx];
                if !dead[idx]
                    && prev.optype == op.optype
                    && prev.qubits == op.qubits
                    && prev.condition.is_none()
                {
                    prev.params[0] += op.params[0];
                    changed = true;
                    if is_zero_mod2(prev.params[0]) {
                        dead[idx] = true;
                        for q in &op.qubits {
                            last.remove(q);
                        }
                    }
                    continue;
                }
            }
        }
        let idx = out.len();
        for &q in &op.qubits {
            last.insert(q, idx);
        }
        out.push(op);
        dead.push(false);
    }

    circ.set_ops(
        out.into_iter()
            .zip(dead)
            .filter_map(|(op, d)| (!d).then_some(op))
            .collect(),
    );
    changed
}

/// Cancel adjacent gate/inverse pairs on identical operands. `eligible`
/// narrows which gates participate.
fn cancel_inverse_pairs(circ: &mut Circuit, eligible: impl Fn(&Op) -> bool) -> bool {
    let ops = circ.take_ops();
    let mut out: Vec<Op> = Vec::with_capacity(ops.len());
    let mut dead: Vec<bool> = Vec::with_capacity(ops.len());
    let mut last: FxHashMap<u32, usize> = FxHashMap::default();
    let mut changed = false;

    for op in ops {
        if op.condition.is_none() && op.params.is_empty() && op.optype.is_gate() && eligible(&op) {
            if let Some(idx) = common_last(&last, &op.qubits) {
                let prev = &out[idx];
                if !dead[idx]
                    && prev.condition.is_none()
                    && prev.qubits == op.qubits
                    && prev.optype.dagger() == Some(op.optype)
                    && eligible(prev)
                {
                    dead[idx] = true;
                    changed = true;
                    for q in &op.qubits {
                        last.remove(q);
                    }
                    continue;
                }
            }
        }
        let idx = out.len();
        for &q in &op.qubits {
            last.insert(q, idx);
        }
        out.push(op);
        dead.push(false);
    }

    circ.set_ops(
        out.into_iter()
            .zip(dead)
            .filter_map(|(op, d)| (!d).then_some(op))
            .collect(),
    );
    changed
}

/// Drop explicit no-ops and full-turn rotations.
fn drop_trivial(circ: &mut Circuit) -> bool {
    let ops = circ.take_ops();
    let before = ops.len();
    let kept: Vec<Op> = ops
        .into_iter()
        .filter(|op| {
            if op.condition.is_some() {
                return true;
            }
            match op.optype {
                OpType::Noop => false,
                t if t.is_rotation() => !is_zero_mod2(op.params[0]),
                _ => true,
            }
        })
        .collect();
    let changed = kept.len() != before;
    circ.set_ops(kept);
    changed
}

/// Rotation merging and trivial-gate removal, run to a fixpoint.
#[derive(Debug, Default)]
pub struct Synthesise;

impl Synthesise {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl OptPass for Synthesise {
    fn name(&self) -> &str {
        "Synthesise"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut any = false;
        loop {
            let changed = merge_adjacent_rotations(circuit) | drop_trivial(circuit);
            any |= changed;
            if !changed {
                return Ok(any);
            }
        }
    }
}

/// Cancellation of gate/inverse pairs, run to a fixpoint.
#[derive(Debug, Default)]
pub struct RemoveRedundancies;

impl RemoveRedundancies {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl OptPass for RemoveRedundancies {
    fn name(&self) -> &str {
        "RemoveRedundancies"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut any = false;
        loop {
            let changed = cancel_inverse_pairs(circuit, |_| true) | drop_trivial(circuit);
            any |= changed;
            if !changed {
                return Ok(any);
            }
        }
    }
}

/// The full peephole suite: rotation merging plus pair cancellation.
#[derive(Debug)]
pub struct FullPeephole {
    /// Whether the pass may exploit implicit wire swaps.
    pub allow_swaps: bool,
}

impl FullPeephole {
    /// Create the pass.
    pub fn new(allow_swaps: bool) -> Self {
        Self { allow_swaps }
    }
}

impl OptPass for FullPeephole {
    fn name(&self) -> &str {
        "FullPeephole"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut any = false;
        loop {
            let changed = merge_adjacent_rotations(circuit)
                | cancel_inverse_pairs(circuit, |_| true)
                | drop_trivial(circuit);
            any |= changed;
            if !changed {
                return Ok(any);
            }
        }
    }
}

/// Clifford-subset cancellation.
#[derive(Debug)]
pub struct CliffordSimp {
    /// Whether the pass may exploit implicit wire swaps.
    pub allow_swaps: bool,
}

impl CliffordSimp {
    /// Create the pass.
    pub fn new(allow_swaps: bool) -> Self {
        Self { allow_swaps }
    }
}

impl OptPass for CliffordSimp {
    fn name(&self) -> &str {
        "CliffordSimp"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut any = false;
        loop {
            let changed =
                cancel_inverse_pairs(circuit, |op| op.optype.dagger().is_some())
                    | drop_trivial(circuit);
            any |= changed;
            if !changed {
                return Ok(any);
            }
        }
    }
}

/// Two-qubit block resynthesis toward a chosen interaction gate.
///
/// The reference implementation limits itself to cancelling adjacent
/// self-inverse two-qubit pairs; the full KAK resynthesis lives in the
/// numeric core and is not part of the interface contract.
#[derive(Debug)]
pub struct KakDecomposition {
    /// The two-qubit gate resynthesis targets.
    pub target_2qb_gate: OpType,
    /// Whether resynthesis may end in an implicit swap.
    pub allow_swaps: bool,
    /// Minimum fidelity below which a block is left untouched.
    pub fidelity: f64,
}

impl KakDecomposition {
    /// Create the pass targeting a two-qubit gate.
    pub fn new(target_2qb_gate: OpType, allow_swaps: bool, fidelity: f64) -> Self {
        Self {
            target_2qb_gate,
            allow_swaps,
            fidelity,
        }
    }
}

impl OptPass for KakDecomposition {
    fn name(&self) -> &str {
        "KakDecomposition"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut any = false;
        loop {
            let changed = cancel_inverse_pairs(circuit, |op| {
                op.qubits.len() == 2 && op.optype.is_self_inverse()
            }) | drop_trivial(circuit);
            any |= changed;
            if !changed {
                return Ok(any);
            }
        }
    }
}

/// Remove gates that act trivially on the initial |0⟩ state.
///
/// Diagonal gates at the very front of a qubit's wire change |0⟩ only by
/// phase; they are dropped. A reset re-opens the window on its qubit.
#[derive(Debug)]
pub struct SimplifyInitial {
    /// Whether classically conditioned gates may be simplified.
    pub allow_classical: bool,
    /// Whether every device qubit should be treated as starting in |0⟩
    /// even when the circuit never touches it.
    pub create_all_qubits: bool,
}

impl SimplifyInitial {
    /// Create the pass.
    pub fn new(allow_classical: bool, create_all_qubits: bool) -> Self {
        Self {
            allow_classical,
            create_all_qubits,
        }
    }
}

impl OptPass for SimplifyInitial {
    fn name(&self) -> &str {
        "SimplifyInitial"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let ops = circuit.take_ops();
        let mut initial = vec![true; circuit.n_qubits() as usize];
        let mut out = Vec::with_capacity(ops.len());
        let mut changed = false;

        for op in ops {
            let conditioned = op.condition.is_some();
            let in_window = op.qubits.iter().all(|&q| initial[q as usize]);
            let droppable = op.optype.is_diagonal()
                && in_window
                && (self.allow_classical || !conditioned)
                && op.optype.is_gate();

            if droppable {
                changed = true;
                continue;
            }
            for &q in &op.qubits {
                // Reset returns the qubit to |0⟩; everything else closes
                // the initial window.
                initial[q as usize] = op.optype == OpType::Reset;
            }
            out.push(op);
        }

        circuit.set_ops(out);
        Ok(changed)
    }
}

/// Pauli-string resynthesis.
///
/// The reference implementation reduces to rotation merging; the strategy
/// and CX-layout knobs parameterize the numeric core.
#[derive(Debug)]
pub struct PauliSimp {
    /// Grouping strategy for commuting strings.
    pub strategy: SynthStrategy,
    /// CX-ladder layout.
    pub cx_config: CxConfig,
}

impl PauliSimp {
    /// Create the pass.
    pub fn new(strategy: SynthStrategy, cx_config: CxConfig) -> Self {
        Self {
            strategy,
            cx_config,
        }
    }
}

impl OptPass for PauliSimp {
    fn name(&self) -> &str {
        "PauliSimp"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut any = false;
        loop {
            let changed = merge_adjacent_rotations(circuit) | drop_trivial(circuit);
            any |= changed;
            if !changed {
                return Ok(any);
            }
        }
    }
}
