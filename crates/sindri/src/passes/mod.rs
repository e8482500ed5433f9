//! Sindri optimization passes.
//!
//! A pass is an in-place transform over a [`Circuit`]. Passes compose into
//! [`SequencePass`] trees; `sequence()` exposes the children so embedders
//! can mirror the tree structure.

pub mod mapping;
pub mod optimisation;
pub mod rebase;

use std::sync::Arc;

use crate::circuit::{Circuit, Condition, Op};
use crate::error::SindriResult;

pub use mapping::{CxMapping, DecomposeSwaps, PlacementPass, Routing};
pub use optimisation::{
    CliffordSimp, FullPeephole, KakDecomposition, PauliSimp, RemoveRedundancies, SimplifyInitial,
    Synthesise,
};
pub use rebase::{DecomposeBoxes, Rebase};

/// An in-place circuit transform.
pub trait OptPass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Apply the pass to a circuit. Returns whether anything changed.
    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool>;

    /// Child passes, when this pass is a sequence composite.
    fn sequence(&self) -> Option<&[Arc<dyn OptPass>]> {
        None
    }
}

/// An ordered composite of passes.
pub struct SequencePass {
    passes: Vec<Arc<dyn OptPass>>,
}

impl SequencePass {
    /// Create a sequence from child passes.
    pub fn new(passes: Vec<Arc<dyn OptPass>>) -> Self {
        Self { passes }
    }
}

impl OptPass for SequencePass {
    fn name(&self) -> &str {
        "SequencePass"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut changed = false;
        for pass in &self.passes {
            changed |= pass.apply(circuit)?;
        }
        Ok(changed)
    }

    fn sequence(&self) -> Option<&[Arc<dyn OptPass>]> {
        Some(&self.passes)
    }
}

/// The stock compilation sequence for a given optimisation level (0–3).
///
/// Structure matters to embedders: sub-phases are nested sequences, not
/// flattened pass lists.
pub fn default_compilation_pass(level: u8) -> SequencePass {
    let decompose: Arc<dyn OptPass> = Arc::new(DecomposeBoxes::new());
    let cleanup: Arc<dyn OptPass> = Arc::new(SequencePass::new(vec![
        Arc::new(Synthesise::new()),
        Arc::new(RemoveRedundancies::new()),
    ]));

    match level {
        0 => SequencePass::new(vec![decompose]),
        1 => SequencePass::new(vec![decompose, cleanup]),
        _ => SequencePass::new(vec![
            decompose,
            cleanup,
            Arc::new(FullPeephole::new(true)),
        ]),
    }
}

/// Splice a replacement circuit in place of one operation: replacement
/// qubit `i` binds to `operands[i]`, and the replaced operation's condition
/// is copied onto every spliced op.
pub(crate) fn splice(
    replacement: &Circuit,
    operands: &[u32],
    condition: Option<Condition>,
    out: &mut Vec<Op>,
) {
    for op in replacement.ops() {
        let mut spliced = op.clone();
        spliced.qubits = op.qubits.iter().map(|&q| operands[q as usize]).collect();
        if spliced.condition.is_none() {
            spliced.condition = condition;
        }
        out.push(spliced);
    }
}
