//! Placement, routing, and SWAP-elimination passes.

use rustc_hash::FxHashMap;

use crate::architecture::Architecture;
use crate::circuit::{Circuit, Op};
use crate::error::{SindriError, SindriResult};
use crate::optype::OpType;
use crate::passes::{OptPass, splice};
use crate::placement::Placement;

/// Relabel circuit qubits onto architecture nodes using a placement
/// strategy.
pub struct PlacementPass {
    /// The placement strategy and its data.
    pub placement: Placement,
}

impl PlacementPass {
    /// Create a placement pass.
    pub fn new(placement: Placement) -> Self {
        Self { placement }
    }
}

impl OptPass for PlacementPass {
    fn name(&self) -> &str {
        "PlacementPass"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let map = self.placement.place(circuit);
        let mut changed = false;
        let mut max_node = 0;

        let mut ops = circuit.take_ops();
        for op in &mut ops {
            for qubit in &mut op.qubits {
                let node = map.get(qubit).copied().unwrap_or(*qubit);
                changed |= node != *qubit;
                *qubit = node;
                max_node = max_node.max(node);
            }
        }
        circuit.set_ops(ops);
        circuit.expand_to(max_node + 1);
        Ok(changed)
    }
}

/// Insert SWAPs so every two-qubit interaction lands on a coupled pair.
///
/// Greedy: each distant pair is walked along a BFS-shortest path, swapping
/// the first operand toward the second. Assumes qubit labels already denote
/// architecture nodes (run a placement pass first).
pub struct Routing {
    /// The connectivity graph to route against.
    pub architecture: Architecture,
}

impl Routing {
    /// Create a routing pass.
    pub fn new(architecture: Architecture) -> Self {
        Self { architecture }
    }
}

impl OptPass for Routing {
    fn name(&self) -> &str {
        "Routing"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        // label → node currently holding it, plus the reverse view.
        let mut to_node: FxHashMap<u32, u32> = FxHashMap::default();
        let mut to_label: FxHashMap<u32, u32> = FxHashMap::default();
        for q in 0..circuit.n_qubits() {
            to_node.insert(q, q);
            to_label.insert(q, q);
        }

        let ops = circuit.take_ops();
        let mut out: Vec<Op> = Vec::with_capacity(ops.len());
        let mut changed = false;
        let mut max_node = 0;

        for mut op in ops {
            if op.qubits.len() == 2 && op.optype.is_gate() {
                let a = to_node[&op.qubits[0]];
                let b = to_node[&op.qubits[1]];
                if !self.architecture.connected(a, b) {
                    let path = self
                        .architecture
                        .shortest_path(a, b)
                        .ok_or(SindriError::RoutingFailed { a, b })?;
                    // Swap the first operand down the path until adjacent.
                    for window in path.windows(2).take(path.len() - 2) {
                        let (x, y) = (window[0], window[1]);
                        out.push(Op::gate(OpType::SWAP, vec![], vec![x, y]));
                        changed = true;
                        let lx = to_label[&x];
                        let ly = to_label[&y];
                        to_node.insert(lx, y);
                        to_node.insert(ly, x);
                        to_label.insert(x, ly);
                        to_label.insert(y, lx);
                    }
                }
            }
            for qubit in &mut op.qubits {
                let node = to_node[qubit];
                changed |= node != *qubit;
                *qubit = node;
                max_node = max_node.max(node);
            }
            out.push(op);
        }

        circuit.set_ops(out);
        circuit.expand_to(max_node + 1);
        Ok(changed)
    }
}

/// Replace every SWAP with a caller-supplied realization.
pub struct DecomposeSwaps {
    /// Replacement circuit over qubits `[0, 1]`.
    pub replacement_circuit: Circuit,
}

impl DecomposeSwaps {
    /// Create the pass from a replacement circuit.
    pub fn new(replacement_circuit: Circuit) -> Self {
        Self {
            replacement_circuit,
        }
    }
}

impl OptPass for DecomposeSwaps {
    fn name(&self) -> &str {
        "DecomposeSwaps"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let ops = circuit.take_ops();
        let mut out = Vec::with_capacity(ops.len());
        let mut changed = false;
        for op in ops {
            if op.optype == OpType::SWAP {
                splice(&self.replacement_circuit, &op.qubits, op.condition, &mut out);
                changed = true;
            } else {
                out.push(op);
            }
        }
        circuit.set_ops(out);
        Ok(changed)
    }
}

/// Combined mapping pass: place, route, then express the inserted SWAPs
/// over CX.
pub struct CxMapping {
    /// The connectivity graph.
    pub architecture: Architecture,
    /// Initial placement strategy.
    pub placement: Placement,
    /// Whether CX direction must follow edge direction.
    pub directed_cx: bool,
    /// Whether measurements are deferred to the end of the circuit.
    pub delay_measures: bool,
}

impl CxMapping {
    /// Create the pass.
    pub fn new(
        architecture: Architecture,
        placement: Placement,
        directed_cx: bool,
        delay_measures: bool,
    ) -> Self {
        Self {
            architecture,
            placement,
            directed_cx,
            delay_measures,
        }
    }
}

impl OptPass for CxMapping {
    fn name(&self) -> &str {
        "CxMapping"
    }

    fn apply(&self, circuit: &mut Circuit) -> SindriResult<bool> {
        let mut changed = PlacementPass::new(self.placement.clone()).apply(circuit)?;
        changed |= Routing::new(self.architecture.clone()).apply(circuit)?;

        let mut swap_as_cx = Circuit::new(2, 0);
        swap_as_cx.add_gate(OpType::CX, vec![], vec![0, 1])?;
        swap_as_cx.add_gate(OpType::CX, vec![], vec![1, 0])?;
        swap_as_cx.add_gate(OpType::CX, vec![], vec![0, 1])?;
        changed |= DecomposeSwaps::new(swap_as_cx).apply(circuit)?;
        Ok(changed)
    }
}
