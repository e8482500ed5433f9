//! Initial qubit placement strategies.
//!
//! Each strategy maps circuit qubits onto architecture nodes. The
//! heuristics here are deliberately greedy; callers that need better
//! placements re-run with a different strategy or hand-pick a mapping.

use rustc_hash::FxHashMap;

use crate::architecture::Architecture;
use crate::circuit::Circuit;

/// A placement strategy together with the data it needs.
#[derive(Debug, Clone)]
pub enum Placement {
    /// Subgraph-style placement on the connectivity graph.
    Graph(GraphPlacement),
    /// Placement along a line of connected nodes.
    Line(LinePlacement),
    /// Placement biased away from noisy qubits and links.
    NoiseAware(NoiseAwarePlacement),
}

impl Placement {
    /// The architecture this placement targets.
    pub fn architecture(&self) -> &Architecture {
        match self {
            Placement::Graph(p) => &p.architecture,
            Placement::Line(p) => &p.architecture,
            Placement::NoiseAware(p) => &p.architecture,
        }
    }

    /// The strategy name.
    pub fn strategy(&self) -> &'static str {
        match self {
            Placement::Graph(_) => "Graph",
            Placement::Line(_) => "Line",
            Placement::NoiseAware(_) => "NoiseAware",
        }
    }

    /// Map circuit qubits onto architecture nodes.
    pub fn place(&self, circuit: &Circuit) -> FxHashMap<u32, u32> {
        match self {
            Placement::Graph(p) => p.place(circuit),
            Placement::Line(p) => p.place(circuit),
            Placement::NoiseAware(p) => p.place(circuit),
        }
    }
}

/// Assign circuit qubits to nodes in descending connectivity order, so the
/// busiest circuit qubits land on the best-connected nodes.
#[derive(Debug, Clone)]
pub struct GraphPlacement {
    /// The target connectivity graph.
    pub architecture: Architecture,
}

impl GraphPlacement {
    /// Create a graph placement over an architecture.
    pub fn new(architecture: Architecture) -> Self {
        Self { architecture }
    }

    fn place(&self, circuit: &Circuit) -> FxHashMap<u32, u32> {
        let mut nodes = self.architecture.nodes();
        nodes.sort_by_key(|&n| std::cmp::Reverse(self.architecture.neighbors(n).len()));
        assign_in_order(&by_interaction_count(circuit), &nodes)
    }
}

/// Assign circuit qubits along a connected line of nodes.
#[derive(Debug, Clone)]
pub struct LinePlacement {
    /// The target connectivity graph.
    pub architecture: Architecture,
}

impl LinePlacement {
    /// Create a line placement over an architecture.
    pub fn new(architecture: Architecture) -> Self {
        Self { architecture }
    }

    fn place(&self, circuit: &Circuit) -> FxHashMap<u32, u32> {
        let line = self.line_order();
        let order: Vec<u32> = (0..circuit.n_qubits()).collect();
        assign_in_order(&order, &line)
    }

    // Greedy walk from the lowest-index degree-1 node; falls back to sorted
    // order when the graph has no open chain.
    fn line_order(&self) -> Vec<u32> {
        let nodes = self.architecture.nodes();
        let start = nodes
            .iter()
            .copied()
            .find(|&n| self.architecture.neighbors(n).len() == 1)
            .or_else(|| nodes.first().copied());
        let Some(start) = start else {
            return vec![];
        };

        let mut line = vec![start];
        let mut current = start;
        while let Some(next) = self
            .architecture
            .neighbors(current)
            .into_iter()
            .find(|n| !line.contains(n))
        {
            line.push(next);
            current = next;
        }
        for node in nodes {
            if !line.contains(&node) {
                line.push(node);
            }
        }
        line
    }
}

/// Like [`LinePlacement`], but orders candidate nodes by estimated noise so
/// the busiest circuit qubits land on the cleanest hardware.
#[derive(Debug, Clone)]
pub struct NoiseAwarePlacement {
    /// The target connectivity graph.
    pub architecture: Architecture,
    /// Mean single-qubit error per node.
    pub node_errors: FxHashMap<u32, f64>,
    /// Mean two-qubit error per directed link.
    pub link_errors: FxHashMap<(u32, u32), f64>,
    /// Mean readout error per node.
    pub readout_errors: FxHashMap<u32, f64>,
}

impl NoiseAwarePlacement {
    /// Create a noise-aware placement.
    pub fn new(
        architecture: Architecture,
        node_errors: FxHashMap<u32, f64>,
        link_errors: FxHashMap<(u32, u32), f64>,
        readout_errors: FxHashMap<u32, f64>,
    ) -> Self {
        Self {
            architecture,
            node_errors,
            link_errors,
            readout_errors,
        }
    }

    fn node_cost(&self, node: u32) -> f64 {
        let gate = self.node_errors.get(&node).copied().unwrap_or(0.0);
        let readout = self.readout_errors.get(&node).copied().unwrap_or(0.0);
        let link: f64 = self
            .link_errors
            .iter()
            .filter(|((a, b), _)| *a == node || *b == node)
            .map(|(_, e)| e)
            .sum();
        gate + readout + link
    }

    fn place(&self, circuit: &Circuit) -> FxHashMap<u32, u32> {
        let mut nodes = self.architecture.nodes();
        nodes.sort_by(|&a, &b| {
            self.node_cost(a)
                .partial_cmp(&self.node_cost(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        assign_in_order(&by_interaction_count(circuit), &nodes)
    }
}

/// Circuit qubits ordered by how many multi-qubit ops touch them.
fn by_interaction_count(circuit: &Circuit) -> Vec<u32> {
    let mut counts: FxHashMap<u32, usize> = FxHashMap::default();
    for op in circuit.ops() {
        if op.qubits.len() > 1 {
            for &q in &op.qubits {
                *counts.entry(q).or_default() += 1;
            }
        }
    }
    let mut order: Vec<u32> = (0..circuit.n_qubits()).collect();
    order.sort_by_key(|q| std::cmp::Reverse(counts.get(q).copied().unwrap_or(0)));
    order
}

/// Zip circuit qubits onto candidate nodes; qubits beyond the node supply
/// keep their own index.
fn assign_in_order(qubit_order: &[u32], nodes: &[u32]) -> FxHashMap<u32, u32> {
    let mut map = FxHashMap::default();
    let mut nodes = nodes.iter().copied();
    for &q in qubit_order {
        match nodes.next() {
            Some(node) => map.insert(q, node),
            None => map.insert(q, q),
        };
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optype::OpType;

    fn line3() -> Architecture {
        Architecture::from_edges([(0, 1), (1, 2)])
    }

    #[test]
    fn test_line_placement_covers_all_qubits() {
        let mut circ = Circuit::new(3, 0);
        circ.add_gate(OpType::CX, vec![], vec![0, 2]).unwrap();

        let placement = Placement::Line(LinePlacement::new(line3()));
        let map = placement.place(&circ);
        assert_eq!(map.len(), 3);
        let mut targets: Vec<_> = map.values().copied().collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![0, 1, 2]);
    }

    #[test]
    fn test_graph_placement_prefers_connected_nodes() {
        // Star: node 1 is the hub.
        let arch = Architecture::from_edges([(1, 0), (1, 2)]);
        let mut circ = Circuit::new(2, 0);
        circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();
        circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();

        let placement = Placement::Graph(GraphPlacement::new(arch));
        let map = placement.place(&circ);
        // Qubit 0 interacts most, so it gets the hub.
        assert_eq!(map[&0], 1);
    }

    #[test]
    fn test_noise_aware_avoids_noisy_node() {
        let mut node_errors = FxHashMap::default();
        node_errors.insert(0u32, 0.5);
        node_errors.insert(1u32, 0.001);
        node_errors.insert(2u32, 0.001);

        let placement = Placement::NoiseAware(NoiseAwarePlacement::new(
            line3(),
            node_errors,
            FxHashMap::default(),
            FxHashMap::default(),
        ));

        let mut circ = Circuit::new(2, 0);
        circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();
        let map = placement.place(&circ);
        // Neither circuit qubit should land on the noisy node 0.
        assert_ne!(map[&0], 0);
        assert_ne!(map[&1], 0);
    }

    #[test]
    fn test_strategy_names() {
        let p = Placement::Line(LinePlacement::new(line3()));
        assert_eq!(p.strategy(), "Line");
        assert_eq!(p.architecture().n_nodes(), 3);
    }
}
