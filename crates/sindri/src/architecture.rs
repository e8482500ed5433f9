//! Qubit connectivity graphs.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// A device connectivity graph over qubit indices.
///
/// Edges are directed; an undirected interaction is represented by both
/// directions being present. Path queries treat the graph as undirected,
/// since a SWAP can always be synthesized against the grain at extra cost.
#[derive(Debug, Clone, Default)]
pub struct Architecture {
    graph: DiGraph<u32, ()>,
    index: FxHashMap<u32, NodeIndex>,
}

impl Architecture {
    /// Create an empty architecture with no nodes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an architecture from a directed edge list.
    pub fn from_edges(edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut arch = Self::default();
        for (a, b) in edges {
            let na = arch.intern(a);
            let nb = arch.intern(b);
            if !arch.graph.contains_edge(na, nb) {
                arch.graph.add_edge(na, nb, ());
            }
        }
        arch
    }

    fn intern(&mut self, node: u32) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(node, idx);
        idx
    }

    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges.
    pub fn n_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices, sorted ascending.
    pub fn nodes(&self) -> Vec<u32> {
        let mut nodes: Vec<_> = self.graph.node_weights().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Directed edges as qubit-index pairs.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
            .collect()
    }

    /// Check for a directed edge.
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&na), Some(&nb)) => self.graph.contains_edge(na, nb),
            _ => false,
        }
    }

    /// Check for an interaction in either direction.
    pub fn connected(&self, a: u32, b: u32) -> bool {
        self.has_edge(a, b) || self.has_edge(b, a)
    }

    /// Undirected neighbors of a node, sorted ascending.
    pub fn neighbors(&self, node: u32) -> Vec<u32> {
        let Some(&idx) = self.index.get(&node) else {
            return vec![];
        };
        let mut out: Vec<u32> = self
            .graph
            .neighbors_undirected(idx)
            .map(|n| self.graph[n])
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Shortest undirected path between two nodes, endpoints inclusive.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        if from == to {
            return self.index.contains_key(&from).then(|| vec![from]);
        }
        self.index.get(&from)?;
        self.index.get(&to)?;

        let mut prev: FxHashMap<u32, u32> = FxHashMap::default();
        let mut queue = VecDeque::from([from]);
        prev.insert(from, from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if prev.contains_key(&neighbor) {
                    continue;
                }
                prev.insert(neighbor, current);
                if neighbor == to {
                    let mut path = vec![to];
                    let mut node = to;
                    while node != from {
                        node = prev[&node];
                        path.push(node);
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(neighbor);
            }
        }
        None
    }
}
