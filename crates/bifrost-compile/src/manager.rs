//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use bifrost_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::TransformationPass;

/// One entry in a pass pipeline: either a single pass or a nested group.
///
/// Groups exist so that an imported foreign pipeline keeps its shape — a
/// foreign sub-sequence becomes a nested group here, not a flattened run of
/// passes.
pub enum PassItem {
    /// A single transformation pass.
    Pass(Box<dyn TransformationPass>),
    /// An ordered group of nested items.
    Group(Vec<PassItem>),
}

impl PassItem {
    /// Flattened pass names, depth-first.
    pub fn flat_names(&self) -> Vec<String> {
        match self {
            PassItem::Pass(pass) => vec![pass.name().to_string()],
            PassItem::Group(items) => items.iter().flat_map(PassItem::flat_names).collect(),
        }
    }

    /// Maximum nesting depth below this item. A single pass has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            PassItem::Pass(_) => 0,
            PassItem::Group(items) => {
                1 + items.iter().map(PassItem::depth).max().unwrap_or(0)
            }
        }
    }

    fn run(&self, circuit: Circuit) -> CompileResult<Circuit> {
        match self {
            PassItem::Pass(pass) => {
                debug!("Running pass: {}", pass.name());
                pass.run(&circuit)
            }
            PassItem::Group(items) => {
                let mut current = circuit;
                for item in items {
                    current = item.run(current)?;
                }
                Ok(current)
            }
        }
    }
}

impl std::fmt::Debug for PassItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassItem::Pass(pass) => write!(f, "Pass({})", pass.name()),
            PassItem::Group(items) => f.debug_list().entries(items).finish(),
        }
    }
}

/// Manages and executes an ordered, possibly nested, list of passes.
#[derive(Default)]
pub struct PassManager {
    /// The pipeline, in order.
    items: Vec<PassItem>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { items: vec![] }
    }

    /// Append a single pass.
    pub fn append(&mut self, pass: impl TransformationPass + 'static) {
        self.items.push(PassItem::Pass(Box::new(pass)));
    }

    /// Append a pre-built item (pass or nested group).
    pub fn append_item(&mut self, item: PassItem) {
        self.items.push(item);
    }

    /// The pipeline structure, for introspection.
    pub fn items(&self) -> &[PassItem] {
        &self.items
    }

    /// Total number of passes, counting through groups.
    pub fn len(&self) -> usize {
        self.items.iter().map(|i| i.flat_names().len()).sum()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run all passes on the given circuit, returning the transformed value.
    #[instrument(skip(self, circuit))]
    pub fn run(&self, circuit: &Circuit) -> CompileResult<Circuit> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.len(),
            circuit.num_qubits()
        );

        let mut current = circuit.clone();
        for item in &self.items {
            current = item.run(current)?;
        }

        info!("Pass manager completed, ops: {}", current.num_ops());
        Ok(current)
    }
}

impl std::fmt::Debug for PassManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassManager")
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bifrost_ir::QubitId;

    struct Tag(&'static str);

    impl TransformationPass for Tag {
        fn name(&self) -> &str {
            self.0
        }

        fn run(&self, circuit: &Circuit) -> CompileResult<Circuit> {
            let mut out = circuit.clone();
            out.x(QubitId(0))?;
            Ok(out)
        }
    }

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);

        let circuit = Circuit::with_size("test", 1, 0);
        let out = pm.run(&circuit).unwrap();
        assert_eq!(out.num_ops(), 0);
    }

    #[test]
    fn test_run_preserves_input() {
        let mut pm = PassManager::new();
        pm.append(Tag("a"));

        let circuit = Circuit::with_size("test", 1, 0);
        let out = pm.run(&circuit).unwrap();
        assert_eq!(out.num_ops(), 1);
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_nested_groups_run_in_order() {
        let mut pm = PassManager::new();
        pm.append_item(PassItem::Pass(Box::new(Tag("a"))));
        pm.append_item(PassItem::Group(vec![
            PassItem::Pass(Box::new(Tag("b"))),
            PassItem::Group(vec![PassItem::Pass(Box::new(Tag("c")))]),
        ]));

        assert_eq!(pm.len(), 3);
        let names: Vec<_> = pm.items().iter().flat_map(PassItem::flat_names).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(pm.items()[1].depth(), 2);

        let out = pm.run(&Circuit::with_size("test", 1, 0)).unwrap();
        assert_eq!(out.num_ops(), 3);
    }
}
