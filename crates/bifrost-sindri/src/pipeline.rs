//! Assembling Sindri passes into Bifrost pipelines.
//!
//! Two entry points: the five declared pipeline stages, each a fixed table
//! from optimization level to pass list, and the recursive importer that
//! mirrors a Sindri pass tree into a host pass structure of identical
//! shape.

use std::sync::Arc;

use tracing::info;

use bifrost_compile::{PassItem, PassManager};
use bifrost_hal::Target;
use sindri::OptPass;

use crate::adapter::{ForeignPassSpec, PassAdapter};
use crate::error::BridgeResult;
use crate::resolve::{OverrideValue, Overrides};
use crate::schema::PassId;

/// The five pipeline stages Bifrost schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Up-front normalization.
    Init,
    /// Initial qubit placement.
    Layout,
    /// Connectivity routing.
    Routing,
    /// Conversion to the target basis.
    Translation,
    /// Gate-count and depth reduction.
    Optimization,
}

impl Stage {
    /// The stage name used in pipeline configuration.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Layout => "layout",
            Stage::Routing => "routing",
            Stage::Translation => "translation",
            Stage::Optimization => "optimization",
        }
    }
}

/// Build the adapters for one stage at one optimization level (0–3).
///
/// The level-to-pass mapping is configuration, not algorithm; the tables
/// below are the whole policy. Levels above 3 clamp to 3.
pub fn stage_passes(stage: Stage, target: &Target, level: u8) -> BridgeResult<Vec<PassAdapter>> {
    let level = level.min(3);
    info!(
        "Assembling {} stage for '{}' at optimization level {}",
        stage.name(),
        target.name(),
        level
    );

    let mut specs: Vec<(PassId, Overrides)> = vec![];
    match stage {
        Stage::Init => {
            specs.push((PassId::DecomposeBoxes, Overrides::new()));
            match level {
                0 => specs.push((PassId::Rebase, Overrides::new())),
                1 | 2 => specs.push((PassId::Synthesise, Overrides::new())),
                _ => specs.push((PassId::FullPeephole, Overrides::new())),
            }
        }
        Stage::Layout => {
            let line = || Overrides::new().set("placement", OverrideValue::Str("Line".into()));
            specs.push((PassId::PlacementPass, line()));
            specs.push((PassId::DecomposeSwaps, Overrides::new()));
            specs.push((PassId::PlacementPass, line()));
        }
        Stage::Routing => {
            specs.push((PassId::Routing, Overrides::new()));
        }
        Stage::Translation => {
            specs.push((PassId::Rebase, Overrides::new()));
        }
        Stage::Optimization => {
            if level == 0 {
                return Ok(vec![]);
            }
            if level == 3 {
                specs.push((
                    PassId::KakDecomposition,
                    Overrides::new()
                        .set("target_2qb_gate", OverrideValue::Str("cx".into()))
                        .set("allow_swaps", OverrideValue::Bool(false)),
                ));
                specs.push((
                    PassId::CliffordSimp,
                    Overrides::new().set("allow_swaps", OverrideValue::Bool(false)),
                ));
                specs.push((
                    PassId::CxMapping,
                    Overrides::new()
                        .set("directed_cx", OverrideValue::Bool(false))
                        .set("delay_measures", OverrideValue::Bool(false)),
                ));
            }
            if level >= 2 {
                specs.push((PassId::Synthesise, Overrides::new()));
            }
            specs.push((PassId::Rebase, Overrides::new()));
            specs.push((PassId::RemoveRedundancies, Overrides::new()));
            if level >= 2 {
                specs.push((
                    PassId::SimplifyInitial,
                    Overrides::new()
                        .set("allow_classical", OverrideValue::Bool(false))
                        .set("create_all_qubits", OverrideValue::Bool(true)),
                ));
            }
        }
    }

    specs
        .into_iter()
        .map(|(id, overrides)| {
            PassAdapter::construct(ForeignPassSpec::Uninstantiated(id, overrides), Some(target))
        })
        .collect()
}

/// Mirror a Sindri pass tree into a host pass structure of the same shape.
///
/// A sequence composite becomes a nested [`PassItem::Group`]; anything else
/// becomes a leaf adapter. Order and nesting are preserved exactly, so the
/// host pipeline's reported structure is isomorphic to the foreign one.
pub fn from_sequence(pass: &Arc<dyn OptPass>) -> PassItem {
    match pass.sequence() {
        Some(children) => PassItem::Group(children.iter().map(from_sequence).collect()),
        None => PassItem::Pass(Box::new(PassAdapter::from_instance(Arc::clone(pass)))),
    }
}

/// Import Sindri's stock compilation sequence for a level as a host pass
/// manager, preserving its nested structure.
pub fn import_default_pipeline(level: u8) -> PassManager {
    info!("Importing Sindri default compilation pass at level {}", level);
    let root: Arc<dyn OptPass> = Arc::new(sindri::default_compilation_pass(level));
    let mut manager = PassManager::new();
    manager.append_item(from_sequence(&root));
    manager
}

#[cfg(test)]
mod tests {
    use super::*;
    use bifrost_compile::TransformationPass;

    fn cx_target() -> Target {
        Target::new("cxline", 3)
            .with_gates(["cx", "rz", "sx", "x"])
            .with_coupling(vec![(0, 1), (1, 0), (1, 2), (2, 1)])
    }

    fn names(passes: &[PassAdapter]) -> Vec<&str> {
        passes.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_init_stage_tables() {
        let target = cx_target();
        assert_eq!(
            names(&stage_passes(Stage::Init, &target, 0).unwrap()),
            ["DecomposeBoxes", "Rebase"]
        );
        assert_eq!(
            names(&stage_passes(Stage::Init, &target, 1).unwrap()),
            ["DecomposeBoxes", "Synthesise"]
        );
        assert_eq!(
            names(&stage_passes(Stage::Init, &target, 3).unwrap()),
            ["DecomposeBoxes", "FullPeephole"]
        );
    }

    #[test]
    fn test_layout_and_routing_stages() {
        let target = cx_target();
        assert_eq!(
            names(&stage_passes(Stage::Layout, &target, 1).unwrap()),
            ["PlacementPass", "DecomposeSwaps", "PlacementPass"]
        );
        assert_eq!(
            names(&stage_passes(Stage::Routing, &target, 1).unwrap()),
            ["Routing"]
        );
        assert_eq!(
            names(&stage_passes(Stage::Translation, &target, 1).unwrap()),
            ["Rebase"]
        );
    }

    #[test]
    fn test_optimization_stage_tables() {
        let target = cx_target();
        assert!(stage_passes(Stage::Optimization, &target, 0).unwrap().is_empty());
        assert_eq!(
            names(&stage_passes(Stage::Optimization, &target, 1).unwrap()),
            ["Rebase", "RemoveRedundancies"]
        );
        assert_eq!(
            names(&stage_passes(Stage::Optimization, &target, 2).unwrap()),
            ["Synthesise", "Rebase", "RemoveRedundancies", "SimplifyInitial"]
        );
        assert_eq!(
            names(&stage_passes(Stage::Optimization, &target, 3).unwrap()),
            [
                "KakDecomposition",
                "CliffordSimp",
                "CxMapping",
                "Synthesise",
                "Rebase",
                "RemoveRedundancies",
                "SimplifyInitial"
            ]
        );
    }

    #[test]
    fn test_levels_clamp_to_three() {
        let target = cx_target();
        assert_eq!(
            names(&stage_passes(Stage::Init, &target, 9).unwrap()),
            names(&stage_passes(Stage::Init, &target, 3).unwrap())
        );
    }

    #[test]
    fn test_import_preserves_nesting() {
        let manager = import_default_pipeline(2);
        let items = manager.items();
        assert_eq!(items.len(), 1);
        // Root sequence: [DecomposeBoxes, [Synthesise, RemoveRedundancies], FullPeephole]
        assert_eq!(
            items[0].flat_names(),
            [
                "DecomposeBoxes",
                "Synthesise",
                "RemoveRedundancies",
                "FullPeephole"
            ]
        );
        assert_eq!(items[0].depth(), 2);
    }
}
