//! Type-directed resolution of foreign pass parameters.
//!
//! For each parameter in a pass's schema, resolution consults the caller's
//! named overrides first and the hardware target second. An explicit
//! override always wins. A parameter with no override and nothing to derive
//! is omitted — the pass constructor's own default then applies — except
//! where the schema marks an argument the constructor cannot default.
//!
//! All failures here happen at construction time, before any circuit is
//! touched, and leave no partially-built argument list behind.

use rustc_hash::FxHashSet;

use bifrost_hal::Target;
use sindri::{
    Architecture, CxConfig, GraphPlacement, LinePlacement, NoiseAwarePlacement, OpType, Placement,
    SynthStrategy, Tk1Replacement,
};

use crate::convert;
use crate::error::{BridgeError, BridgeResult};
use crate::gates;
use crate::noise::NoiseEstimate;
use crate::schema::{ParamKind, ParamSpec, PassId};
use crate::synth;

/// A caller-supplied override value, before resolution.
#[derive(Debug, Clone)]
pub enum OverrideValue {
    /// A string: strategy names, gate names, enum values.
    Str(String),
    /// A list of strings: gate-name sets.
    StrList(Vec<String>),
    /// A boolean flag.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A raw edge list, built into an [`Architecture`].
    Edges(Vec<(u32, u32)>),
    /// A host circuit, converted through the IR bridge.
    Circuit(bifrost_ir::Circuit),
    /// Pre-canonicalized operation identifiers.
    OpTypes(Vec<OpType>),
    /// A pre-built architecture, passed through.
    Architecture(Architecture),
}

/// Named overrides for one pass construction.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: Vec<(String, OverrideValue)>,
}

impl Overrides {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override, builder style. A repeated name replaces the
    /// earlier value.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: OverrideValue) -> Self {
        let name = name.into();
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, value));
        self
    }

    /// Look up an override by name.
    pub fn get(&self, name: &str) -> Option<&OverrideValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// The override names, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Check if no overrides were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One resolved constructor argument.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ParamValue {
    /// A connectivity graph.
    Architecture(Architecture),
    /// A placement strategy instance.
    Placement(Placement),
    /// A Sindri circuit.
    Circuit(sindri::Circuit),
    /// An operation identifier.
    OpType(OpType),
    /// A set of operation identifiers.
    OpTypeSet(FxHashSet<OpType>),
    /// A synthesis strategy.
    SynthStrategy(SynthStrategy),
    /// A CX-ladder configuration.
    CxConfig(CxConfig),
    /// A TK1 realization.
    Tk1Replacement(Tk1Replacement),
    /// An opaque boolean.
    Bool(bool),
    /// An opaque integer.
    Int(i64),
    /// An opaque float.
    Float(f64),
    /// An opaque string.
    Str(String),
}

/// Constructor arguments in schema order, built once and consumed once.
#[derive(Debug, Default)]
pub struct ResolvedArguments {
    entries: Vec<(&'static str, ParamValue)>,
}

impl ResolvedArguments {
    /// An empty argument list (for directly wrapped pass instances).
    pub fn empty() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &'static str, value: ParamValue) {
        self.entries.push((name, value));
    }

    /// Look up an argument by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Argument names, in constructor order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    /// Number of resolved arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no arguments were resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve a pass's constructor arguments from overrides and an optional
/// hardware target.
pub fn resolve(
    pass: PassId,
    overrides: &Overrides,
    target: Option<&Target>,
) -> BridgeResult<ResolvedArguments> {
    let schema = select_schema(pass, overrides)?;
    let mut args = ResolvedArguments::default();
    for spec in schema {
        if let Some(value) = resolve_param(pass, spec, overrides.get(spec.name), target)? {
            args.push(spec.name, value);
        }
    }
    Ok(args)
}

/// Pick the first overload schema whose parameter names cover every
/// supplied override.
fn select_schema(pass: PassId, overrides: &Overrides) -> BridgeResult<&'static [ParamSpec]> {
    let names = overrides.names();
    pass.schemas()
        .iter()
        .copied()
        .find(|schema| {
            names
                .iter()
                .all(|name| schema.iter().any(|spec| spec.name == *name))
        })
        .ok_or_else(|| BridgeError::UnknownParameter {
            pass: pass.name().to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
        })
}

fn architecture_from_target(target: &Target) -> Architecture {
    Architecture::from_edges(target.coupling_edges().iter().copied())
}

fn resolve_param(
    pass: PassId,
    spec: &ParamSpec,
    over: Option<&OverrideValue>,
    target: Option<&Target>,
) -> BridgeResult<Option<ParamValue>> {
    match spec.kind {
        ParamKind::Architecture => match over {
            Some(OverrideValue::Edges(edges)) => Ok(Some(ParamValue::Architecture(
                Architecture::from_edges(edges.iter().copied()),
            ))),
            Some(OverrideValue::Architecture(arch)) => {
                Ok(Some(ParamValue::Architecture(arch.clone())))
            }
            Some(_) => Err(invalid(spec, "an edge list or architecture")),
            None => Ok(target.map(|t| ParamValue::Architecture(architecture_from_target(t)))),
        },

        ParamKind::Placement => resolve_placement(pass, spec, over, target),

        ParamKind::Circuit => match over {
            Some(OverrideValue::Circuit(circuit)) => {
                Ok(Some(ParamValue::Circuit(convert::to_sindri(circuit)?)))
            }
            Some(_) => Err(invalid(spec, "a circuit")),
            None => match target {
                Some(t) if pass == PassId::DecomposeSwaps && spec.name == "replacement_circuit" => {
                    Ok(Some(ParamValue::Circuit(synth::swap_replacement(t)?)))
                }
                Some(t) if pass == PassId::Rebase && spec.name == "cx_replacement" => {
                    Ok(Some(ParamValue::Circuit(synth::cnot_replacement(t)?)))
                }
                _ => Ok(None),
            },
        },

        ParamKind::OpType => match over {
            Some(OverrideValue::Str(name)) => {
                Ok(Some(ParamValue::OpType(gates::canonicalize(name)?)))
            }
            Some(_) => Err(invalid(spec, "a gate name")),
            None => Ok(None),
        },

        ParamKind::OpTypeSet => match over {
            Some(OverrideValue::StrList(names)) => {
                let set = names
                    .iter()
                    .map(|n| gates::canonicalize(n))
                    .collect::<BridgeResult<FxHashSet<_>>>()?;
                Ok(Some(ParamValue::OpTypeSet(set)))
            }
            Some(OverrideValue::OpTypes(ops)) => {
                Ok(Some(ParamValue::OpTypeSet(ops.iter().copied().collect())))
            }
            Some(_) => Err(invalid(spec, "a list of gate names")),
            None => match target {
                Some(t) if pass == PassId::Rebase && spec.name == "gateset" => Ok(Some(
                    ParamValue::OpTypeSet(gates::gate_set_from_target(t)?),
                )),
                _ => Ok(None),
            },
        },

        ParamKind::SynthStrategy => match over {
            Some(OverrideValue::Str(name)) => {
                let strategy = match name.as_str() {
                    "Individual" => SynthStrategy::Individual,
                    "Pairwise" => SynthStrategy::Pairwise,
                    "Sets" => SynthStrategy::Sets,
                    other => return Err(unsupported(spec, other)),
                };
                Ok(Some(ParamValue::SynthStrategy(strategy)))
            }
            Some(_) => Err(invalid(spec, "a strategy name string")),
            None => Ok(None),
        },

        ParamKind::CxConfig => match over {
            Some(OverrideValue::Str(name)) => {
                let config = match name.as_str() {
                    "Snake" => CxConfig::Snake,
                    "Star" => CxConfig::Star,
                    "Tree" => CxConfig::Tree,
                    "MultiQGate" => CxConfig::MultiQGate,
                    other => return Err(unsupported(spec, other)),
                };
                Ok(Some(ParamValue::CxConfig(config)))
            }
            Some(_) => Err(invalid(spec, "a configuration name string")),
            None => Ok(None),
        },

        ParamKind::Tk1Replacement => match over {
            Some(OverrideValue::Str(name)) => {
                let replacement = match name.as_str() {
                    "XSxRz" => Tk1Replacement::XSxRz,
                    "U3" => Tk1Replacement::U3,
                    other => return Err(unsupported(spec, other)),
                };
                Ok(Some(ParamValue::Tk1Replacement(replacement)))
            }
            Some(_) => Err(invalid(spec, "a replacement name string")),
            None => {
                let replacement = match target {
                    Some(t)
                        if ["x", "sx", "rz"].iter().all(|g| t.supports_gate(g)) =>
                    {
                        Tk1Replacement::XSxRz
                    }
                    _ => Tk1Replacement::U3,
                };
                Ok(Some(ParamValue::Tk1Replacement(replacement)))
            }
        },

        ParamKind::Opaque => match over {
            Some(OverrideValue::Bool(v)) => Ok(Some(ParamValue::Bool(*v))),
            Some(OverrideValue::Int(v)) => Ok(Some(ParamValue::Int(*v))),
            Some(OverrideValue::Float(v)) => Ok(Some(ParamValue::Float(*v))),
            Some(OverrideValue::Str(v)) => Ok(Some(ParamValue::Str(v.clone()))),
            Some(_) => Err(invalid(spec, "a scalar value")),
            None => Ok(None),
        },
    }
}

fn resolve_placement(
    pass: PassId,
    spec: &ParamSpec,
    over: Option<&OverrideValue>,
    target: Option<&Target>,
) -> BridgeResult<Option<ParamValue>> {
    let explicit = match over {
        None => None,
        Some(OverrideValue::Str(name)) => Some(name.as_str()),
        Some(_) => return Err(invalid(spec, "a strategy name string")),
    };

    let Some(target) = target else {
        return match explicit {
            // An explicit override must not be silently dropped.
            Some(_) => Err(BridgeError::TargetRequired {
                pass: pass.name().to_string(),
                param: spec.name.to_string(),
            }),
            None => Ok(None),
        };
    };

    // Default strategy: noise-aware when the target is characterized,
    // otherwise fall back to a strategy that needs no calibration.
    let strategy = explicit.unwrap_or(if target.has_calibration() {
        "NoiseAware"
    } else {
        "Graph"
    });

    let arch = architecture_from_target(target);
    let placement = match strategy {
        "Graph" => Placement::Graph(GraphPlacement::new(arch)),
        "Line" => Placement::Line(LinePlacement::new(arch)),
        "NoiseAware" => {
            let estimate = NoiseEstimate::from_target(target)?;
            let readout = estimate.mean_readout();
            Placement::NoiseAware(NoiseAwarePlacement::new(
                arch,
                estimate.node_errors,
                estimate.link_errors,
                readout,
            ))
        }
        other => return Err(BridgeError::UnsupportedPlacement(other.to_string())),
    };
    Ok(Some(ParamValue::Placement(placement)))
}

fn invalid(spec: &ParamSpec, expected: &'static str) -> BridgeError {
    BridgeError::InvalidOverride {
        param: spec.name.to_string(),
        expected,
    }
}

fn unsupported(spec: &ParamSpec, value: &str) -> BridgeError {
    BridgeError::UnsupportedOption {
        param: spec.name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bifrost_hal::Calibration;
    use bifrost_ir::QubitId;

    fn line_target() -> Target {
        Target::new("line3", 3)
            .with_gates(["cx", "rz", "sx", "x"])
            .with_coupling(vec![(0, 1), (1, 0), (1, 2), (2, 1)])
    }

    #[test]
    fn test_architecture_derived_from_target() {
        let args = resolve(PassId::Routing, &Overrides::new(), Some(&line_target())).unwrap();
        let Some(ParamValue::Architecture(arch)) = args.get("architecture") else {
            panic!("expected a derived architecture");
        };
        assert_eq!(arch.nodes(), vec![0, 1, 2]);
        assert_eq!(arch.n_edges(), 4);
    }

    #[test]
    fn test_architecture_override_beats_target() {
        let overrides =
            Overrides::new().set("architecture", OverrideValue::Edges(vec![(5, 6)]));
        let args = resolve(PassId::Routing, &overrides, Some(&line_target())).unwrap();
        let Some(ParamValue::Architecture(arch)) = args.get("architecture") else {
            panic!("expected the override architecture");
        };
        assert_eq!(arch.nodes(), vec![5, 6]);
    }

    #[test]
    fn test_architecture_omitted_without_target() {
        let args = resolve(PassId::Routing, &Overrides::new(), None).unwrap();
        assert!(args.get("architecture").is_none());
        assert!(args.is_empty());
    }

    #[test]
    fn test_placement_line_override() {
        let overrides = Overrides::new().set("placement", OverrideValue::Str("Line".into()));
        let args = resolve(PassId::PlacementPass, &overrides, Some(&line_target())).unwrap();
        let Some(ParamValue::Placement(placement)) = args.get("placement") else {
            panic!("expected a placement");
        };
        assert_eq!(placement.strategy(), "Line");
    }

    #[test]
    fn test_placement_unknown_strategy_rejected() {
        let overrides = Overrides::new().set("placement", OverrideValue::Str("Simulated".into()));
        let err = resolve(PassId::PlacementPass, &overrides, Some(&line_target())).unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedPlacement(_)));
    }

    #[test]
    fn test_placement_override_without_target_fails() {
        let overrides = Overrides::new().set("placement", OverrideValue::Str("Graph".into()));
        let err = resolve(PassId::PlacementPass, &overrides, None).unwrap_err();
        assert!(matches!(err, BridgeError::TargetRequired { .. }));
    }

    #[test]
    fn test_noise_aware_requires_calibration() {
        let overrides =
            Overrides::new().set("placement", OverrideValue::Str("NoiseAware".into()));
        let err = resolve(PassId::PlacementPass, &overrides, Some(&line_target())).unwrap_err();
        assert!(matches!(err, BridgeError::NoCalibrationData(_)));

        // Graph and Line succeed on the same uncalibrated target.
        for strategy in ["Graph", "Line"] {
            let overrides =
                Overrides::new().set("placement", OverrideValue::Str(strategy.into()));
            assert!(resolve(PassId::PlacementPass, &overrides, Some(&line_target())).is_ok());
        }
    }

    #[test]
    fn test_default_placement_prefers_noise_aware_when_calibrated() {
        let target = line_target().with_calibration(
            Calibration::new()
                .with_gate_error("cx", [0, 1], 0.01)
                .with_readout_error(0, 0.02),
        );
        let args = resolve(PassId::PlacementPass, &Overrides::new(), Some(&target)).unwrap();
        let Some(ParamValue::Placement(placement)) = args.get("placement") else {
            panic!("expected a placement");
        };
        assert_eq!(placement.strategy(), "NoiseAware");

        // Uncalibrated target: the default falls back.
        let args =
            resolve(PassId::PlacementPass, &Overrides::new(), Some(&line_target())).unwrap();
        let Some(ParamValue::Placement(placement)) = args.get("placement") else {
            panic!("expected a placement");
        };
        assert_eq!(placement.strategy(), "Graph");
    }

    #[test]
    fn test_circuit_override_beats_synthesis() {
        let mut host = bifrost_ir::Circuit::with_size("custom", 2, 0);
        host.cz(QubitId(0), QubitId(1)).unwrap();
        let overrides =
            Overrides::new().set("replacement_circuit", OverrideValue::Circuit(host));
        let args = resolve(PassId::DecomposeSwaps, &overrides, Some(&line_target())).unwrap();
        let Some(ParamValue::Circuit(circ)) = args.get("replacement_circuit") else {
            panic!("expected a circuit");
        };
        assert_eq!(circ.count(sindri::OpType::CZ), 1);
    }

    #[test]
    fn test_swap_replacement_synthesized_from_target() {
        let args = resolve(PassId::DecomposeSwaps, &Overrides::new(), Some(&line_target())).unwrap();
        let Some(ParamValue::Circuit(circ)) = args.get("replacement_circuit") else {
            panic!("expected a synthesized circuit");
        };
        assert_eq!(circ.count(sindri::OpType::CX), 3);
    }

    #[test]
    fn test_gateset_derived_only_for_rebase() {
        let args = resolve(PassId::Rebase, &Overrides::new(), Some(&line_target())).unwrap();
        let Some(ParamValue::OpTypeSet(set)) = args.get("gateset") else {
            panic!("expected a derived gate set");
        };
        assert_eq!(set.len(), 4);
        assert!(set.contains(&OpType::CX));
    }

    #[test]
    fn test_gateset_override_canonicalizes_names() {
        let overrides = Overrides::new().set(
            "gateset",
            OverrideValue::StrList(vec!["cz".into(), "u".into(), "rxx".into()]),
        );
        let args = resolve(PassId::Rebase, &overrides, Some(&line_target())).unwrap();
        let Some(ParamValue::OpTypeSet(set)) = args.get("gateset") else {
            panic!("expected a gate set");
        };
        assert!(set.contains(&OpType::CZ));
        assert!(set.contains(&OpType::U3));
        assert!(set.contains(&OpType::XXPhase));
    }

    #[test]
    fn test_tk1_replacement_follows_target_basis() {
        let args = resolve(PassId::Rebase, &Overrides::new(), Some(&line_target())).unwrap();
        assert!(matches!(
            args.get("tk1_replacement"),
            Some(ParamValue::Tk1Replacement(Tk1Replacement::XSxRz))
        ));

        let u_target = Target::new("u3dev", 2).with_gates(["u", "cx"]);
        let args = resolve(PassId::Rebase, &Overrides::new(), Some(&u_target)).unwrap();
        assert!(matches!(
            args.get("tk1_replacement"),
            Some(ParamValue::Tk1Replacement(Tk1Replacement::U3))
        ));

        // No target at all still resolves, to the generic fallback.
        let args = resolve(PassId::Rebase, &Overrides::new(), None).unwrap();
        assert!(matches!(
            args.get("tk1_replacement"),
            Some(ParamValue::Tk1Replacement(Tk1Replacement::U3))
        ));
    }

    #[test]
    fn test_strategy_tables_are_closed() {
        let overrides = Overrides::new().set("strategy", OverrideValue::Str("Sets".into()));
        let args = resolve(PassId::PauliSimp, &overrides, None).unwrap();
        assert!(matches!(
            args.get("strategy"),
            Some(ParamValue::SynthStrategy(SynthStrategy::Sets))
        ));

        let overrides = Overrides::new().set("strategy", OverrideValue::Str("Greedy".into()));
        let err = resolve(PassId::PauliSimp, &overrides, None).unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedOption { .. }));

        let overrides = Overrides::new().set("cx_config", OverrideValue::Str("Helix".into()));
        let err = resolve(PassId::PauliSimp, &overrides, None).unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedOption { .. }));
    }

    #[test]
    fn test_overload_selection_by_argument_names() {
        let overrides = Overrides::new()
            .set("fidelity", OverrideValue::Float(0.98))
            .set("allow_swaps", OverrideValue::Bool(false));
        let args = resolve(PassId::KakDecomposition, &overrides, None).unwrap();
        assert_eq!(args.names(), ["fidelity", "allow_swaps"]);

        let overrides = Overrides::new().set("target_2qb_gate", OverrideValue::Str("cx".into()));
        let args = resolve(PassId::KakDecomposition, &overrides, None).unwrap();
        assert_eq!(args.names(), ["target_2qb_gate"]);
        assert!(matches!(
            args.get("target_2qb_gate"),
            Some(ParamValue::OpType(OpType::CX))
        ));
    }

    #[test]
    fn test_unknown_override_name_rejected() {
        let overrides = Overrides::new().set("jitter", OverrideValue::Bool(true));
        let err = resolve(PassId::Synthesise, &overrides, None).unwrap_err();
        assert!(matches!(err, BridgeError::UnknownParameter { .. }));
    }

    #[test]
    fn test_resolution_order_matches_schema() {
        let target = line_target();
        let args = resolve(PassId::Rebase, &Overrides::new(), Some(&target)).unwrap();
        assert_eq!(args.names(), ["gateset", "cx_replacement", "tk1_replacement"]);
    }
}
