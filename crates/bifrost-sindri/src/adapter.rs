//! Wrapping one Sindri pass behind the Bifrost pass interface.

use std::sync::Arc;

use tracing::debug;

use bifrost_compile::{CompileError, CompileResult, TransformationPass};
use bifrost_hal::Target;
use bifrost_ir::Circuit;
use sindri::{OpType, OptPass, Placement, Tk1Replacement};

use crate::convert;
use crate::error::{BridgeError, BridgeResult};
use crate::resolve::{Overrides, ParamValue, ResolvedArguments, resolve};
use crate::schema::PassId;

/// What to wrap: a pass to be built from resolved parameters, or an
/// already-constructed instance.
pub enum ForeignPassSpec {
    /// Construct the pass from its schema, overrides, and the target.
    Uninstantiated(PassId, Overrides),
    /// Wrap an existing instance directly; no resolution happens and the
    /// adapter's resolved-argument table stays empty.
    Instantiated(Arc<dyn OptPass>),
}

/// A Sindri pass exposed as a Bifrost [`TransformationPass`].
///
/// Immutable after construction. The adapter declares no required and no
/// preserved circuit properties: the wrapped optimizer is opaque to the
/// host's property tracking.
pub struct PassAdapter {
    name: String,
    inner: Arc<dyn OptPass>,
    args: ResolvedArguments,
}

impl std::fmt::Debug for PassAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassAdapter")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl PassAdapter {
    /// Construct an adapter from a pass spec and an optional target.
    ///
    /// All resolution and construction errors surface here, before the
    /// adapter ever sees a circuit.
    pub fn construct(spec: ForeignPassSpec, target: Option<&Target>) -> BridgeResult<Self> {
        match spec {
            ForeignPassSpec::Instantiated(inner) => Ok(Self::from_instance(inner)),
            ForeignPassSpec::Uninstantiated(id, overrides) => {
                let args = resolve(id, &overrides, target)?;
                let inner = build_pass(id, &args)?;
                Ok(Self {
                    name: id.name().to_string(),
                    inner,
                    args,
                })
            }
        }
    }

    /// Wrap an already-built Sindri pass.
    pub fn from_instance(inner: Arc<dyn OptPass>) -> Self {
        Self {
            name: inner.name().to_string(),
            inner,
            args: ResolvedArguments::empty(),
        }
    }

    /// The resolved constructor arguments, in schema order.
    pub fn arguments(&self) -> &ResolvedArguments {
        &self.args
    }

    /// Look up one resolved constructor argument by name.
    pub fn argument(&self, name: &str) -> BridgeResult<&ParamValue> {
        self.args.get(name).ok_or_else(|| BridgeError::ArgumentNotFound {
            pass: self.name.clone(),
            name: name.to_string(),
        })
    }
}

impl TransformationPass for PassAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, circuit: &Circuit) -> CompileResult<Circuit> {
        debug!("Running Sindri pass '{}' through the IR bridge", self.name);
        let fail = |e: BridgeError| CompileError::pass_failed(self.name.as_str(), e);
        let mut foreign = convert::to_sindri(circuit).map_err(fail)?;
        self.inner
            .apply(&mut foreign)
            .map_err(|e| CompileError::pass_failed(self.name.as_str(), e))?;
        convert::from_sindri(&foreign).map_err(fail)
    }
}

// ─── Positional construction from resolved arguments ────────────────────────

fn build_pass(id: PassId, args: &ResolvedArguments) -> BridgeResult<Arc<dyn OptPass>> {
    let pass: Arc<dyn OptPass> = match id {
        PassId::DecomposeBoxes => Arc::new(sindri::DecomposeBoxes::new()),
        PassId::Synthesise => Arc::new(sindri::Synthesise::new()),
        PassId::RemoveRedundancies => Arc::new(sindri::RemoveRedundancies::new()),
        PassId::FullPeephole => {
            Arc::new(sindri::FullPeephole::new(bool_arg(args, "allow_swaps", true)?))
        }
        PassId::CliffordSimp => {
            Arc::new(sindri::CliffordSimp::new(bool_arg(args, "allow_swaps", true)?))
        }
        PassId::SimplifyInitial => Arc::new(sindri::SimplifyInitial::new(
            bool_arg(args, "allow_classical", true)?,
            bool_arg(args, "create_all_qubits", false)?,
        )),
        PassId::KakDecomposition => Arc::new(sindri::KakDecomposition::new(
            optype_arg(args, "target_2qb_gate", OpType::CX)?,
            bool_arg(args, "allow_swaps", true)?,
            float_arg(args, "fidelity", 1.0)?,
        )),
        PassId::Rebase => {
            let gateset = match args.get("gateset") {
                Some(ParamValue::OpTypeSet(set)) => set.clone(),
                _ => return Err(missing(id, "gateset")),
            };
            let cx_replacement = match args.get("cx_replacement") {
                Some(ParamValue::Circuit(circuit)) => circuit.clone(),
                None => plain_cx(),
                Some(_) => return Err(missing(id, "cx_replacement")),
            };
            let tk1_replacement = match args.get("tk1_replacement") {
                Some(ParamValue::Tk1Replacement(repl)) => *repl,
                None => Tk1Replacement::U3,
                Some(_) => return Err(missing(id, "tk1_replacement")),
            };
            Arc::new(sindri::Rebase::new(gateset, cx_replacement, tk1_replacement))
        }
        PassId::PlacementPass => {
            Arc::new(sindri::PlacementPass::new(placement_arg(args, id, "placement")?))
        }
        PassId::Routing => {
            let architecture = match args.get("architecture") {
                Some(ParamValue::Architecture(arch)) => arch.clone(),
                _ => return Err(missing(id, "architecture")),
            };
            Arc::new(sindri::Routing::new(architecture))
        }
        PassId::DecomposeSwaps => {
            let replacement = match args.get("replacement_circuit") {
                Some(ParamValue::Circuit(circuit)) => circuit.clone(),
                _ => return Err(missing(id, "replacement_circuit")),
            };
            Arc::new(sindri::DecomposeSwaps::new(replacement))
        }
        PassId::CxMapping => {
            let architecture = match args.get("architecture") {
                Some(ParamValue::Architecture(arch)) => arch.clone(),
                _ => return Err(missing(id, "architecture")),
            };
            Arc::new(sindri::CxMapping::new(
                architecture,
                placement_arg(args, id, "placement")?,
                bool_arg(args, "directed_cx", false)?,
                bool_arg(args, "delay_measures", true)?,
            ))
        }
        PassId::PauliSimp => {
            let strategy = match args.get("strategy") {
                Some(ParamValue::SynthStrategy(s)) => *s,
                None => sindri::SynthStrategy::Sets,
                Some(_) => return Err(missing(id, "strategy")),
            };
            let cx_config = match args.get("cx_config") {
                Some(ParamValue::CxConfig(c)) => *c,
                None => sindri::CxConfig::Snake,
                Some(_) => return Err(missing(id, "cx_config")),
            };
            Arc::new(sindri::PauliSimp::new(strategy, cx_config))
        }
    };
    Ok(pass)
}

fn plain_cx() -> sindri::Circuit {
    let mut circ = sindri::Circuit::new(2, 0);
    circ.add_gate(OpType::CX, vec![], vec![0, 1])
        .expect("static CX circuit");
    circ
}

fn missing(id: PassId, param: &str) -> BridgeError {
    BridgeError::MissingArgument {
        pass: id.name().to_string(),
        param: param.to_string(),
    }
}

fn bool_arg(args: &ResolvedArguments, name: &'static str, default: bool) -> BridgeResult<bool> {
    match args.get(name) {
        None => Ok(default),
        Some(ParamValue::Bool(v)) => Ok(*v),
        Some(_) => Err(BridgeError::InvalidOverride {
            param: name.to_string(),
            expected: "a boolean",
        }),
    }
}

fn float_arg(args: &ResolvedArguments, name: &'static str, default: f64) -> BridgeResult<f64> {
    match args.get(name) {
        None => Ok(default),
        Some(ParamValue::Float(v)) => Ok(*v),
        Some(ParamValue::Int(v)) => Ok(*v as f64),
        Some(_) => Err(BridgeError::InvalidOverride {
            param: name.to_string(),
            expected: "a number",
        }),
    }
}

fn optype_arg(
    args: &ResolvedArguments,
    name: &'static str,
    default: OpType,
) -> BridgeResult<OpType> {
    match args.get(name) {
        None => Ok(default),
        Some(ParamValue::OpType(op)) => Ok(*op),
        Some(_) => Err(BridgeError::InvalidOverride {
            param: name.to_string(),
            expected: "a gate name",
        }),
    }
}

fn placement_arg(
    args: &ResolvedArguments,
    id: PassId,
    name: &'static str,
) -> BridgeResult<Placement> {
    match args.get(name) {
        Some(ParamValue::Placement(placement)) => Ok(placement.clone()),
        _ => Err(missing(id, name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::OverrideValue;
    use bifrost_ir::QubitId;

    fn cx_target() -> Target {
        Target::new("cxline", 3)
            .with_gates(["cx", "rz", "sx", "x"])
            .with_coupling(vec![(0, 1), (1, 0), (1, 2), (2, 1)])
    }

    #[test]
    fn test_decompose_swaps_end_to_end() {
        let adapter = PassAdapter::construct(
            ForeignPassSpec::Uninstantiated(PassId::DecomposeSwaps, Overrides::new()),
            Some(&cx_target()),
        )
        .unwrap();
        assert_eq!(adapter.name(), "DecomposeSwaps");

        let mut circuit = Circuit::with_size("swapper", 2, 0);
        circuit.swap(QubitId(0), QubitId(1)).unwrap();

        let out = adapter.run(&circuit).unwrap();
        assert_eq!(out.count_ops("swap"), 0);
        assert_eq!(out.count_ops("cx"), 3);
        // The input circuit is untouched.
        assert_eq!(circuit.count_ops("swap"), 1);
    }

    #[test]
    fn test_argument_introspection() {
        let adapter = PassAdapter::construct(
            ForeignPassSpec::Uninstantiated(PassId::Rebase, Overrides::new()),
            Some(&cx_target()),
        )
        .unwrap();

        assert!(matches!(
            adapter.argument("tk1_replacement").unwrap(),
            ParamValue::Tk1Replacement(Tk1Replacement::XSxRz)
        ));
        let err = adapter.argument("nonesuch").unwrap_err();
        assert!(matches!(err, BridgeError::ArgumentNotFound { .. }));
    }

    #[test]
    fn test_instantiated_pass_skips_resolution() {
        let adapter = PassAdapter::construct(
            ForeignPassSpec::Instantiated(Arc::new(sindri::RemoveRedundancies::new())),
            None,
        )
        .unwrap();
        assert_eq!(adapter.name(), "RemoveRedundancies");
        assert!(adapter.arguments().is_empty());
        assert!(adapter.requires().is_empty());
        assert!(adapter.preserves().is_empty());
        assert!(matches!(
            adapter.argument("anything").unwrap_err(),
            BridgeError::ArgumentNotFound { .. }
        ));

        let mut circuit = Circuit::with_size("hh", 1, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        let out = adapter.run(&circuit).unwrap();
        assert_eq!(out.num_ops(), 0);
    }

    #[test]
    fn test_missing_required_argument() {
        // Routing without a target and without an override has no
        // architecture to construct from.
        let err = PassAdapter::construct(
            ForeignPassSpec::Uninstantiated(PassId::Routing, Overrides::new()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::MissingArgument { .. }));
    }

    #[test]
    fn test_kak_overload_construction() {
        let overrides = Overrides::new()
            .set("fidelity", OverrideValue::Float(0.9))
            .set("allow_swaps", OverrideValue::Bool(false));
        let adapter = PassAdapter::construct(
            ForeignPassSpec::Uninstantiated(PassId::KakDecomposition, overrides),
            None,
        )
        .unwrap();
        assert!(matches!(
            adapter.argument("fidelity").unwrap(),
            ParamValue::Float(f) if (*f - 0.9).abs() < 1e-12
        ));
    }
}
