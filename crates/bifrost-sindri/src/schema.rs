//! Static parameter schemas for the Sindri passes the bridge can build.
//!
//! Every constructible pass is an entry in the closed [`PassId`] enum, and
//! each carries one or more statically declared overload schemas: the
//! ordered constructor parameters with their type tags. Resolution walks a
//! schema in order, so resolved arguments always line up with positional
//! construction.

/// The type tag of one foreign constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParamKind {
    /// A connectivity graph.
    Architecture,
    /// A placement strategy.
    Placement,
    /// A circuit value.
    Circuit,
    /// A single operation identifier.
    OpType,
    /// A set of operation identifiers.
    OpTypeSet,
    /// A Pauli synthesis strategy.
    SynthStrategy,
    /// A CX-ladder configuration.
    CxConfig,
    /// A TK1 realization choice.
    Tk1Replacement,
    /// Passed through untouched; never derived from a target.
    Opaque,
}

/// One constructor parameter: name plus type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name, as the foreign constructor documents it.
    pub name: &'static str,
    /// Type tag driving resolution.
    pub kind: ParamKind,
}

const fn param(name: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec { name, kind }
}

const NO_PARAMS: &[ParamSpec] = &[];

const REBASE: &[ParamSpec] = &[
    param("gateset", ParamKind::OpTypeSet),
    param("cx_replacement", ParamKind::Circuit),
    param("tk1_replacement", ParamKind::Tk1Replacement),
];

const FULL_PEEPHOLE: &[ParamSpec] = &[param("allow_swaps", ParamKind::Opaque)];

const PLACEMENT_PASS: &[ParamSpec] = &[param("placement", ParamKind::Placement)];

const ROUTING: &[ParamSpec] = &[param("architecture", ParamKind::Architecture)];

const DECOMPOSE_SWAPS: &[ParamSpec] = &[param("replacement_circuit", ParamKind::Circuit)];

// KakDecomposition is overloaded: by target gate, or by fidelity threshold.
const KAK_BY_GATE: &[ParamSpec] = &[
    param("target_2qb_gate", ParamKind::OpType),
    param("allow_swaps", ParamKind::Opaque),
];
const KAK_BY_FIDELITY: &[ParamSpec] = &[
    param("fidelity", ParamKind::Opaque),
    param("allow_swaps", ParamKind::Opaque),
];

const CLIFFORD_SIMP: &[ParamSpec] = &[param("allow_swaps", ParamKind::Opaque)];

const SIMPLIFY_INITIAL: &[ParamSpec] = &[
    param("allow_classical", ParamKind::Opaque),
    param("create_all_qubits", ParamKind::Opaque),
];

const CX_MAPPING: &[ParamSpec] = &[
    param("architecture", ParamKind::Architecture),
    param("placement", ParamKind::Placement),
    param("directed_cx", ParamKind::Opaque),
    param("delay_measures", ParamKind::Opaque),
];

const PAULI_SIMP: &[ParamSpec] = &[
    param("strategy", ParamKind::SynthStrategy),
    param("cx_config", ParamKind::CxConfig),
];

/// The Sindri passes the bridge knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PassId {
    /// Inline boxed sub-circuits.
    DecomposeBoxes,
    /// Rewrite over a gate set.
    Rebase,
    /// Rotation merging and cleanup.
    Synthesise,
    /// The full peephole suite.
    FullPeephole,
    /// Initial qubit placement.
    PlacementPass,
    /// Connectivity routing.
    Routing,
    /// SWAP realization.
    DecomposeSwaps,
    /// Two-qubit block resynthesis.
    KakDecomposition,
    /// Clifford-subset simplification.
    CliffordSimp,
    /// Gate/inverse cancellation.
    RemoveRedundancies,
    /// Initial-state simplification.
    SimplifyInitial,
    /// Combined place-route-decompose mapping.
    CxMapping,
    /// Pauli-string resynthesis.
    PauliSimp,
}

impl PassId {
    /// The pass name, matching the Sindri pass's own identifier.
    pub fn name(self) -> &'static str {
        match self {
            PassId::DecomposeBoxes => "DecomposeBoxes",
            PassId::Rebase => "Rebase",
            PassId::Synthesise => "Synthesise",
            PassId::FullPeephole => "FullPeephole",
            PassId::PlacementPass => "PlacementPass",
            PassId::Routing => "Routing",
            PassId::DecomposeSwaps => "DecomposeSwaps",
            PassId::KakDecomposition => "KakDecomposition",
            PassId::CliffordSimp => "CliffordSimp",
            PassId::RemoveRedundancies => "RemoveRedundancies",
            PassId::SimplifyInitial => "SimplifyInitial",
            PassId::CxMapping => "CxMapping",
            PassId::PauliSimp => "PauliSimp",
        }
    }

    /// The overload schemas for this pass, in declaration order.
    ///
    /// Most passes have exactly one. Overload selection picks the first
    /// schema whose parameter names cover every supplied override.
    pub fn schemas(self) -> &'static [&'static [ParamSpec]] {
        match self {
            PassId::DecomposeBoxes
            | PassId::Synthesise
            | PassId::RemoveRedundancies => &[NO_PARAMS],
            PassId::Rebase => &[REBASE],
            PassId::FullPeephole => &[FULL_PEEPHOLE],
            PassId::PlacementPass => &[PLACEMENT_PASS],
            PassId::Routing => &[ROUTING],
            PassId::DecomposeSwaps => &[DECOMPOSE_SWAPS],
            PassId::KakDecomposition => &[KAK_BY_GATE, KAK_BY_FIDELITY],
            PassId::CliffordSimp => &[CLIFFORD_SIMP],
            PassId::SimplifyInitial => &[SIMPLIFY_INITIAL],
            PassId::CxMapping => &[CX_MAPPING],
            PassId::PauliSimp => &[PAULI_SIMP],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_is_constructor_order() {
        let schema = PassId::Rebase.schemas()[0];
        let names: Vec<_> = schema.iter().map(|p| p.name).collect();
        assert_eq!(names, ["gateset", "cx_replacement", "tk1_replacement"]);
    }

    #[test]
    fn test_kak_has_two_overloads() {
        let schemas = PassId::KakDecomposition.schemas();
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0][0].name, "target_2qb_gate");
        assert_eq!(schemas[1][0].name, "fidelity");
    }

    #[test]
    fn test_parameterless_passes() {
        assert!(PassId::Synthesise.schemas()[0].is_empty());
        assert!(PassId::DecomposeBoxes.schemas()[0].is_empty());
    }
}
