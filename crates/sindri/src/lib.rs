//! Sindri Circuit Optimization Library
//!
//! Sindri rewrites quantum circuits: gate-set rebasing, peephole
//! optimisation, initial placement, and connectivity routing, all exposed as
//! composable [`OptPass`] transforms over the Sindri [`Circuit`] value.
//!
//! Conventions:
//! - rotation parameters are **half-turns** (a parameter of 1.0 is π radians);
//! - qubits and classical bits are flat indices;
//! - the canonical single-qubit form is `TK1(α, β, γ) = Rz(α)·Rx(β)·Rz(γ)`.
//!
//! # Example
//!
//! ```rust
//! use sindri::{Circuit, OpType, OptPass, RemoveRedundancies};
//!
//! let mut circ = Circuit::new(2, 0);
//! circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();
//! circ.add_gate(OpType::CX, vec![], vec![0, 1]).unwrap();
//!
//! RemoveRedundancies::new().apply(&mut circ).unwrap();
//! assert_eq!(circ.n_ops(), 0);
//! ```

pub mod architecture;
pub mod circuit;
pub mod decompose;
pub mod error;
pub mod optype;
pub mod passes;
pub mod placement;

pub use architecture::Architecture;
pub use circuit::{Circuit, Condition, Op};
pub use decompose::{Tk1Replacement, tk1_angles};
pub use error::{SindriError, SindriResult};
pub use optype::{ALL_OPTYPES, OpType};
pub use passes::optimisation::{CxConfig, SynthStrategy};
pub use passes::{
    CliffordSimp, CxMapping, DecomposeBoxes, DecomposeSwaps, FullPeephole, KakDecomposition,
    OptPass, PauliSimp, PlacementPass, Rebase, RemoveRedundancies, Routing, SequencePass,
    SimplifyInitial, Synthesise, default_compilation_pass,
};
pub use placement::{GraphPlacement, LinePlacement, NoiseAwarePlacement, Placement};
