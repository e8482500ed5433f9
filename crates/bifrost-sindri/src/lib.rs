//! Bifrost ↔ Sindri pass interop.
//!
//! This crate lets Sindri optimization passes run as first-class stages in
//! the Bifrost pass manager. The pieces:
//!
//! - [`gates`]: canonicalization between the two gate-naming schemes
//! - [`convert`]: lossless circuit conversion, with unknown-gate expansion
//! - [`noise`]: placement noise estimates derived from target calibration
//! - [`schema`] / [`resolve`]: statically declared parameter schemas and
//!   type-directed resolution against overrides and a hardware target
//! - [`adapter`]: one Sindri pass behind the Bifrost pass interface
//! - [`pipeline`]: stage/level tables and the recursive sequence importer
//!
//! # Example: a SWAP decomposition stage
//!
//! ```rust
//! use bifrost_compile::TransformationPass;
//! use bifrost_hal::Target;
//! use bifrost_ir::{Circuit, QubitId};
//! use bifrost_sindri::{ForeignPassSpec, Overrides, PassAdapter, PassId};
//!
//! let target = Target::new("dev", 2)
//!     .with_gates(["cx", "rz", "sx", "x"])
//!     .with_coupling(vec![(0, 1), (1, 0)]);
//!
//! let adapter = PassAdapter::construct(
//!     ForeignPassSpec::Uninstantiated(PassId::DecomposeSwaps, Overrides::new()),
//!     Some(&target),
//! )
//! .unwrap();
//!
//! let mut circuit = Circuit::with_size("c", 2, 0);
//! circuit.swap(QubitId(0), QubitId(1)).unwrap();
//!
//! let compiled = adapter.run(&circuit).unwrap();
//! assert_eq!(compiled.count_ops("swap"), 0);
//! assert_eq!(compiled.count_ops("cx"), 3);
//! ```

pub mod adapter;
pub mod convert;
pub mod error;
pub mod gates;
pub mod noise;
pub mod pipeline;
pub mod resolve;
pub mod schema;
pub mod synth;

pub use adapter::{ForeignPassSpec, PassAdapter};
pub use convert::{from_sindri, to_sindri};
pub use error::{BridgeError, BridgeResult};
pub use gates::{canonicalize, gate_set_from_target, host_name};
pub use noise::NoiseEstimate;
pub use pipeline::{Stage, from_sequence, import_default_pipeline, stage_passes};
pub use resolve::{OverrideValue, Overrides, ParamValue, ResolvedArguments, resolve};
pub use schema::{ParamKind, ParamSpec, PassId};
