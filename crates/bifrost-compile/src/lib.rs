//! Bifrost Compilation Pass Framework
//!
//! The pass-based architecture that transforms circuits toward hardware.
//! A [`TransformationPass`] takes a circuit value and returns a new one;
//! the [`PassManager`] executes an ordered, possibly nested, list of passes.
//! Nesting is structural: a group of passes runs exactly like a flat list,
//! but the reported pipeline shape preserves where each pass came from —
//! adapters importing foreign pass trees rely on that.
//!
//! # Example
//!
//! ```rust
//! use bifrost_compile::{CompileResult, PassManager, TransformationPass};
//! use bifrost_ir::Circuit;
//!
//! struct Identity;
//!
//! impl TransformationPass for Identity {
//!     fn name(&self) -> &str {
//!         "identity"
//!     }
//!
//!     fn run(&self, circuit: &Circuit) -> CompileResult<Circuit> {
//!         Ok(circuit.clone())
//!     }
//! }
//!
//! let mut pm = PassManager::new();
//! pm.append(Identity);
//! let out = pm.run(&Circuit::with_size("c", 1, 0)).unwrap();
//! assert_eq!(out.num_ops(), 0);
//! ```

pub mod error;
pub mod manager;
pub mod pass;

pub use error::{CompileError, CompileResult};
pub use manager::{PassItem, PassManager};
pub use pass::{CircuitProperty, TransformationPass};
