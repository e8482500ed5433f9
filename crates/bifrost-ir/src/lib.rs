//! Bifrost Circuit Intermediate Representation
//!
//! Core data structures for representing quantum circuits in Bifrost.
//! Circuits are ordered instruction lists over indexed qubits and classical
//! bits; the compilation stack and the Sindri interop layer both consume
//! this representation.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use bifrost_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 4);
//! ```

pub mod bit;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;

pub use bit::{ClbitId, QubitId};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
