//! Error types for the Sindri library.

use crate::optype::OpType;
use thiserror::Error;

/// Errors that can occur in Sindri operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SindriError {
    /// Qubit index outside the circuit.
    #[error("Qubit {qubit} out of range for circuit with {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the circuit.
        n_qubits: u32,
    },

    /// Bit index outside the circuit.
    #[error("Bit {bit} out of range for circuit with {n_bits} bits")]
    BitOutOfRange {
        /// The offending bit index.
        bit: u32,
        /// Number of bits in the circuit.
        n_bits: u32,
    },

    /// Operation applied to the wrong number of qubits.
    #[error("{op:?} takes {expected} qubits, got {got}")]
    ArityMismatch {
        /// The operation.
        op: OpType,
        /// Expected qubit count.
        expected: u32,
        /// Actual qubit count.
        got: u32,
    },

    /// Operation given the wrong number of parameters.
    #[error("{op:?} takes {expected} parameters, got {got}")]
    ParamCountMismatch {
        /// The operation.
        op: OpType,
        /// Expected parameter count.
        expected: u32,
        /// Actual parameter count.
        got: u32,
    },

    /// Rebase found an operation it cannot express over the requested
    /// gate set.
    #[error("Cannot rebase {op:?} into the requested gate set")]
    CannotRebase {
        /// The operation that resisted rebasing.
        op: OpType,
    },

    /// Routing could not connect two qubits on the architecture.
    #[error("No path between qubits {a} and {b} on the architecture")]
    RoutingFailed {
        /// First qubit.
        a: u32,
        /// Second qubit.
        b: u32,
    },

    /// A circuit-box operation is malformed.
    #[error("Invalid circuit box: {0}")]
    InvalidCircBox(String),
}

/// Result type for Sindri operations.
pub type SindriResult<T> = Result<T, SindriError>;
