//! Error types for the compilation framework.

use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A pass failed while transforming a circuit.
    #[error("Pass '{pass}' failed: {reason}")]
    PassFailed {
        /// Name of the failing pass.
        pass: String,
        /// What went wrong.
        reason: String,
    },

    /// IR-level failure while rebuilding a circuit.
    #[error("IR error: {0}")]
    Ir(#[from] bifrost_ir::IrError),
}

impl CompileError {
    /// Wrap an arbitrary pass failure with the pass name for context.
    pub fn pass_failed(pass: impl Into<String>, reason: impl ToString) -> Self {
        CompileError::PassFailed {
            pass: pass.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
