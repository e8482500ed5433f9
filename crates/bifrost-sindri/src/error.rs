//! Error types for the interop layer.
//!
//! Everything except conversion failures is raised at adapter construction
//! time, before any pass runs. Conversion failures surface from
//! `PassAdapter::run` on the circuit that triggered them.

use thiserror::Error;

/// Errors raised by the Bifrost ↔ Sindri interop layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// A gate name exists in neither naming scheme.
    #[error("Unknown gate name '{0}'")]
    UnknownGate(String),

    /// An operation survives decomposition but still has no Sindri
    /// equivalent.
    #[error("Operation '{0}' has no Sindri equivalent")]
    UnrepresentableOperation(String),

    /// A placement override named a strategy outside the fixed set.
    #[error("Unsupported placement strategy '{0}' (expected Graph, Line, or NoiseAware)")]
    UnsupportedPlacement(String),

    /// An enum-valued override named a value outside the fixed set.
    #[error("Unsupported value '{value}' for parameter '{param}'")]
    UnsupportedOption {
        /// The parameter being resolved.
        param: String,
        /// The rejected value.
        value: String,
    },

    /// Noise-aware placement was requested on a target without calibration.
    #[error("Target '{0}' has no calibration data; noise-aware placement is unavailable")]
    NoCalibrationData(String),

    /// Introspection asked for an argument that was never resolved.
    #[error("Pass '{pass}' has no resolved argument named '{name}'")]
    ArgumentNotFound {
        /// The adapter's pass name.
        pass: String,
        /// The queried argument name.
        name: String,
    },

    /// An override named a parameter that appears in no overload schema.
    #[error("Pass '{pass}' has no parameter set matching overrides {names:?}")]
    UnknownParameter {
        /// The pass being constructed.
        pass: String,
        /// The override names that failed to match.
        names: Vec<String>,
    },

    /// A parameter can only be resolved against a hardware target, and none
    /// was supplied.
    #[error("Parameter '{param}' of pass '{pass}' requires a hardware target")]
    TargetRequired {
        /// The pass being constructed.
        pass: String,
        /// The parameter that needed a target.
        param: String,
    },

    /// A required constructor argument could not be resolved or derived.
    #[error("Pass '{pass}' is missing required argument '{param}'")]
    MissingArgument {
        /// The pass being constructed.
        pass: String,
        /// The unresolvable parameter.
        param: String,
    },

    /// An override value has the wrong shape for its parameter.
    #[error("Override for '{param}' has the wrong type (expected {expected})")]
    InvalidOverride {
        /// The parameter being resolved.
        param: String,
        /// What the parameter's type tag accepts.
        expected: &'static str,
    },

    /// IR-level failure during conversion.
    #[error("IR error: {0}")]
    Ir(#[from] bifrost_ir::IrError),

    /// Failure inside the Sindri library.
    #[error("Sindri error: {0}")]
    Sindri(#[from] sindri::SindriError),
}

/// Result type for interop operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
