//! Bifrost Hardware Abstraction
//!
//! Read-only descriptions of quantum hardware targets: qubit count,
//! connectivity, supported gates, and optional calibration data. The
//! compilation stack borrows a [`Target`] to derive connectivity graphs,
//! gate sets, and noise-aware placement inputs; nothing here mutates.

pub mod target;

pub use target::{Calibration, GateErrorSample, Target};
