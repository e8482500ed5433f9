//! Hardware target descriptions.
//!
//! A [`Target`] is an immutable snapshot of what a device offers: qubit
//! count, directed coupling edges, supported gate names, and optional
//! calibration data. Edge direction is meaningful — the absence of the
//! reverse edge means the interaction only runs one way natively.
//!
//! A target without a coupling map reports no edges; whether that means
//! "fully connected" is the caller's decision, not this module's.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One calibrated gate-error sample: a gate on a specific qubit tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateErrorSample {
    /// Gate name (host spelling, lowercase).
    pub gate: String,
    /// The qubit tuple the sample was measured on.
    pub qubits: Vec<u32>,
    /// Error probability in `[0, 1]`.
    pub error: f64,
}

impl GateErrorSample {
    /// Create a new sample.
    pub fn new(gate: impl Into<String>, qubits: impl Into<Vec<u32>>, error: f64) -> Self {
        Self {
            gate: gate.into(),
            qubits: qubits.into(),
            error,
        }
    }
}

/// Device characterization data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Gate-error samples, one per (gate, qubit tuple) measurement.
    pub gate_errors: Vec<GateErrorSample>,
    /// Readout error probability per qubit index.
    pub readout_errors: FxHashMap<u32, f64>,
}

impl Calibration {
    /// Create an empty calibration table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gate-error sample.
    #[must_use]
    pub fn with_gate_error(
        mut self,
        gate: impl Into<String>,
        qubits: impl Into<Vec<u32>>,
        error: f64,
    ) -> Self {
        self.gate_errors.push(GateErrorSample::new(gate, qubits, error));
        self
    }

    /// Add a readout-error entry for one qubit.
    #[must_use]
    pub fn with_readout_error(mut self, qubit: u32, error: f64) -> Self {
        self.readout_errors.insert(qubit, error);
        self
    }

    /// Check whether the table holds any data at all.
    pub fn is_empty(&self) -> bool {
        self.gate_errors.is_empty() && self.readout_errors.is_empty()
    }
}

/// A hardware target: the device description compilation runs against.
///
/// Immutable after construction; shared by reference across concurrently
/// running pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Name of the target device.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Supported gate names (host spelling, lowercase).
    gate_names: Vec<String>,
    /// Directed coupling edges. `None` means the description carries no
    /// coupling map at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    coupling: Option<Vec<(u32, u32)>>,
    /// Calibration data, if the device has been characterized.
    #[serde(skip_serializing_if = "Option::is_none")]
    calibration: Option<Calibration>,
}

impl Target {
    /// Create a target with no coupling map and no calibration.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_names: vec![],
            coupling: None,
            calibration: None,
        }
    }

    /// Assemble a target from loose pipeline configuration, for callers that
    /// have basis gates and a coupling map but no full device description.
    pub fn from_config(
        name: impl Into<String>,
        num_qubits: u32,
        basis_gates: impl IntoIterator<Item = impl Into<String>>,
        coupling: Option<Vec<(u32, u32)>>,
        calibration: Option<Calibration>,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_names: basis_gates.into_iter().map(Into::into).collect(),
            coupling,
            calibration,
        }
    }

    /// Set the supported gate names.
    #[must_use]
    pub fn with_gates(mut self, gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.gate_names = gates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the coupling edges.
    #[must_use]
    pub fn with_coupling(mut self, edges: Vec<(u32, u32)>) -> Self {
        self.coupling = Some(edges);
        self
    }

    /// Attach calibration data.
    #[must_use]
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    /// Directed edges of a linear chain, both directions per neighbor pair.
    pub fn linear_coupling(n: u32) -> Vec<(u32, u32)> {
        (0..n.saturating_sub(1))
            .flat_map(|i| [(i, i + 1), (i + 1, i)])
            .collect()
    }

    /// Directed edges of a ring.
    pub fn ring_coupling(n: u32) -> Vec<(u32, u32)> {
        if n < 2 {
            return vec![];
        }
        (0..n)
            .flat_map(|i| {
                let j = (i + 1) % n;
                [(i, j), (j, i)]
            })
            .collect()
    }

    /// Directed edges of an all-to-all topology.
    pub fn full_coupling(n: u32) -> Vec<(u32, u32)> {
        let mut edges = vec![];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    // =========================================================================
    // Accessor surface
    // =========================================================================

    /// Name of the target device.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Directed coupling edges. Empty when the description has no coupling
    /// map — the fully-connected assumption is the caller's responsibility.
    pub fn coupling_edges(&self) -> &[(u32, u32)] {
        self.coupling.as_deref().unwrap_or(&[])
    }

    /// Check whether the description carries a coupling map at all.
    pub fn has_coupling_map(&self) -> bool {
        self.coupling.is_some()
    }

    /// Check whether a directed edge is present.
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.coupling_edges().contains(&(a, b))
    }

    /// Supported gate names.
    pub fn gate_names(&self) -> &[String] {
        &self.gate_names
    }

    /// Check whether a gate name is supported.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_names.iter().any(|g| g == name)
    }

    /// Calibrated error for a gate on a specific qubit tuple.
    pub fn gate_error(&self, gate: &str, qubits: &[u32]) -> Option<f64> {
        self.calibration.as_ref()?.gate_errors.iter().find_map(|s| {
            (s.gate == gate && s.qubits == qubits).then_some(s.error)
        })
    }

    /// Calibrated readout error for one qubit.
    pub fn readout_error(&self, qubit: u32) -> Option<f64> {
        self.calibration.as_ref()?.readout_errors.get(&qubit).copied()
    }

    /// All gate-error samples, for consumers that aggregate.
    pub fn gate_error_samples(&self) -> &[GateErrorSample] {
        self.calibration
            .as_ref()
            .map(|c| c.gate_errors.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether any calibration data is available. An empty calibration
    /// table counts as absent.
    pub fn has_calibration(&self) -> bool {
        self.calibration.as_ref().is_some_and(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_without_coupling() {
        let target = Target::new("bare", 3).with_gates(["cx", "rz", "sx", "x"]);
        assert_eq!(target.num_qubits(), 3);
        assert!(target.coupling_edges().is_empty());
        assert!(!target.has_coupling_map());
        assert!(target.supports_gate("cx"));
        assert!(!target.supports_gate("cz"));
        assert!(!target.has_calibration());
    }

    #[test]
    fn test_linear_coupling_is_bidirectional() {
        let edges = Target::linear_coupling(3);
        assert_eq!(edges.len(), 4);
        assert!(edges.contains(&(0, 1)));
        assert!(edges.contains(&(1, 0)));
        assert!(edges.contains(&(1, 2)));
        assert!(edges.contains(&(2, 1)));
    }

    #[test]
    fn test_gate_error_lookup() {
        let cal = Calibration::new()
            .with_gate_error("cx", [0, 1], 0.01)
            .with_readout_error(0, 0.02);
        let target = Target::new("cal", 2)
            .with_coupling(vec![(0, 1)])
            .with_calibration(cal);

        assert_eq!(target.gate_error("cx", &[0, 1]), Some(0.01));
        assert_eq!(target.gate_error("cx", &[1, 0]), None);
        assert_eq!(target.readout_error(0), Some(0.02));
        assert_eq!(target.readout_error(1), None);
        assert!(target.has_calibration());
    }

    #[test]
    fn test_empty_calibration_counts_as_absent() {
        let target = Target::new("empty", 2).with_calibration(Calibration::new());
        assert!(!target.has_calibration());
    }

    #[test]
    fn test_from_config() {
        let target = Target::from_config(
            "configured",
            3,
            ["cx", "rz"],
            Some(Target::linear_coupling(3)),
            None,
        );
        assert_eq!(target.num_qubits(), 3);
        assert!(target.supports_gate("rz"));
        assert!(target.has_edge(0, 1));
        assert!(!target.has_edge(0, 2));
    }
}
