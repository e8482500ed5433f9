//! Noise-aware placement inputs derived from target calibration.
//!
//! Every calibrated gate-error sample accumulates on its qubit (single-qubit
//! samples) or directed edge (two-qubit samples). When a two-qubit sample
//! sits on edge `(a, b)` and the target's coupling map lacks the reverse
//! edge `(b, a)`, an estimate of twice the error is synthesized for the
//! reverse direction — the cost of flipping the interaction via basis
//! changes. Readout errors expand to 2×2 confusion matrices, defaulting to
//! zero for uncalibrated qubits. Per-key values are the arithmetic mean of
//! all samples recorded for that key.

use rustc_hash::FxHashMap;

use bifrost_hal::Target;

use crate::error::{BridgeError, BridgeResult};

/// Derived noise data for one placement construction.
///
/// Built fresh per construction and discarded afterwards; nothing here is
/// cached or shared.
#[derive(Debug, Clone)]
pub struct NoiseEstimate {
    /// Mean single-qubit gate error per qubit.
    pub node_errors: FxHashMap<u32, f64>,
    /// Mean two-qubit gate error per directed edge, including synthesized
    /// reverse-edge estimates.
    pub link_errors: FxHashMap<(u32, u32), f64>,
    /// Readout confusion matrix `[[1-e, e], [e, 1-e]]` per qubit.
    pub readout: FxHashMap<u32, [[f64; 2]; 2]>,
}

impl NoiseEstimate {
    /// Derive a noise estimate from a target's calibration data.
    ///
    /// Fails with [`BridgeError::NoCalibrationData`] when the target has no
    /// calibration at all — noise-aware placement must not degrade silently
    /// to uniform weights.
    pub fn from_target(target: &Target) -> BridgeResult<Self> {
        if !target.has_calibration() {
            return Err(BridgeError::NoCalibrationData(target.name().to_string()));
        }

        let mut node_acc: FxHashMap<u32, Vec<f64>> = FxHashMap::default();
        let mut link_acc: FxHashMap<(u32, u32), Vec<f64>> = FxHashMap::default();

        for sample in target.gate_error_samples() {
            match *sample.qubits.as_slice() {
                [q] => node_acc.entry(q).or_default().push(sample.error),
                [a, b] => {
                    link_acc.entry((a, b)).or_default().push(sample.error);
                    if !target.has_edge(b, a) {
                        link_acc.entry((b, a)).or_default().push(2.0 * sample.error);
                    }
                }
                // Wider tuples carry no placement signal.
                _ => {}
            }
        }

        let mut readout = FxHashMap::default();
        for q in 0..target.num_qubits() {
            let e = target.readout_error(q).unwrap_or(0.0);
            readout.insert(q, [[1.0 - e, e], [e, 1.0 - e]]);
        }

        Ok(Self {
            node_errors: mean_values(node_acc),
            link_errors: mean_values(link_acc),
            readout,
        })
    }

    /// Mean off-diagonal readout error per qubit, the scalar form placement
    /// construction consumes.
    pub fn mean_readout(&self) -> FxHashMap<u32, f64> {
        self.readout
            .iter()
            .map(|(&q, m)| (q, (m[0][1] + m[1][0]) / 2.0))
            .collect()
    }
}

fn mean_values<K: std::hash::Hash + Eq>(acc: FxHashMap<K, Vec<f64>>) -> FxHashMap<K, f64> {
    acc.into_iter()
        .map(|(k, samples)| {
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            (k, mean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bifrost_hal::Calibration;

    #[test]
    fn test_no_calibration_is_an_error() {
        let target = Target::new("bare", 2).with_coupling(vec![(0, 1)]);
        let err = NoiseEstimate::from_target(&target).unwrap_err();
        assert!(matches!(err, BridgeError::NoCalibrationData(_)));
    }

    #[test]
    fn test_asymmetric_edge_synthesizes_reverse() {
        let cal = Calibration::new().with_gate_error("cx", [0, 1], 0.01);
        let target = Target::new("asym", 2)
            .with_coupling(vec![(0, 1)])
            .with_calibration(cal);

        let estimate = NoiseEstimate::from_target(&target).unwrap();
        assert!((estimate.link_errors[&(0, 1)] - 0.01).abs() < 1e-12);
        assert!((estimate.link_errors[&(1, 0)] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_edge_keeps_measured_values() {
        let cal = Calibration::new()
            .with_gate_error("cx", [0, 1], 0.01)
            .with_gate_error("cx", [1, 0], 0.015);
        let target = Target::new("sym", 2)
            .with_coupling(vec![(0, 1), (1, 0)])
            .with_calibration(cal);

        let estimate = NoiseEstimate::from_target(&target).unwrap();
        assert!((estimate.link_errors[&(0, 1)] - 0.01).abs() < 1e-12);
        assert!((estimate.link_errors[&(1, 0)] - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_node_errors_average_across_gates() {
        let cal = Calibration::new()
            .with_gate_error("sx", [0], 0.001)
            .with_gate_error("x", [0], 0.003);
        let target = Target::new("avg", 1).with_calibration(cal);

        let estimate = NoiseEstimate::from_target(&target).unwrap();
        assert!((estimate.node_errors[&0] - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_readout_defaults_to_zero() {
        let cal = Calibration::new()
            .with_gate_error("sx", [0], 0.001)
            .with_readout_error(0, 0.04);
        let target = Target::new("ro", 2).with_calibration(cal);

        let estimate = NoiseEstimate::from_target(&target).unwrap();
        assert_eq!(estimate.readout[&0], [[0.96, 0.04], [0.04, 0.96]]);
        assert_eq!(estimate.readout[&1], [[1.0, 0.0], [0.0, 1.0]]);

        let mean = estimate.mean_readout();
        assert!((mean[&0] - 0.04).abs() < 1e-12);
        assert!((mean[&1] - 0.0).abs() < 1e-12);
    }
}
