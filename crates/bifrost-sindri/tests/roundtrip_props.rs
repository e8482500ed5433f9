//! Property-based tests for circuit conversion round trips.
//!
//! Circuits built from Sindri's primitive basis must come back from the
//! bridge with identical operation count, qubit count, operation order, and
//! measurement wiring.

use bifrost_ir::{Circuit, ClbitId, QubitId};
use bifrost_sindri::{from_sindri, to_sindri};
use proptest::prelude::*;

/// Gate operations from the shared primitive basis.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Y(u32),
    Z(u32),
    Rz(u32, f64),
    Rx(u32, f64),
    CX(u32, u32),
    CZ(u32, u32),
}

impl GateOp {
    fn apply(&self, circuit: &mut Circuit) {
        match *self {
            GateOp::H(q) => {
                circuit.h(QubitId(q)).unwrap();
            }
            GateOp::X(q) => {
                circuit.x(QubitId(q)).unwrap();
            }
            GateOp::Y(q) => {
                circuit.y(QubitId(q)).unwrap();
            }
            GateOp::Z(q) => {
                circuit.z(QubitId(q)).unwrap();
            }
            GateOp::Rz(q, theta) => {
                circuit.rz(theta, QubitId(q)).unwrap();
            }
            GateOp::Rx(q, theta) => {
                circuit.rx(theta, QubitId(q)).unwrap();
            }
            GateOp::CX(a, b) => {
                circuit.cx(QubitId(a), QubitId(b)).unwrap();
            }
            GateOp::CZ(a, b) => {
                circuit.cz(QubitId(a), QubitId(b)).unwrap();
            }
        }
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let q = 0..num_qubits;
    let pair = (0..num_qubits, 0..num_qubits.saturating_sub(1)).prop_map(move |(a, off)| {
        let b = if off >= a { off + 1 } else { off };
        (a, b)
    });
    prop_oneof![
        q.clone().prop_map(GateOp::H),
        q.clone().prop_map(GateOp::X),
        q.clone().prop_map(GateOp::Y),
        q.clone().prop_map(GateOp::Z),
        (q.clone(), -10.0..10.0f64).prop_map(|(q, t)| GateOp::Rz(q, t)),
        (q.clone(), -10.0..10.0f64).prop_map(|(q, t)| GateOp::Rx(q, t)),
        pair.clone().prop_map(|(a, b)| GateOp::CX(a, b)),
        pair.prop_map(|(a, b)| GateOp::CZ(a, b)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2_u32..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 1..=16).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("prop", num_qubits, num_qubits);
            for op in &ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn roundtrip_preserves_structure(circuit in arb_circuit()) {
        let foreign = to_sindri(&circuit).unwrap();
        let back = from_sindri(&foreign).unwrap();

        prop_assert_eq!(back.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(back.num_clbits(), circuit.num_clbits());
        prop_assert_eq!(back.num_ops(), circuit.num_ops());

        for (orig, converted) in circuit.instructions().iter().zip(back.instructions()) {
            prop_assert_eq!(orig.name(), converted.name());
            prop_assert_eq!(&orig.qubits, &converted.qubits);
            let orig_params = orig.as_gate().map(|g| g.params()).unwrap_or_default();
            let conv_params = converted.as_gate().map(|g| g.params()).unwrap_or_default();
            prop_assert_eq!(orig_params.len(), conv_params.len());
            for (a, b) in orig_params.iter().zip(&conv_params) {
                prop_assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn roundtrip_preserves_measurement_wiring(num_qubits in 2_u32..=5) {
        let mut circuit = Circuit::with_size("meas", num_qubits, num_qubits);
        circuit.h(QubitId(0)).unwrap();
        for q in (0..num_qubits).rev() {
            circuit.measure(QubitId(q), ClbitId((q + 1) % num_qubits)).unwrap();
        }

        let back = from_sindri(&to_sindri(&circuit).unwrap()).unwrap();
        let measures: Vec<_> = back
            .instructions()
            .iter()
            .filter(|inst| inst.is_measure())
            .collect();
        prop_assert_eq!(measures.len(), num_qubits as usize);
        for (i, q) in (0..num_qubits).rev().enumerate() {
            prop_assert_eq!(measures[i].qubits[0], QubitId(q));
            prop_assert_eq!(measures[i].clbits[0], ClbitId((q + 1) % num_qubits));
        }
    }
}
