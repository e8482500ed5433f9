//! Lossless conversion between Bifrost and Sindri circuit values.
//!
//! `to_sindri` first makes the circuit representable: any operation outside
//! Sindri's taxonomy is replaced by its host-defined definition,
//! recursively, before conversion. Definitions strictly reduce to the
//! primitive basis, so the expansion terminates; a primitive with no Sindri
//! equivalent fails with [`BridgeError::UnrepresentableOperation`].
//!
//! Angle units differ: Bifrost is radians, Sindri is half-turns. Conversion
//! scales by π in each direction. Qubit and classical-bit ordering and
//! classical conditions survive both directions unchanged.

use std::f64::consts::PI;

use bifrost_ir::{
    Circuit, ClassicalCondition, ClbitId, Gate, GateKind, Instruction, InstructionKind, QubitId,
    StandardGate,
};
use sindri::{Condition, Op, OpType};

use crate::error::{BridgeError, BridgeResult};
use crate::gates::canonicalize;

/// Convert a Bifrost circuit to a Sindri circuit, expanding operations the
/// Sindri taxonomy does not recognize.
pub fn to_sindri(circuit: &Circuit) -> BridgeResult<sindri::Circuit> {
    let mut expanded = Vec::with_capacity(circuit.num_ops());
    for inst in circuit.instructions() {
        expand_into(inst, None, &mut expanded)?;
    }

    let mut out = sindri::Circuit::new(circuit.num_qubits(), circuit.num_clbits());
    for inst in &expanded {
        convert_instruction(inst, &mut out)?;
    }
    Ok(out)
}

/// Replace unrepresentable gates with their definitions, recursively. The
/// parent's classical condition distributes over the expansion.
fn expand_into(
    inst: &Instruction,
    inherited: Option<ClassicalCondition>,
    out: &mut Vec<Instruction>,
) -> BridgeResult<()> {
    let InstructionKind::Gate(gate) = &inst.kind else {
        out.push(inst.clone());
        return Ok(());
    };

    let condition = gate.condition.or(inherited);

    if canonicalize(gate.name()).is_ok() {
        let mut kept = inst.clone();
        if let InstructionKind::Gate(g) = &mut kept.kind {
            g.condition = condition;
        }
        out.push(kept);
        return Ok(());
    }

    let definition = match &gate.kind {
        GateKind::Standard(sg) => sg.definition(&inst.qubits),
        GateKind::Custom(cg) => cg.definition.as_deref().map(|def| {
            def.instructions()
                .iter()
                .map(|step| {
                    let mut bound = step.clone();
                    bound.qubits = step.qubits.iter().map(|q| inst.qubits[q.0 as usize]).collect();
                    bound
                })
                .collect()
        }),
    };

    match definition {
        Some(steps) => {
            for step in &steps {
                expand_into(step, condition, out)?;
            }
            Ok(())
        }
        None => Err(BridgeError::UnrepresentableOperation(gate.name().to_string())),
    }
}

fn convert_instruction(inst: &Instruction, out: &mut sindri::Circuit) -> BridgeResult<()> {
    let qubits: Vec<u32> = inst.qubits.iter().map(|q| q.0).collect();
    match &inst.kind {
        InstructionKind::Gate(gate) => {
            let optype = canonicalize(gate.name())?;
            let params: Vec<f64> = gate.params().iter().map(|p| p / PI).collect();
            let mut op = Op::gate(optype, params, qubits);
            if let Some(cond) = gate.condition {
                op.condition = Some(Condition {
                    bit: cond.clbit.0,
                    value: cond.value,
                });
            }
            out.push(op)?;
        }
        InstructionKind::Measure => {
            out.add_measure(qubits[0], inst.clbits[0].0)?;
        }
        InstructionKind::Reset => {
            out.push(Op::gate(OpType::Reset, vec![], qubits))?;
        }
        InstructionKind::Barrier => {
            out.push(Op::gate(OpType::Barrier, vec![], qubits))?;
        }
        InstructionKind::Delay { .. } => {
            return Err(BridgeError::UnrepresentableOperation("delay".into()));
        }
    }
    Ok(())
}

/// Convert a Sindri circuit back to a Bifrost circuit.
pub fn from_sindri(circuit: &sindri::Circuit) -> BridgeResult<Circuit> {
    let mut out = Circuit::with_size("sindri", circuit.n_qubits(), circuit.n_bits());
    for op in circuit.ops() {
        convert_op(op, &mut out)?;
    }
    Ok(out)
}

fn convert_op(op: &Op, out: &mut Circuit) -> BridgeResult<()> {
    let qubits: Vec<QubitId> = op.qubits.iter().map(|&q| QubitId(q)).collect();
    let condition = op.condition.map(|c| ClassicalCondition::new(ClbitId(c.bit), c.value));
    let p = |i: usize| op.params.get(i).copied().unwrap_or(0.0) * PI;

    let standard = match op.optype {
        OpType::Noop => Some(StandardGate::I),
        OpType::X => Some(StandardGate::X),
        OpType::Y => Some(StandardGate::Y),
        OpType::Z => Some(StandardGate::Z),
        OpType::H => Some(StandardGate::H),
        OpType::S => Some(StandardGate::S),
        OpType::Sdg => Some(StandardGate::Sdg),
        OpType::T => Some(StandardGate::T),
        OpType::Tdg => Some(StandardGate::Tdg),
        OpType::SX => Some(StandardGate::SX),
        OpType::SXdg => Some(StandardGate::SXdg),
        OpType::Rx => Some(StandardGate::Rx(p(0))),
        OpType::Ry => Some(StandardGate::Ry(p(0))),
        OpType::Rz => Some(StandardGate::Rz(p(0))),
        OpType::U1 => Some(StandardGate::P(p(0))),
        OpType::U2 => Some(StandardGate::U(PI / 2.0, p(0), p(1))),
        OpType::U3 => Some(StandardGate::U(p(0), p(1), p(2))),
        OpType::PhasedX => Some(StandardGate::R(p(0), p(1))),
        OpType::CX => Some(StandardGate::CX),
        OpType::CY => Some(StandardGate::CY),
        OpType::CZ => Some(StandardGate::CZ),
        OpType::CH => Some(StandardGate::CH),
        OpType::CRx => Some(StandardGate::CRx(p(0))),
        OpType::CRy => Some(StandardGate::CRy(p(0))),
        OpType::CRz => Some(StandardGate::CRz(p(0))),
        OpType::CU1 => Some(StandardGate::CP(p(0))),
        OpType::CU3 => Some(StandardGate::CU(p(0), p(1), p(2))),
        OpType::SWAP => Some(StandardGate::Swap),
        OpType::ISwapMax => Some(StandardGate::ISwap),
        OpType::XXPhase => Some(StandardGate::RXX(p(0))),
        OpType::YYPhase => Some(StandardGate::RYY(p(0))),
        OpType::ZZPhase => Some(StandardGate::RZZ(p(0))),
        OpType::CCX => Some(StandardGate::CCX),
        OpType::CSWAP => Some(StandardGate::CSwap),
        _ => None,
    };

    if let Some(gate) = standard {
        let mut gate = Gate::standard(gate);
        gate.condition = condition;
        out.push(Instruction::gate(gate, qubits))?;
        return Ok(());
    }

    match op.optype {
        // TK1(α, β, γ) = Rz(α)·Rx(β)·Rz(γ); Rz(γ) acts first.
        OpType::TK1 => {
            for gate in [
                StandardGate::Rz(p(2)),
                StandardGate::Rx(p(1)),
                StandardGate::Rz(p(0)),
            ] {
                let mut gate = Gate::standard(gate);
                gate.condition = condition;
                out.push(Instruction::gate(gate, vec![qubits[0]]))?;
            }
            Ok(())
        }
        OpType::Measure => {
            if condition.is_some() {
                return Err(BridgeError::UnrepresentableOperation(
                    "conditioned measurement".into(),
                ));
            }
            out.measure(qubits[0], ClbitId(op.bits[0]))?;
            Ok(())
        }
        OpType::Reset => {
            out.reset(qubits[0])?;
            Ok(())
        }
        OpType::Barrier => {
            out.barrier(qubits)?;
            Ok(())
        }
        OpType::CircBox => {
            // Boxes are inlined rather than reconstructed as custom gates.
            let sub = op.subcircuit.as_deref().ok_or_else(|| {
                BridgeError::UnrepresentableOperation("CircBox without a sub-circuit".into())
            })?;
            for sop in sub.ops() {
                let mut mapped = sop.clone();
                mapped.qubits = sop.qubits.iter().map(|&q| op.qubits[q as usize]).collect();
                if mapped.condition.is_none() {
                    mapped.condition = op.condition;
                }
                convert_op(&mapped, out)?;
            }
            Ok(())
        }
        other => Err(BridgeError::UnrepresentableOperation(
            other.name().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bifrost_ir::CustomGate;

    #[test]
    fn test_bell_roundtrip() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        let foreign = to_sindri(&circuit).unwrap();
        assert_eq!(foreign.n_qubits(), 2);
        assert_eq!(foreign.n_ops(), 4);
        assert_eq!(foreign.count(OpType::H), 1);
        assert_eq!(foreign.count(OpType::CX), 1);
        assert_eq!(foreign.count(OpType::Measure), 2);

        let back = from_sindri(&foreign).unwrap();
        assert_eq!(back.num_qubits(), 2);
        assert_eq!(back.num_ops(), 4);
        assert_eq!(back.count_ops("measure"), 2);
        // Measurement wiring is preserved exactly.
        let measures: Vec<_> = back
            .instructions()
            .iter()
            .filter(|i| i.is_measure())
            .collect();
        assert_eq!(measures[0].qubits, vec![QubitId(0)]);
        assert_eq!(measures[0].clbits, vec![ClbitId(0)]);
        assert_eq!(measures[1].qubits, vec![QubitId(1)]);
        assert_eq!(measures[1].clbits, vec![ClbitId(1)]);
    }

    #[test]
    fn test_angle_units_scale_by_pi() {
        let mut circuit = Circuit::with_size("rot", 1, 0);
        circuit.rx(PI, QubitId(0)).unwrap();
        circuit.rz(PI / 2.0, QubitId(0)).unwrap();

        let foreign = to_sindri(&circuit).unwrap();
        assert!((foreign.ops()[0].params[0] - 1.0).abs() < 1e-12);
        assert!((foreign.ops()[1].params[0] - 0.5).abs() < 1e-12);

        let back = from_sindri(&foreign).unwrap();
        let gate = back.instructions()[0].as_gate().unwrap();
        assert!((gate.params()[0] - PI).abs() < 1e-12);
    }

    #[test]
    fn test_rzx_expands_before_conversion() {
        let mut circuit = Circuit::with_size("cr", 2, 0);
        circuit.rzx(0.3, QubitId(0), QubitId(1)).unwrap();

        let foreign = to_sindri(&circuit).unwrap();
        // h · cx · rz · cx · h
        assert_eq!(foreign.n_ops(), 5);
        assert_eq!(foreign.count(OpType::H), 2);
        assert_eq!(foreign.count(OpType::CX), 2);
        assert_eq!(foreign.count(OpType::Rz), 1);
    }

    #[test]
    fn test_custom_gate_expands_through_definition() {
        let mut def = Circuit::with_size("def", 2, 0);
        def.h(QubitId(0)).unwrap();
        def.cx(QubitId(0), QubitId(1)).unwrap();
        let gate = CustomGate::new("bellpair", 2).with_definition(def);

        let mut circuit = Circuit::with_size("c", 3, 0);
        circuit.append_gate(gate, [QubitId(2), QubitId(1)]).unwrap();

        let foreign = to_sindri(&circuit).unwrap();
        assert_eq!(foreign.n_ops(), 2);
        assert_eq!(foreign.ops()[0].optype, OpType::H);
        assert_eq!(foreign.ops()[0].qubits, vec![2]);
        assert_eq!(foreign.ops()[1].qubits, vec![2, 1]);
    }

    #[test]
    fn test_custom_gate_without_definition_fails() {
        let gate = CustomGate::new("mystery", 1);
        let mut circuit = Circuit::with_size("c", 1, 0);
        circuit.append_gate(gate, [QubitId(0)]).unwrap();

        let err = to_sindri(&circuit).unwrap_err();
        assert!(matches!(err, BridgeError::UnrepresentableOperation(_)));
    }

    #[test]
    fn test_condition_survives_roundtrip() {
        let mut circuit = Circuit::with_size("cond", 1, 1);
        let gate = Gate::standard(StandardGate::X)
            .with_condition(ClassicalCondition::new(ClbitId(0), 1));
        circuit.push(Instruction::gate(gate, vec![QubitId(0)])).unwrap();

        let foreign = to_sindri(&circuit).unwrap();
        assert_eq!(foreign.ops()[0].condition, Some(Condition { bit: 0, value: 1 }));

        let back = from_sindri(&foreign).unwrap();
        let gate = back.instructions()[0].as_gate().unwrap();
        assert_eq!(gate.condition, Some(ClassicalCondition::new(ClbitId(0), 1)));
    }

    #[test]
    fn test_condition_distributes_over_expansion() {
        let mut circuit = Circuit::with_size("cond", 2, 1);
        let gate = Gate::standard(StandardGate::RZX(0.25))
            .with_condition(ClassicalCondition::new(ClbitId(0), 1));
        circuit
            .push(Instruction::gate(gate, vec![QubitId(0), QubitId(1)]))
            .unwrap();

        let foreign = to_sindri(&circuit).unwrap();
        assert_eq!(foreign.n_ops(), 5);
        assert!(foreign.ops().iter().all(|op| op.condition.is_some()));
    }

    #[test]
    fn test_delay_is_unrepresentable() {
        let mut circuit = Circuit::with_size("d", 1, 0);
        circuit.delay(QubitId(0), 100).unwrap();
        let err = to_sindri(&circuit).unwrap_err();
        assert!(matches!(err, BridgeError::UnrepresentableOperation(_)));
    }

    #[test]
    fn test_tk1_comes_back_as_rotations() {
        let mut foreign = sindri::Circuit::new(1, 0);
        foreign
            .add_gate(OpType::TK1, vec![0.1, 0.2, 0.3], vec![0])
            .unwrap();
        let back = from_sindri(&foreign).unwrap();
        let names: Vec<_> = back.instructions().iter().map(|i| i.name().to_string()).collect();
        assert_eq!(names, ["rz", "rx", "rz"]);
        // Rz(γ) first.
        let first = back.instructions()[0].as_gate().unwrap();
        assert!((first.params()[0] - 0.3 * PI).abs() < 1e-12);
    }
}
