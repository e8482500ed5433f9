//! Replacement-circuit synthesis over a target's native basis.
//!
//! Gate-replacement parameter slots (a SWAP realization, a CX realization)
//! default to minimal circuits expressed in whatever two-qubit interaction
//! the target actually runs. CX-native and CZ-native targets are covered;
//! anything else must supply an explicit override.

use bifrost_hal::Target;
use bifrost_ir::{Circuit, QubitId};

use crate::convert;
use crate::error::{BridgeError, BridgeResult};

#[derive(Clone, Copy)]
enum TwoQubitBasis {
    Cx,
    Cz,
}

fn two_qubit_basis(target: &Target) -> BridgeResult<TwoQubitBasis> {
    if target.supports_gate("cx") {
        Ok(TwoQubitBasis::Cx)
    } else if target.supports_gate("cz") && target.supports_gate("h") {
        Ok(TwoQubitBasis::Cz)
    } else {
        Err(BridgeError::UnrepresentableOperation("cx".into()))
    }
}

fn emit_cx(basis: TwoQubitBasis, control: QubitId, t: QubitId, out: &mut Circuit) -> BridgeResult<()> {
    match basis {
        TwoQubitBasis::Cx => {
            out.cx(control, t)?;
        }
        TwoQubitBasis::Cz => {
            out.h(t)?;
            out.cz(control, t)?;
            out.h(t)?;
        }
    }
    Ok(())
}

/// A SWAP over qubits `[0, 1]`, expressed in the target's native basis.
/// Three CX-equivalents in alternating directions.
pub fn swap_replacement(target: &Target) -> BridgeResult<sindri::Circuit> {
    let basis = two_qubit_basis(target)?;
    let mut circ = Circuit::with_size("swap_replacement", 2, 0);
    for (a, b) in [(0, 1), (1, 0), (0, 1)] {
        emit_cx(basis, QubitId(a), QubitId(b), &mut circ)?;
    }
    convert::to_sindri(&circ)
}

/// A CNOT over qubits `[0, 1]`, expressed in the target's native basis.
pub fn cnot_replacement(target: &Target) -> BridgeResult<sindri::Circuit> {
    let basis = two_qubit_basis(target)?;
    let mut circ = Circuit::with_size("cnot_replacement", 2, 0);
    emit_cx(basis, QubitId(0), QubitId(1), &mut circ)?;
    convert::to_sindri(&circ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sindri::OpType;

    #[test]
    fn test_swap_on_cx_native_target() {
        let target = Target::new("cxdev", 2).with_gates(["cx", "rz", "sx", "x"]);
        let repl = swap_replacement(&target).unwrap();
        assert_eq!(repl.n_ops(), 3);
        assert_eq!(repl.count(OpType::CX), 3);
        // Alternating directions.
        assert_eq!(repl.ops()[0].qubits, vec![0, 1]);
        assert_eq!(repl.ops()[1].qubits, vec![1, 0]);
    }

    #[test]
    fn test_swap_on_cz_native_target() {
        let target = Target::new("czdev", 2).with_gates(["cz", "h", "rz"]);
        let repl = swap_replacement(&target).unwrap();
        assert_eq!(repl.count(OpType::CZ), 3);
        assert_eq!(repl.count(OpType::H), 6);
        assert_eq!(repl.count(OpType::CX), 0);
    }

    #[test]
    fn test_cnot_on_cz_native_target() {
        let target = Target::new("czdev", 2).with_gates(["cz", "h", "rz"]);
        let repl = cnot_replacement(&target).unwrap();
        assert_eq!(repl.count(OpType::CZ), 1);
        assert_eq!(repl.count(OpType::H), 2);
    }

    #[test]
    fn test_unsupported_basis_fails() {
        let target = Target::new("odd", 2).with_gates(["rxx", "rz"]);
        let err = swap_replacement(&target).unwrap_err();
        assert!(matches!(err, BridgeError::UnrepresentableOperation(_)));
    }
}
