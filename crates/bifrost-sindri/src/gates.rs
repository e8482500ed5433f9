//! Canonicalization between Bifrost and Sindri gate naming.
//!
//! Most names line up once case is ignored (`h` ↔ `H`, `cx` ↔ `CX`). A
//! fixed synonym table covers the rest — names whose Sindri spelling is a
//! different word entirely (`id` ↔ `Noop`, `u` ↔ `U3`, `r` ↔ `PhasedX`).

use rustc_hash::FxHashSet;

use bifrost_hal::Target;
use sindri::{ALL_OPTYPES, OpType};

use crate::error::{BridgeError, BridgeResult};

/// Host gate names with no Sindri equivalent: structural operations and
/// cross-resonance aliases that targets list but the optimizer never sees.
const NO_FOREIGN_EQUIVALENT: &[&str] = &["delay", "if_else", "rzx"];

/// Resolve a host gate name to a Sindri operation.
///
/// Tries a case-insensitive match against Sindri's own enumeration first,
/// then the synonym table.
pub fn canonicalize(name: &str) -> BridgeResult<OpType> {
    if let Some(op) = ALL_OPTYPES
        .iter()
        .copied()
        .find(|op| op.name().eq_ignore_ascii_case(name))
    {
        return Ok(op);
    }

    match name.to_ascii_lowercase().as_str() {
        "id" => Ok(OpType::Noop),
        "u" => Ok(OpType::U3),
        "cu" => Ok(OpType::CU3),
        "iswap" => Ok(OpType::ISwapMax),
        "rxx" => Ok(OpType::XXPhase),
        "ryy" => Ok(OpType::YYPhase),
        "rzz" => Ok(OpType::ZZPhase),
        "p" => Ok(OpType::U1),
        "cp" => Ok(OpType::CU1),
        "r" => Ok(OpType::PhasedX),
        _ => Err(BridgeError::UnknownGate(name.to_string())),
    }
}

/// The host spelling of a Sindri operation.
///
/// On the synonym table's domain this is the exact inverse of
/// [`canonicalize`]; elsewhere it is the lowercase Sindri name.
pub fn host_name(op: OpType) -> &'static str {
    match op {
        OpType::Noop => "id",
        OpType::U3 => "u",
        OpType::CU3 => "cu",
        OpType::ISwapMax => "iswap",
        OpType::XXPhase => "rxx",
        OpType::YYPhase => "ryy",
        OpType::ZZPhase => "rzz",
        OpType::U1 => "p",
        OpType::CU1 => "cp",
        OpType::PhasedX => "r",
        OpType::X => "x",
        OpType::Y => "y",
        OpType::Z => "z",
        OpType::H => "h",
        OpType::S => "s",
        OpType::Sdg => "sdg",
        OpType::T => "t",
        OpType::Tdg => "tdg",
        OpType::SX => "sx",
        OpType::SXdg => "sxdg",
        OpType::Rx => "rx",
        OpType::Ry => "ry",
        OpType::Rz => "rz",
        OpType::U2 => "u2",
        OpType::TK1 => "tk1",
        OpType::CX => "cx",
        OpType::CY => "cy",
        OpType::CZ => "cz",
        OpType::CH => "ch",
        OpType::CRx => "crx",
        OpType::CRy => "cry",
        OpType::CRz => "crz",
        OpType::SWAP => "swap",
        OpType::CCX => "ccx",
        OpType::CSWAP => "cswap",
        OpType::Measure => "measure",
        OpType::Reset => "reset",
        OpType::Barrier => "barrier",
        OpType::CircBox => "circbox",
        _ => "unknown",
    }
}

/// Derive a Sindri gate set from a target's supported gate names, skipping
/// names with no Sindri equivalent.
pub fn gate_set_from_target(target: &Target) -> BridgeResult<FxHashSet<OpType>> {
    target
        .gate_names()
        .iter()
        .filter(|name| !NO_FOREIGN_EQUIVALENT.contains(&name.as_str()))
        .map(|name| canonicalize(name))
        .collect()
}
