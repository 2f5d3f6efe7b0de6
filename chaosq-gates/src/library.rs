//! Gate lookup by name
//!
//! Names are matched case-insensitively. Besides the canonical names
//! returned by [`names`], a few aliases are accepted: `CX`, `ID`, `NOT`,
//! `CCX`, and `PHASE`, which means S when given no angle and P(φ) otherwise.
//!
//! ```
//! use chaosq_gates::library;
//!
//! let cx = library::lookup("cx").unwrap();
//! assert_eq!(cx.name(), "CNOT");
//!
//! let rz = library::lookup_parameterized("RZ", &[0.25]).unwrap();
//! assert_eq!(rz.parameters(), &[0.25]);
//! ```

use crate::error::{GateError, Result};
use crate::gate::Gate;
use crate::standard;

const FIXED: &[&str] = &[
    "I", "X", "Y", "Z", "H", "S", "SDG", "T", "TDG", "CNOT", "CZ", "SWAP", "TOFFOLI",
];

const PARAMETERIZED: &[&str] = &["RX", "RY", "RZ", "P"];

/// Canonical names of every library gate
pub fn names() -> impl Iterator<Item = &'static str> {
    FIXED.iter().chain(PARAMETERIZED.iter()).copied()
}

/// True if `name` (or an alias) takes a rotation angle
pub fn is_parameterized(name: &str) -> bool {
    matches!(
        name.to_ascii_uppercase().as_str(),
        "RX" | "RY" | "RZ" | "P"
    )
}

/// Fixed (unparameterized) gate by name
///
/// # Errors
/// `UnknownGate` for unrecognized names; `InvalidParameters` for rotation
/// gates, which need an angle
pub fn lookup(name: &str) -> Result<Gate> {
    let gate = match name.to_ascii_uppercase().as_str() {
        "I" | "ID" | "IDENTITY" => standard::identity(),
        "X" | "NOT" => standard::pauli_x(),
        "Y" => standard::pauli_y(),
        "Z" => standard::pauli_z(),
        "H" | "HADAMARD" => standard::hadamard(),
        "S" | "PHASE" => standard::s(),
        "SDG" => standard::s_dagger(),
        "T" => standard::t(),
        "TDG" => standard::t_dagger(),
        "CNOT" | "CX" => standard::cnot(),
        "CZ" => standard::cz(),
        "SWAP" => standard::swap(),
        "TOFFOLI" | "CCX" => standard::toffoli(),
        upper if is_parameterized(upper) => {
            return Err(GateError::invalid_parameters(upper, 1, 0));
        }
        _ => return Err(GateError::UnknownGate(name.to_owned())),
    };
    Ok(gate)
}

/// Gate by name with its parameters
///
/// Fixed gates must be given an empty slice.
///
/// # Errors
/// `UnknownGate` for unrecognized names, `InvalidParameters` for a wrong
/// parameter count
pub fn lookup_parameterized(name: &str, parameters: &[f64]) -> Result<Gate> {
    let upper = name.to_ascii_uppercase();

    let build: fn(f64) -> Gate = match upper.as_str() {
        "RX" => standard::rx,
        "RY" => standard::ry,
        "RZ" => standard::rz,
        "P" => standard::phase,
        "PHASE" if !parameters.is_empty() => standard::phase,
        _ => {
            if !parameters.is_empty() {
                // Surface unknown names before the arity complaint
                lookup(name)?;
                return Err(GateError::invalid_parameters(upper, 0, parameters.len()));
            }
            return lookup(name);
        }
    };

    match parameters {
        [theta] => Ok(build(*theta)),
        _ => Err(GateError::invalid_parameters(upper, 1, parameters.len())),
    }
}
