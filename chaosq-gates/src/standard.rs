//! Standard gate presets
//!
//! Each function returns a fresh noise-free [`Gate`]; chain
//! [`Gate::with_noise`] for a noisy copy. Two- and three-qubit gates take their
//! control(s) as the leading target(s).

use crate::gate::Gate;
use crate::matrices;

pub fn identity() -> Gate {
    Gate::preset("I", 1, &matrices::IDENTITY)
}

pub fn pauli_x() -> Gate {
    Gate::preset("X", 1, &matrices::PAULI_X)
}

pub fn pauli_y() -> Gate {
    Gate::preset("Y", 1, &matrices::PAULI_Y)
}

pub fn pauli_z() -> Gate {
    Gate::preset("Z", 1, &matrices::PAULI_Z)
}

pub fn hadamard() -> Gate {
    Gate::preset("H", 1, &matrices::HADAMARD)
}

/// S = √Z
pub fn s() -> Gate {
    Gate::preset("S", 1, &matrices::S_GATE)
}

pub fn s_dagger() -> Gate {
    Gate::preset("SDG", 1, &matrices::S_GATE_DAGGER)
}

/// T = √S
pub fn t() -> Gate {
    Gate::preset("T", 1, &matrices::T_GATE)
}

pub fn t_dagger() -> Gate {
    Gate::preset("TDG", 1, &matrices::T_GATE_DAGGER)
}

pub fn cnot() -> Gate {
    Gate::preset("CNOT", 2, &matrices::CNOT)
}

pub fn cz() -> Gate {
    Gate::preset("CZ", 2, &matrices::CZ)
}

pub fn swap() -> Gate {
    Gate::preset("SWAP", 2, &matrices::SWAP)
}

pub fn toffoli() -> Gate {
    Gate::preset("TOFFOLI", 3, &matrices::TOFFOLI)
}

/// Rotation about X by `theta` radians
pub fn rx(theta: f64) -> Gate {
    Gate::preset("RX", 1, &matrices::rotation_x(theta)).with_parameters(&[theta])
}

/// Rotation about Y by `theta` radians
pub fn ry(theta: f64) -> Gate {
    Gate::preset("RY", 1, &matrices::rotation_y(theta)).with_parameters(&[theta])
}

/// Rotation about Z by `theta` radians
pub fn rz(theta: f64) -> Gate {
    Gate::preset("RZ", 1, &matrices::rotation_z(theta)).with_parameters(&[theta])
}

/// diag(1, e^(iφ))
pub fn phase(phi: f64) -> Gate {
    Gate::preset("P", 1, &matrices::phase(phi)).with_parameters(&[phi])
}
