//! Gate matrices in flattened row-major form
//!
//! Fixed gates are `const` arrays; rotations are computed from their angle.
//! Multi-qubit matrices treat the first target as the most significant bit
//! of the row/column index.

use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

// Single-qubit gates (2x2)

/// I = [[1, 0], [0, 1]]
pub const IDENTITY: [Complex64; 4] = [ONE, ZERO, ZERO, ONE];

/// X = [[0, 1], [1, 0]]
pub const PAULI_X: [Complex64; 4] = [ZERO, ONE, ONE, ZERO];

/// Y = [[0, -i], [i, 0]]
pub const PAULI_Y: [Complex64; 4] = [ZERO, NEG_I, I, ZERO];

/// Z = [[1, 0], [0, -1]]
pub const PAULI_Z: [Complex64; 4] = [ONE, ZERO, ZERO, NEG_ONE];

/// H = 1/√2 [[1, 1], [1, -1]]
pub const HADAMARD: [Complex64; 4] = [
    Complex64::new(INV_SQRT2, 0.0),
    Complex64::new(INV_SQRT2, 0.0),
    Complex64::new(INV_SQRT2, 0.0),
    Complex64::new(-INV_SQRT2, 0.0),
];

/// S = [[1, 0], [0, i]]
pub const S_GATE: [Complex64; 4] = [ONE, ZERO, ZERO, I];

/// S† = [[1, 0], [0, -i]]
pub const S_GATE_DAGGER: [Complex64; 4] = [ONE, ZERO, ZERO, NEG_I];

/// T = [[1, 0], [0, e^(iπ/4)]]
pub const T_GATE: [Complex64; 4] = [ONE, ZERO, ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)];

/// T† = [[1, 0], [0, e^(-iπ/4)]]
pub const T_GATE_DAGGER: [Complex64; 4] =
    [ONE, ZERO, ZERO, Complex64::new(INV_SQRT2, -INV_SQRT2)];

// Two-qubit gates (4x4)

/// CNOT, control is the first target
pub const CNOT: [Complex64; 16] = [
    ONE, ZERO, ZERO, ZERO, //
    ZERO, ONE, ZERO, ZERO, //
    ZERO, ZERO, ZERO, ONE, //
    ZERO, ZERO, ONE, ZERO,
];

/// CZ = diag(1, 1, 1, -1)
pub const CZ: [Complex64; 16] = [
    ONE, ZERO, ZERO, ZERO, //
    ZERO, ONE, ZERO, ZERO, //
    ZERO, ZERO, ONE, ZERO, //
    ZERO, ZERO, ZERO, NEG_ONE,
];

/// SWAP
pub const SWAP: [Complex64; 16] = [
    ONE, ZERO, ZERO, ZERO, //
    ZERO, ZERO, ONE, ZERO, //
    ZERO, ONE, ZERO, ZERO, //
    ZERO, ZERO, ZERO, ONE,
];

// Three-qubit gates (8x8)

/// Toffoli (CCNOT), controls are the first two targets
pub const TOFFOLI: [Complex64; 64] = {
    let mut m = [ZERO; 64];
    let mut i = 0;
    while i < 6 {
        m[i * 8 + i] = ONE;
        i += 1;
    }
    m[6 * 8 + 7] = ONE;
    m[7 * 8 + 6] = ONE;
    m
};

// Parameterized gates

/// RX(θ) = [[cos(θ/2), -i sin(θ/2)], [-i sin(θ/2), cos(θ/2)]]
pub fn rotation_x(theta: f64) -> [Complex64; 4] {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        Complex64::new(c, 0.0),
        Complex64::new(0.0, -s),
        Complex64::new(0.0, -s),
        Complex64::new(c, 0.0),
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]
pub fn rotation_y(theta: f64) -> [Complex64; 4] {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        Complex64::new(c, 0.0),
        Complex64::new(-s, 0.0),
        Complex64::new(s, 0.0),
        Complex64::new(c, 0.0),
    ]
}

/// RZ(θ) = diag(e^(-iθ/2), e^(iθ/2))
pub fn rotation_z(theta: f64) -> [Complex64; 4] {
    [
        Complex64::from_polar(1.0, -theta / 2.0),
        ZERO,
        ZERO,
        Complex64::from_polar(1.0, theta / 2.0),
    ]
}

/// P(φ) = diag(1, e^(iφ))
pub fn phase(phi: f64) -> [Complex64; 4] {
    [ONE, ZERO, ZERO, Complex64::from_polar(1.0, phi)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn assert_matrix_eq(a: &[Complex64], b: &[Complex64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_special_angles() {
        assert_matrix_eq(&rotation_x(0.0), &IDENTITY);
        assert_matrix_eq(&rotation_y(0.0), &IDENTITY);
        assert_matrix_eq(&rotation_z(0.0), &IDENTITY);

        // RX(π) = -iX
        let rx_pi = rotation_x(PI);
        assert_matrix_eq(&rx_pi, &[ZERO, NEG_I, NEG_I, ZERO]);
    }

    #[test]
    fn test_phase_matches_fixed_gates() {
        assert_matrix_eq(&phase(PI / 2.0), &S_GATE);
        assert_matrix_eq(&phase(PI / 4.0), &T_GATE);
        assert_matrix_eq(&phase(PI), &PAULI_Z);
    }

    #[test]
    fn test_toffoli_permutation() {
        for row in 0..8 {
            let ones = (0..8).filter(|&c| TOFFOLI[row * 8 + c] == ONE).count();
            assert_eq!(ones, 1);
        }
        assert_eq!(TOFFOLI[6 * 8 + 7], ONE);
        assert_eq!(TOFFOLI[5 * 8 + 5], ONE);
    }
}
