//! Scalar gate-application kernels
//!
//! These operate on raw amplitude slices and assume the caller has already
//! validated qubit indices and matrix dimensions. [`StateVector`] is the
//! checked entry point.
//!
//! [`StateVector`]: crate::StateVector

use crate::complex::ZERO;
use num_complex::Complex64;
use smallvec::SmallVec;

/// Bit mask with one bit set per qubit index
#[inline]
pub fn qubit_mask(qubits: &[usize]) -> usize {
    qubits.iter().fold(0usize, |mask, &q| mask | (1usize << q))
}

/// Apply a 2×2 matrix (row-major, 4 entries) to one qubit
///
/// Amplitudes are processed in pairs `(i, i | bit)` that differ only in the
/// target qubit. Pairs whose index does not contain every bit of
/// `control_mask` are left untouched.
pub fn apply_single_qubit(
    state: &mut [Complex64],
    matrix: &[Complex64],
    qubit: usize,
    control_mask: usize,
) {
    let bit = 1usize << qubit;

    let m00 = matrix[0];
    let m01 = matrix[1];
    let m10 = matrix[2];
    let m11 = matrix[3];

    for i in 0..state.len() {
        if i & bit != 0 || i & control_mask != control_mask {
            continue;
        }

        let j = i | bit;
        let amp0 = state[i];
        let amp1 = state[j];

        state[i] = m00 * amp0 + m01 * amp1;
        state[j] = m10 * amp0 + m11 * amp1;
    }
}

/// Apply a 2^k × 2^k matrix to `targets`, embedded in the identity elsewhere
///
/// Row/column `r` of the matrix addresses the target bits with `targets[0]`
/// as the most significant bit of `r`. For every base index whose target bits
/// are all zero (and whose control bits are all one), the 2^k amplitudes of
/// that block are gathered, multiplied by the matrix and scattered back.
pub fn apply_multi_qubit(
    state: &mut [Complex64],
    matrix: &[Complex64],
    targets: &[usize],
    control_mask: usize,
) {
    let k = targets.len();
    let sub_dim = 1usize << k;
    let target_mask = qubit_mask(targets);

    let offsets: SmallVec<[usize; 8]> = (0..sub_dim)
        .map(|r| {
            targets
                .iter()
                .enumerate()
                .filter(|(m, _)| (r >> (k - 1 - m)) & 1 == 1)
                .fold(0usize, |offset, (_, &q)| offset | (1usize << q))
        })
        .collect();

    let mut block: SmallVec<[Complex64; 8]> = SmallVec::from_elem(ZERO, sub_dim);

    for base in 0..state.len() {
        if base & target_mask != 0 || base & control_mask != control_mask {
            continue;
        }

        for (slot, offset) in block.iter_mut().zip(offsets.iter()) {
            *slot = state[base | offset];
        }

        for (r, offset) in offsets.iter().enumerate() {
            let row = &matrix[r * sub_dim..(r + 1) * sub_dim];
            state[base | offset] = row
                .iter()
                .zip(block.iter())
                .map(|(m, a)| m * a)
                .sum();
        }
    }
}

/// Dispatch to the single- or multi-qubit kernel
#[inline]
pub fn apply_matrix(
    state: &mut [Complex64],
    matrix: &[Complex64],
    targets: &[usize],
    control_mask: usize,
) {
    if targets.len() == 1 {
        apply_single_qubit(state, matrix, targets[0], control_mask);
    } else {
        apply_multi_qubit(state, matrix, targets, control_mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::{c64, ONE};
    use approx::assert_relative_eq;

    fn pauli_x() -> Vec<Complex64> {
        vec![ZERO, ONE, ONE, ZERO]
    }

    fn cnot() -> Vec<Complex64> {
        let mut m = vec![ZERO; 16];
        m[0] = ONE;
        m[5] = ONE;
        m[11] = ONE;
        m[14] = ONE;
        m
    }

    #[test]
    fn test_single_qubit_flip() {
        let mut state = vec![ONE, ZERO, ZERO, ZERO];
        apply_single_qubit(&mut state, &pauli_x(), 1, 0);
        assert_eq!(state, vec![ZERO, ZERO, ONE, ZERO]);
    }

    #[test]
    fn test_single_qubit_respects_controls() {
        // |00⟩ with control on qubit 0 (value 0): nothing happens
        let mut state = vec![ONE, ZERO, ZERO, ZERO];
        apply_single_qubit(&mut state, &pauli_x(), 1, 0b01);
        assert_eq!(state, vec![ONE, ZERO, ZERO, ZERO]);

        // |01⟩ (qubit 0 set): target flips to |11⟩
        let mut state = vec![ZERO, ONE, ZERO, ZERO];
        apply_single_qubit(&mut state, &pauli_x(), 1, 0b01);
        assert_eq!(state, vec![ZERO, ZERO, ZERO, ONE]);
    }

    #[test]
    fn test_multi_qubit_first_target_is_msb() {
        // CNOT with targets [0, 1]: qubit 0 controls qubit 1
        let mut state = vec![ZERO, ONE, ZERO, ZERO];
        apply_multi_qubit(&mut state, &cnot(), &[0, 1], 0);
        assert_eq!(state, vec![ZERO, ZERO, ZERO, ONE]);

        // Reversed targets: qubit 1 controls qubit 0
        let mut state = vec![ZERO, ONE, ZERO, ZERO];
        apply_multi_qubit(&mut state, &cnot(), &[1, 0], 0);
        assert_eq!(state, vec![ZERO, ONE, ZERO, ZERO]);
    }

    #[test]
    fn test_multi_matches_single_for_one_target() {
        let h = 1.0 / 2.0_f64.sqrt();
        let hadamard = vec![c64(h, 0.0), c64(h, 0.0), c64(h, 0.0), c64(-h, 0.0)];

        let mut a = vec![c64(0.6, 0.0), c64(0.0, 0.8), ZERO, ZERO];
        let mut b = a.clone();
        apply_single_qubit(&mut a, &hadamard, 0, 0);
        apply_multi_qubit(&mut b, &hadamard, &[0], 0);

        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_qubit_mask() {
        assert_eq!(qubit_mask(&[]), 0);
        assert_eq!(qubit_mask(&[0, 2]), 0b101);
    }
}
