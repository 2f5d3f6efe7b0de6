//! The gate value type
//!
//! Every gate, standard or custom, is a [`Gate`]: a name, a row-major unitary
//! matrix, the parameters it was built from and an optional noise level.

use crate::error::{GateError, Result};
use chaosq_state::complex::{c64, frobenius_norm, log2_dimension, square_side, ZERO};
use chaosq_state::StateVector;
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;

/// Quantum gate
///
/// # Example
/// ```
/// use chaosq_gates::{standard, Gate};
/// use chaosq_state::StateVector;
///
/// let x = standard::pauli_x();
/// let mut state = StateVector::new(1).unwrap();
/// x.apply(&mut state, &[0], &mut || 0.0).unwrap();
/// assert!((state.measurement_probability(0).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, PartialEq)]
pub struct Gate {
    name: String,
    num_qubits: usize,
    matrix: Vec<Complex64>,
    parameters: SmallVec<[f64; 1]>,
    noise_level: f64,
}

impl Gate {
    /// Create a noise-free gate
    ///
    /// # Errors
    /// - `EmptyName` for an empty name
    /// - `InvalidDimension` unless `matrix.len() == (2^k)²` with k ≥ 1
    /// - `InvalidValues` if any entry is NaN or infinite
    ///
    /// Unitarity is not checked here; see [`Gate::is_unitary`].
    pub fn new(name: impl Into<String>, matrix: Vec<Complex64>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(GateError::EmptyName);
        }

        let num_qubits = square_side(matrix.len())
            .and_then(log2_dimension)
            .filter(|&k| k >= 1)
            .ok_or_else(|| GateError::InvalidDimension {
                name: name.clone(),
                len: matrix.len(),
            })?;

        if matrix.iter().any(|m| !m.re.is_finite() || !m.im.is_finite()) {
            return Err(GateError::InvalidValues(name));
        }

        Ok(Self {
            name,
            num_qubits,
            matrix,
            parameters: SmallVec::new(),
            noise_level: 0.0,
        })
    }

    /// Library constructor; matrix shape is known to be valid
    pub(crate) fn preset(name: &str, num_qubits: usize, matrix: &[Complex64]) -> Self {
        debug_assert_eq!(matrix.len(), 1 << (2 * num_qubits));
        Self {
            name: name.to_owned(),
            num_qubits,
            matrix: matrix.to_vec(),
            parameters: SmallVec::new(),
            noise_level: 0.0,
        }
    }

    /// Record the angles this gate was built from
    pub(crate) fn with_parameters(mut self, parameters: &[f64]) -> Self {
        self.parameters = SmallVec::from_slice(parameters);
        self
    }

    /// The same gate with matrix perturbation of amplitude `level`
    ///
    /// # Errors
    /// `InvalidNoiseLevel` unless `0 <= level < 1`
    pub fn with_noise(mut self, level: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&level) {
            return Err(GateError::InvalidNoiseLevel(level));
        }
        self.noise_level = level;
        Ok(self)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits the gate acts on
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix side length (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        1 << self.num_qubits
    }

    /// Ideal (noise-free) matrix, row-major
    #[inline]
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    #[inline]
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    #[inline]
    pub fn noise_level(&self) -> f64 {
        self.noise_level
    }

    #[inline]
    pub fn is_noisy(&self) -> bool {
        self.noise_level > 0.0
    }

    /// Check U†U = I within `tolerance` per entry
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let n = self.dimension();
        let m = &self.matrix;

        for i in 0..n {
            for j in 0..n {
                let entry: Complex64 = (0..n).map(|k| m[k * n + i].conj() * m[k * n + j]).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                if (entry - c64(expected, 0.0)).norm() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Check U = U†
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        let n = self.dimension();
        (0..n).all(|i| {
            (0..n).all(|j| (self.matrix[i * n + j] - self.matrix[j * n + i].conj()).norm() <= tolerance)
        })
    }

    /// U†, named `<name>_dg` (noise level carried over)
    pub fn adjoint(&self) -> Self {
        let n = self.dimension();
        let mut matrix = vec![ZERO; n * n];
        for i in 0..n {
            for j in 0..n {
                matrix[j * n + i] = self.matrix[i * n + j].conj();
            }
        }

        Self {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            matrix,
            parameters: self.parameters.iter().map(|p| -p).collect(),
            noise_level: self.noise_level,
        }
    }

    /// Matrix to apply for one use of the gate
    ///
    /// Noise-free gates return the ideal matrix without drawing from `rng`.
    /// Otherwise the real and imaginary part of every entry is shifted by
    /// `(2u - 1) * noise_level` with `u = rng()`, and the result is rescaled to
    /// Frobenius norm `sqrt(dimension)`. This approximates a coherent error;
    /// it is not a noise channel and the result is not exactly unitary.
    pub fn noisy_matrix(&self, rng: &mut dyn FnMut() -> f64) -> Vec<Complex64> {
        if !self.is_noisy() {
            return self.matrix.clone();
        }

        let level = self.noise_level;
        let mut perturbed: Vec<Complex64> = self
            .matrix
            .iter()
            .map(|m| {
                let d_re = (2.0 * rng() - 1.0) * level;
                let d_im = (2.0 * rng() - 1.0) * level;
                c64(m.re + d_re, m.im + d_im)
            })
            .collect();

        let norm = frobenius_norm(&perturbed);
        if norm <= f64::EPSILON {
            return self.matrix.clone();
        }

        let scale = (self.dimension() as f64).sqrt() / norm;
        for entry in &mut perturbed {
            *entry *= scale;
        }
        perturbed
    }

    /// Apply to `targets` of `state`
    pub fn apply(
        &self,
        state: &mut StateVector,
        targets: &[usize],
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<()> {
        self.apply_controlled(state, targets, &[], rng)
    }

    /// Apply to `targets` on the subspace where every qubit in `controls` is |1⟩
    pub fn apply_controlled(
        &self,
        state: &mut StateVector,
        targets: &[usize],
        controls: &[usize],
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<()> {
        if targets.len() != self.num_qubits {
            return Err(chaosq_state::StateError::DimensionMismatch {
                expected: self.num_qubits,
                actual: targets.len(),
            }
            .into());
        }

        // Validate before drawing so failed calls leave the RNG untouched
        state.validate_qubits(targets, controls)?;

        let matrix = self.noisy_matrix(rng);
        state.apply_controlled_unitary(&matrix, targets, controls)?;
        Ok(())
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("name", &self.name)
            .field("num_qubits", &self.num_qubits)
            .field("parameters", &self.parameters.as_slice())
            .field("noise_level", &self.noise_level)
            .finish()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.parameters.is_empty() {
            let params: Vec<String> = self.parameters.iter().map(|p| format!("{:.4}", p)).collect();
            write!(f, "({})", params.join(", "))?;
        }
        if self.is_noisy() {
            write!(f, "~{}", self.noise_level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrices;
    use approx::assert_relative_eq;
    use chaosq_state::complex::ONE;

    fn counting_rng(calls: &mut usize) -> impl FnMut() -> f64 + '_ {
        move || {
            *calls += 1;
            0.9
        }
    }

    #[test]
    fn test_new_infers_qubit_count() {
        let g = Gate::new("X", matrices::PAULI_X.to_vec()).unwrap();
        assert_eq!(g.num_qubits(), 1);
        assert_eq!(g.dimension(), 2);

        let cx = Gate::new("CNOT", matrices::CNOT.to_vec()).unwrap();
        assert_eq!(cx.num_qubits(), 2);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            Gate::new("", matrices::PAULI_X.to_vec()).unwrap_err(),
            GateError::EmptyName
        );
        assert!(matches!(
            Gate::new("scalar", vec![ONE]),
            Err(GateError::InvalidDimension { len: 1, .. })
        ));
        assert!(matches!(
            Gate::new("odd", vec![ONE; 9]),
            Err(GateError::InvalidDimension { len: 9, .. })
        ));
        assert!(matches!(
            Gate::new("nan", vec![c64(f64::NAN, 0.0), ZERO, ZERO, ONE]),
            Err(GateError::InvalidValues(_))
        ));
    }

    #[test]
    fn test_unitarity_check() {
        let h = Gate::new("H", matrices::HADAMARD.to_vec()).unwrap();
        assert!(h.is_unitary(1e-12));
        assert!(h.is_hermitian(1e-12));

        let not_unitary = Gate::new("M", vec![ONE, ONE, ZERO, ONE]).unwrap();
        assert!(!not_unitary.is_unitary(1e-6));
    }

    #[test]
    fn test_noise_level_bounds() {
        let x = Gate::new("X", matrices::PAULI_X.to_vec()).unwrap();
        assert!(x.clone().with_noise(0.0).is_ok());
        assert!(x.clone().with_noise(0.5).is_ok());
        assert_eq!(
            x.clone().with_noise(1.0).unwrap_err(),
            GateError::InvalidNoiseLevel(1.0)
        );
        assert!(x.with_noise(-0.1).is_err());
    }

    #[test]
    fn test_noise_free_gate_does_not_draw() {
        let x = Gate::new("X", matrices::PAULI_X.to_vec()).unwrap();
        let mut calls = 0;
        let m = x.noisy_matrix(&mut counting_rng(&mut calls));
        assert_eq!(calls, 0);
        assert_eq!(m, matrices::PAULI_X.to_vec());
    }

    #[test]
    fn test_noisy_matrix_norm() {
        let h = Gate::new("H", matrices::HADAMARD.to_vec())
            .unwrap()
            .with_noise(0.1)
            .unwrap();

        let mut calls = 0;
        let m = h.noisy_matrix(&mut counting_rng(&mut calls));
        assert_eq!(calls, 8);
        assert_relative_eq!(frobenius_norm(&m), 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_ne!(m, matrices::HADAMARD.to_vec());

        // Ideal matrix is untouched
        assert_eq!(h.matrix(), &matrices::HADAMARD);
    }

    #[test]
    fn test_apply_checks_arity() {
        let cx = Gate::new("CNOT", matrices::CNOT.to_vec()).unwrap();
        let mut state = StateVector::new(2).unwrap();
        assert!(matches!(
            cx.apply(&mut state, &[0], &mut || 0.0),
            Err(GateError::State(_))
        ));
    }

    #[test]
    fn test_adjoint() {
        let t = Gate::new("T", matrices::T_GATE.to_vec()).unwrap();
        let tdg = t.adjoint();
        assert_eq!(tdg.name(), "T_dg");
        for (a, b) in tdg.matrix().iter().zip(matrices::T_GATE_DAGGER.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_display() {
        let g = Gate::new("RX", matrices::rotation_x(0.5).to_vec())
            .unwrap()
            .with_parameters(&[0.5]);
        assert_eq!(g.to_string(), "RX(0.5000)");
    }
}
