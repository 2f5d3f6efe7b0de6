//! Dense state vector for an N-qubit register

use crate::complex::{ONE, ZERO};
use crate::error::{Result, StateError};
use crate::kernels;
use num_complex::Complex64;
use std::fmt;

/// Largest register this crate will allocate (2^30 amplitudes, 16 GiB)
pub const MAX_QUBITS: usize = 30;

/// Total probability below which a state cannot be renormalized
pub const DEGENERACY_THRESHOLD: f64 = 1e-12;

/// Quantum state vector
///
/// Holds `2^n` complex amplitudes. Bit `b` of a basis index is the value of
/// qubit `b`, so for two qubits the basis order is `|q1 q0⟩ = 00, 01, 10, 11`
/// read right to left. Every public mutation leaves the vector normalized.
///
/// # Example
///
/// ```
/// use chaosq_state::StateVector;
///
/// let state = StateVector::new(2).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// assert_eq!(state.dimension(), 4);
/// assert!(state.is_normalized(1e-12));
/// ```
#[derive(Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩
    ///
    /// # Errors
    /// `InvalidDimension` for zero qubits, `TooManyQubits` above [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max_qubits: MAX_QUBITS,
            });
        }

        let mut amplitudes = vec![ZERO; 1usize << num_qubits];
        amplitudes[0] = ONE;

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Create a state vector from raw amplitudes
    ///
    /// The amplitudes are normalized on the way in.
    ///
    /// # Errors
    /// `DimensionMismatch` if `amplitudes.len() != 2^num_qubits`,
    /// `DegenerateState` for an all-zero vector
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;

        if amplitudes.len() != state.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: state.dimension(),
                actual: amplitudes.len(),
            });
        }

        state.amplitudes.copy_from_slice(amplitudes);
        state.normalize()?;
        Ok(state)
    }

    /// Computational basis state |index⟩
    pub fn basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;
        if index >= state.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: state.dimension(),
                actual: index,
            });
        }
        state.amplitudes[0] = ZERO;
        state.amplitudes[index] = ONE;
        Ok(state)
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// State dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Copy of the amplitudes, for handing to a renderer or another thread
    pub fn snapshot(&self) -> Vec<Complex64> {
        self.amplitudes.clone()
    }

    /// Σ|a_i|²
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// L2 norm of the amplitude vector
    pub fn norm(&self) -> f64 {
        self.total_probability().sqrt()
    }

    /// True if |norm - 1| < epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Scale every amplitude by 1/sqrt(total probability)
    ///
    /// # Errors
    /// `DegenerateState` when the total probability is below
    /// [`DEGENERACY_THRESHOLD`]; the amplitudes are left unchanged.
    pub fn normalize(&mut self) -> Result<()> {
        let total_probability = self.total_probability();
        if !(total_probability >= DEGENERACY_THRESHOLD) {
            return Err(StateError::DegenerateState { total_probability });
        }

        let inv_norm = 1.0 / total_probability.sqrt();
        for amplitude in &mut self.amplitudes {
            *amplitude *= inv_norm;
        }
        Ok(())
    }

    /// Probability |a_i|² of one basis state
    pub fn probability(&self, basis_state: usize) -> Result<f64> {
        self.amplitudes
            .get(basis_state)
            .map(|a| a.norm_sqr())
            .ok_or(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: basis_state,
            })
    }

    /// Probabilities of all basis states
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Reset to |0...0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }

    /// ⟨self|other⟩
    pub fn inner_product(&self, other: &StateVector) -> Result<Complex64> {
        if self.dimension() != other.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }

        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// |⟨self|other⟩|²
    pub fn fidelity(&self, other: &StateVector) -> Result<f64> {
        Ok(self.inner_product(other)?.norm_sqr())
    }

    /// Apply a 2^k × 2^k unitary to `targets`
    ///
    /// `matrix` is row-major. Row/column bit `k-1-m` addresses `targets[m]`,
    /// so the first target is the most significant bit of the matrix index
    /// (the textbook CNOT takes `[control, target]`). All other qubits are
    /// left untouched. The state is renormalized afterwards.
    ///
    /// Unitarity of `matrix` is a precondition and is not checked.
    ///
    /// # Errors
    /// - `InvalidDimension` if there are no targets
    /// - `DimensionMismatch` if `matrix.len() != 4^targets.len()`
    /// - `InvalidQubitIndex` / `DuplicateQubit` for bad targets
    ///
    /// # Example
    /// ```
    /// use chaosq_state::{StateVector, complex::{ONE, ZERO}};
    ///
    /// let mut state = StateVector::new(1).unwrap();
    /// state.apply_unitary(&[ZERO, ONE, ONE, ZERO], &[0]).unwrap();
    /// assert_eq!(state.amplitudes(), &[ZERO, ONE]);
    /// ```
    pub fn apply_unitary(&mut self, matrix: &[Complex64], targets: &[usize]) -> Result<()> {
        self.apply_controlled_unitary(matrix, targets, &[])
    }

    /// Apply `matrix` to `targets` on the sub-block where every control is |1⟩
    ///
    /// Equivalent to embedding the operator as `|1..1⟩⟨1..1| ⊗ U + (I - |1..1⟩⟨1..1|) ⊗ I`
    /// over the controls. With no controls this is [`apply_unitary`].
    ///
    /// [`apply_unitary`]: StateVector::apply_unitary
    pub fn apply_controlled_unitary(
        &mut self,
        matrix: &[Complex64],
        targets: &[usize],
        controls: &[usize],
    ) -> Result<()> {
        if targets.is_empty() {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }

        let side = 1usize
            .checked_shl(targets.len() as u32)
            .filter(|_| targets.len() <= self.num_qubits)
            .ok_or(StateError::InvalidDimension {
                dimension: targets.len(),
            })?;
        if matrix.len() != side * side {
            return Err(StateError::DimensionMismatch {
                expected: side * side,
                actual: matrix.len(),
            });
        }

        self.validate_qubits(targets, controls)?;

        let control_mask = kernels::qubit_mask(controls);
        kernels::apply_matrix(&mut self.amplitudes, matrix, targets, control_mask);
        self.normalize()
    }

    /// Check every index is in range and appears at most once across both slices
    pub fn validate_qubits(&self, targets: &[usize], controls: &[usize]) -> Result<()> {
        let mut seen = 0usize;
        for &qubit in targets.iter().chain(controls.iter()) {
            self.check_qubit(qubit)?;
            let bit = 1usize << qubit;
            if seen & bit != 0 {
                return Err(StateError::DuplicateQubit { index: qubit });
            }
            seen |= bit;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }
}

impl fmt::Debug for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateVector")
            .field("num_qubits", &self.num_qubits)
            .field("dimension", &self.dimension())
            .field("norm", &self.norm())
            .finish()
    }
}

impl fmt::Display for StateVector {
    /// Non-negligible amplitudes as `a|bits⟩` terms, most significant qubit first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (index, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() < 1e-12 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(
                f,
                "({:.4}{:+.4}i)|{:0width$b}⟩",
                amp.re,
                amp.im,
                index,
                width = self.num_qubits
            )?;
        }
        Ok(())
    }
}
