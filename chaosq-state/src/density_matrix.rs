//! Density matrix representation for reduced and mixed states
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with Tr(ρ) = 1.
//! For pure states: ρ = |ψ⟩⟨ψ|
//!
//! # Key Properties
//!
//! - **Purity**: Tr(ρ²) ∈ (0, 1], equals 1 for pure states
//! - **Von Neumann Entropy**: S = -Tr(ρ log₂ ρ), computed from the spectrum
//! - **Partial Trace**: Extract subsystem density matrices
//!
//! # Example
//!
//! ```
//! use chaosq_state::DensityMatrix;
//!
//! let mixed = DensityMatrix::maximally_mixed(1).unwrap();
//! assert!((mixed.purity() - 0.5).abs() < 1e-10);
//! assert!((mixed.von_neumann_entropy() - 1.0).abs() < 1e-10);
//! ```

use crate::complex::{ONE, ZERO};
use crate::eigen;
use crate::error::{Result, StateError};
use crate::state_vector::{StateVector, MAX_QUBITS};
use num_complex::Complex64;
use std::fmt;

/// Eigenvalues at or below this are dropped from the entropy sum
pub const ENTROPY_CUTOFF: f64 = 1e-12;

/// Density matrix of a quantum state
///
/// Stores the full 2^n × 2^n matrix in row-major order.
#[derive(Clone, PartialEq)]
pub struct DensityMatrix {
    num_qubits: usize,
    dimension: usize,
    matrix: Vec<Complex64>,
}

impl DensityMatrix {
    /// |0...0⟩⟨0...0|
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dimension = Self::checked_dimension(num_qubits)?;
        let mut matrix = vec![ZERO; dimension * dimension];
        matrix[0] = ONE;

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// ρ = I / 2^n
    pub fn maximally_mixed(num_qubits: usize) -> Result<Self> {
        let dimension = Self::checked_dimension(num_qubits)?;
        let mut matrix = vec![ZERO; dimension * dimension];

        let value = Complex64::new(1.0 / dimension as f64, 0.0);
        for i in 0..dimension {
            matrix[i * dimension + i] = value;
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// ρ = |ψ⟩⟨ψ| from a state vector
    pub fn from_state_vector(state: &StateVector) -> Self {
        let amplitudes = state.amplitudes();
        let dimension = amplitudes.len();
        let mut matrix = vec![ZERO; dimension * dimension];

        for (i, a) in amplitudes.iter().enumerate() {
            for (j, b) in amplitudes.iter().enumerate() {
                matrix[i * dimension + j] = a * b.conj();
            }
        }

        Self {
            num_qubits: state.num_qubits(),
            dimension,
            matrix,
        }
    }

    /// Wrap a row-major matrix
    ///
    /// # Errors
    /// `DimensionMismatch` if `matrix.len() != 4^num_qubits`
    pub fn from_matrix(num_qubits: usize, matrix: Vec<Complex64>) -> Result<Self> {
        let dimension = Self::checked_dimension(num_qubits)?;
        if matrix.len() != dimension * dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension * dimension,
                actual: matrix.len(),
            });
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    fn checked_dimension(num_qubits: usize) -> Result<usize> {
        // Half the state-vector ceiling keeps dimension² addressable
        if num_qubits > MAX_QUBITS / 2 {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max_qubits: MAX_QUBITS / 2,
            });
        }
        Ok(1usize << num_qubits)
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension + col]
    }

    /// Row-major matrix data
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Tr(ρ)
    pub fn trace(&self) -> f64 {
        (0..self.dimension).map(|i| self.get(i, i).re).sum()
    }

    /// Tr(ρ²), 1 for pure states and 1/d for the maximally mixed state
    pub fn purity(&self) -> f64 {
        let dim = self.dimension;
        let mut trace = ZERO;

        for i in 0..dim {
            for j in 0..dim {
                trace += self.get(i, j) * self.get(j, i);
            }
        }

        trace.re
    }

    /// Check trace one, Hermitian, non-negative diagonal
    pub fn is_valid(&self, tolerance: f64) -> bool {
        if (self.trace() - 1.0).abs() > tolerance {
            return false;
        }

        for i in 0..self.dimension {
            if self.get(i, i).re < -tolerance {
                return false;
            }
            for j in (i + 1)..self.dimension {
                if (self.get(i, j) - self.get(j, i).conj()).norm() > tolerance {
                    return false;
                }
            }
        }

        true
    }

    /// Trace out `trace_qubits`
    ///
    /// The remaining qubits keep their relative order: surviving qubit `q`
    /// with the `m`-th smallest index becomes bit `m` of the reduced index.
    ///
    /// # Errors
    /// `InvalidQubitIndex` / `DuplicateQubit` for bad indices,
    /// `InvalidDimension` if every qubit would be traced out
    pub fn partial_trace(&self, trace_qubits: &[usize]) -> Result<Self> {
        let mut traced = 0usize;
        for &q in trace_qubits {
            if q >= self.num_qubits {
                return Err(StateError::InvalidQubitIndex {
                    index: q,
                    num_qubits: self.num_qubits,
                });
            }
            if traced & (1usize << q) != 0 {
                return Err(StateError::DuplicateQubit { index: q });
            }
            traced |= 1usize << q;
        }

        let remaining_qubits = self.num_qubits - trace_qubits.len();
        if remaining_qubits == 0 {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }

        let kept: Vec<usize> = (0..self.num_qubits)
            .filter(|&q| traced & (1usize << q) == 0)
            .collect();
        let reduced_dim = 1usize << remaining_qubits;
        let mut reduced = vec![ZERO; reduced_dim * reduced_dim];

        for i in 0..self.dimension {
            for j in 0..self.dimension {
                if i & traced != j & traced {
                    continue;
                }
                let ri = project_index(i, &kept);
                let rj = project_index(j, &kept);
                reduced[ri * reduced_dim + rj] += self.get(i, j);
            }
        }

        Ok(Self {
            num_qubits: remaining_qubits,
            dimension: reduced_dim,
            matrix: reduced,
        })
    }

    /// Eigenvalues in ascending order, tiny negatives clamped to zero
    pub fn eigenvalues(&self) -> Vec<f64> {
        eigen::hermitian_eigenvalues(&self.matrix, self.dimension)
            .into_iter()
            .map(|lambda| lambda.max(0.0))
            .collect()
    }

    /// S(ρ) = -Σ λ log₂ λ
    ///
    /// 0 for pure states, `num_qubits` for the maximally mixed state.
    pub fn von_neumann_entropy(&self) -> f64 {
        let entropy: f64 = self
            .eigenvalues()
            .into_iter()
            .filter(|&lambda| lambda > ENTROPY_CUTOFF)
            .map(|lambda| -lambda * lambda.log2())
            .sum();
        entropy.max(0.0)
    }
}

/// Gather the bits of `index` at positions `qubits` into a dense index,
/// `qubits[m]` landing on bit `m`
#[inline]
pub(crate) fn project_index(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0usize, |acc, (m, &q)| acc | (((index >> q) & 1) << m))
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ qubits: {}, dim: {}, purity: {:.4} }}",
            self.num_qubits,
            self.dimension,
            self.purity()
        )
    }
}
