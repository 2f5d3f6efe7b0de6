//! Entanglement measures on pure states
//!
//! All quantities are in bits (log base 2).

use crate::complex::ZERO;
use crate::density_matrix::DensityMatrix;
use crate::error::{Result, StateError};
use crate::kernels::qubit_mask;
use crate::state_vector::StateVector;
use smallvec::SmallVec;

impl StateVector {
    /// Reduced density matrix of the qubits in `keep`
    ///
    /// Traces out every other qubit: ρ[a][b] = Σ_e ψ[a,e]·conj(ψ[b,e]).
    /// Bit `m` of the reduced index is qubit `keep[m]`.
    ///
    /// # Errors
    /// `InvalidDimension` for an empty `keep`, otherwise the usual qubit
    /// validation errors
    pub fn reduced_density_matrix(&self, keep: &[usize]) -> Result<DensityMatrix> {
        if keep.is_empty() {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }
        self.validate_qubits(keep, &[])?;

        let sub_dim = 1usize << keep.len();
        let keep_mask = qubit_mask(keep);
        let offsets: SmallVec<[usize; 8]> = (0..sub_dim)
            .map(|a| {
                keep.iter()
                    .enumerate()
                    .filter(|&(m, _)| (a >> m) & 1 == 1)
                    .fold(0usize, |offset, (_, &q)| offset | (1usize << q))
            })
            .collect();

        let amplitudes = self.amplitudes();
        let mut rho = vec![ZERO; sub_dim * sub_dim];

        for base in (0..self.dimension()).filter(|base| base & keep_mask == 0) {
            for (a, off_a) in offsets.iter().enumerate() {
                let psi_a = amplitudes[base | off_a];
                if psi_a == ZERO {
                    continue;
                }
                for (b, off_b) in offsets.iter().enumerate() {
                    rho[a * sub_dim + b] += psi_a * amplitudes[base | off_b].conj();
                }
            }
        }

        DensityMatrix::from_matrix(keep.len(), rho)
    }

    /// Von Neumann entropy S(ρ_keep) of a subsystem, between 0 and `keep.len()`
    pub fn subsystem_entropy(&self, keep: &[usize]) -> Result<f64> {
        Ok(self.reduced_density_matrix(keep)?.von_neumann_entropy())
    }

    /// Quantum mutual information I(a:b) = S(ρ_a) + S(ρ_b) - S(ρ_ab)
    pub fn mutual_information(&self, a: usize, b: usize) -> Result<f64> {
        if a == b {
            return Err(StateError::DuplicateQubit { index: a });
        }

        let s_ab = self.subsystem_entropy(&[a, b])?;
        let s_a = self.subsystem_entropy(&[a])?;
        let s_b = self.subsystem_entropy(&[b])?;

        Ok((s_a + s_b - s_ab).max(0.0))
    }

    /// Entanglement between qubits `a` and `b`
    ///
    /// Half the mutual information of the two-qubit reduced state. When ρ_ab
    /// is pure this is exactly the entanglement entropy S(ρ_a): 1.0 for a
    /// Bell pair, 0 for any product state.
    ///
    /// # Example
    /// ```
    /// use chaosq_state::StateVector;
    /// use chaosq_state::complex::{c64, ZERO};
    ///
    /// let h = std::f64::consts::FRAC_1_SQRT_2;
    /// let bell = StateVector::from_amplitudes(2, &[c64(h, 0.0), ZERO, ZERO, c64(h, 0.0)]).unwrap();
    /// let e = bell.reduced_entanglement_entropy(0, 1).unwrap();
    /// assert!((e - 1.0).abs() < 1e-9);
    /// ```
    pub fn reduced_entanglement_entropy(&self, a: usize, b: usize) -> Result<f64> {
        Ok(0.5 * self.mutual_information(a, b)?)
    }
}
