//! Single-qubit computational basis measurement
//!
//! Randomness is injected by the caller as `&mut dyn FnMut() -> f64`
//! returning values uniform in `[0, 1)`, so the kernel stays deterministic
//! under a fixed source.

use crate::complex::ZERO;
use crate::error::{Result, StateError};
use crate::state_vector::{StateVector, DEGENERACY_THRESHOLD};

impl StateVector {
    /// Probability of reading 1 on `qubit`: Σ|a_i|² over indices with that bit set
    pub fn measurement_probability(&self, qubit: usize) -> Result<f64> {
        self.check_qubit(qubit)?;
        let bit = 1usize << qubit;

        Ok(self
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(i, _)| i & bit != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum())
    }

    /// Measure `qubit` and collapse the state
    ///
    /// Draws `r = rng()`; the outcome is 1 iff `r < P(1)`. A source that always
    /// returns 0.0 therefore reads 1 whenever P(1) > 0. An outcome whose
    /// probability is below [`DEGENERACY_THRESHOLD`] is never selected, so
    /// rounding residue cannot produce a degenerate collapse. One value is
    /// drawn either way.
    ///
    /// # Example
    /// ```
    /// use chaosq_state::StateVector;
    ///
    /// let mut state = StateVector::new(1).unwrap();
    /// let outcome = state.measure(0, &mut || 0.0).unwrap();
    /// assert_eq!(outcome, 0);
    /// ```
    pub fn measure(&mut self, qubit: usize, rng: &mut dyn FnMut() -> f64) -> Result<u8> {
        let p_one = self.measurement_probability(qubit)?;
        let r = rng();
        let outcome = if p_one < DEGENERACY_THRESHOLD {
            0
        } else if 1.0 - p_one < DEGENERACY_THRESHOLD {
            1
        } else {
            u8::from(r < p_one)
        };

        self.collapse(qubit, outcome)?;
        Ok(outcome)
    }

    /// Project `qubit` onto `outcome` and renormalize
    ///
    /// Amplitudes inconsistent with the outcome are zeroed.
    ///
    /// # Errors
    /// `DegenerateState` if the outcome has (numerically) zero probability;
    /// the state is left unchanged in that case.
    pub fn collapse(&mut self, qubit: usize, outcome: u8) -> Result<()> {
        let p_one = self.measurement_probability(qubit)?;
        let p_outcome = if outcome == 0 { 1.0 - p_one } else { p_one };
        if p_outcome < DEGENERACY_THRESHOLD {
            return Err(StateError::DegenerateState {
                total_probability: p_outcome.max(0.0),
            });
        }

        let bit = 1usize << qubit;
        let keep = if outcome == 0 { 0 } else { bit };
        for (i, amplitude) in self.amplitudes_mut().iter_mut().enumerate() {
            if i & bit != keep {
                *amplitude = ZERO;
            }
        }

        self.normalize()
    }

    /// Expectation ⟨Z_q⟩ = P(0) - P(1)
    pub fn expectation_z(&self, qubit: usize) -> Result<f64> {
        Ok(1.0 - 2.0 * self.measurement_probability(qubit)?)
    }
}
