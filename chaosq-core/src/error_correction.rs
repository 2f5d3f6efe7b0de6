//! Three-qubit repetition codes
//!
//! A code is placed in a circuit with [`Circuit::add_correction`]; at that
//! point the executor reads the syndrome from the current state and applies
//! the recovery operation. Encoding and decoding are ordinary gates the
//! circuit author adds around it.
//!
//! Syndromes are read from parity expectation values instead of ancilla
//! measurements, so extraction does not disturb the state. A syndrome bit is
//! set when its parity expectation is negative.
//!
//! [`Circuit::add_correction`]: crate::Circuit::add_correction

use crate::{QuantumError, QubitId, Result};
use chaosq_gates::matrices;
use chaosq_state::StateVector;
use smallvec::SmallVec;
use std::fmt;

/// Syndrome bits in code order
pub type Syndrome = SmallVec<[bool; 4]>;

/// Outcome of one correction step
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionReport {
    /// Name of the code that ran
    pub code: String,
    pub syndrome: Syndrome,
    /// Qubit the recovery operation was applied to, if any
    pub corrected: Option<QubitId>,
}

impl CorrectionReport {
    #[inline]
    pub fn detected_error(&self) -> bool {
        self.corrected.is_some()
    }
}

/// Error-correcting code that can run at a correction point
pub trait ErrorCorrection: Send + Sync + fmt::Debug {
    /// Stable identifier, also used in serialized circuits
    fn name(&self) -> &str;

    /// Physical qubits of the code block
    fn qubits(&self) -> &[QubitId];

    /// Read the syndrome without modifying the state
    fn syndrome(&self, state: &StateVector) -> Result<Syndrome>;

    /// Read the syndrome and apply the indicated recovery
    fn correct(&self, state: &mut StateVector) -> Result<CorrectionReport>;
}

/// ⟨Z_a Z_b⟩
fn zz_parity(state: &StateVector, a: QubitId, b: QubitId) -> f64 {
    state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, amp)| {
            let sign = if a.bit_of(i) == b.bit_of(i) { 1.0 } else { -1.0 };
            sign * amp.norm_sqr()
        })
        .sum()
}

/// ⟨X_a X_b⟩ = Σ conj(ψ_i) ψ_(i ^ mask)
fn xx_parity(state: &StateVector, a: QubitId, b: QubitId) -> f64 {
    let mask = a.mask() | b.mask();
    let amps = state.amplitudes();
    amps.iter()
        .enumerate()
        .map(|(i, amp)| (amp.conj() * amps[i ^ mask]).re)
        .sum()
}

/// Map the two-bit syndrome of a three-qubit repetition code to the qubit in error
fn locate(qubits: &[QubitId; 3], syndrome: &Syndrome) -> Option<QubitId> {
    match (syndrome[0], syndrome[1]) {
        (true, false) => Some(qubits[0]),
        (true, true) => Some(qubits[1]),
        (false, true) => Some(qubits[2]),
        (false, false) => None,
    }
}

fn distinct(q0: QubitId, q1: QubitId, q2: QubitId) -> Result<[QubitId; 3]> {
    if q0 == q1 || q0 == q2 {
        return Err(QuantumError::DuplicateQubit(q0));
    }
    if q1 == q2 {
        return Err(QuantumError::DuplicateQubit(q1));
    }
    Ok([q0, q1, q2])
}

fn check_block(state: &StateVector, qubits: &[QubitId; 3]) -> Result<()> {
    for q in qubits {
        if q.index() >= state.num_qubits() {
            return Err(QuantumError::invalid_qubit(q.index(), state.num_qubits()));
        }
    }
    Ok(())
}

/// Three-qubit bit-flip code: |0⟩ → |000⟩, |1⟩ → |111⟩
///
/// Corrects a single X error on any qubit of the block.
///
/// # Example
/// ```
/// use chaosq_core::error_correction::{BitFlipCode, ErrorCorrection};
/// use chaosq_core::QubitId;
/// use chaosq_state::StateVector;
///
/// let code = BitFlipCode::new(QubitId::new(0), QubitId::new(1), QubitId::new(2)).unwrap();
///
/// // |010⟩: qubit 1 flipped out of |000⟩
/// let mut state = StateVector::basis_state(3, 0b010).unwrap();
/// let report = code.correct(&mut state).unwrap();
/// assert_eq!(report.corrected, Some(QubitId::new(1)));
/// assert!((state.probability(0).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitFlipCode {
    qubits: [QubitId; 3],
}

impl BitFlipCode {
    pub const NAME: &'static str = "bit_flip";

    pub fn new(q0: QubitId, q1: QubitId, q2: QubitId) -> Result<Self> {
        Ok(Self {
            qubits: distinct(q0, q1, q2)?,
        })
    }
}

impl ErrorCorrection for BitFlipCode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    fn syndrome(&self, state: &StateVector) -> Result<Syndrome> {
        check_block(state, &self.qubits)?;
        let [q0, q1, q2] = self.qubits;
        Ok(SmallVec::from_slice(&[
            zz_parity(state, q0, q1) < 0.0,
            zz_parity(state, q1, q2) < 0.0,
        ]))
    }

    fn correct(&self, state: &mut StateVector) -> Result<CorrectionReport> {
        let syndrome = self.syndrome(state)?;
        let corrected = locate(&self.qubits, &syndrome);
        if let Some(q) = corrected {
            state.apply_unitary(&matrices::PAULI_X, &[q.index()])?;
        }

        Ok(CorrectionReport {
            code: Self::NAME.to_string(),
            syndrome,
            corrected,
        })
    }
}

/// Three-qubit phase-flip code: |0⟩ → |+++⟩, |1⟩ → |---⟩
///
/// Corrects a single Z error on any qubit of the block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseFlipCode {
    qubits: [QubitId; 3],
}

impl PhaseFlipCode {
    pub const NAME: &'static str = "phase_flip";

    pub fn new(q0: QubitId, q1: QubitId, q2: QubitId) -> Result<Self> {
        Ok(Self {
            qubits: distinct(q0, q1, q2)?,
        })
    }
}

impl ErrorCorrection for PhaseFlipCode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    fn syndrome(&self, state: &StateVector) -> Result<Syndrome> {
        check_block(state, &self.qubits)?;
        let [q0, q1, q2] = self.qubits;
        Ok(SmallVec::from_slice(&[
            xx_parity(state, q0, q1) < 0.0,
            xx_parity(state, q1, q2) < 0.0,
        ]))
    }

    fn correct(&self, state: &mut StateVector) -> Result<CorrectionReport> {
        let syndrome = self.syndrome(state)?;
        let corrected = locate(&self.qubits, &syndrome);
        if let Some(q) = corrected {
            state.apply_unitary(&matrices::PAULI_Z, &[q.index()])?;
        }

        Ok(CorrectionReport {
            code: Self::NAME.to_string(),
            syndrome,
            corrected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chaosq_state::complex::{c64, ZERO};

    const H: f64 = std::f64::consts::FRAC_1_SQRT_2;

    fn q(i: usize) -> QubitId {
        QubitId::new(i)
    }

    /// α|000⟩ + β|111⟩ with α = 0.6, β = 0.8
    fn encoded_bit_flip() -> StateVector {
        let mut amps = vec![ZERO; 8];
        amps[0] = c64(0.6, 0.0);
        amps[7] = c64(0.8, 0.0);
        StateVector::from_amplitudes(3, &amps).unwrap()
    }

    fn hadamard_all(state: &mut StateVector) {
        for qubit in 0..3 {
            state.apply_unitary(&matrices::HADAMARD, &[qubit]).unwrap();
        }
    }

    #[test]
    fn test_distinct_qubits_required() {
        assert_eq!(
            BitFlipCode::new(q(0), q(1), q(0)).unwrap_err(),
            QuantumError::DuplicateQubit(q(0))
        );
        assert!(PhaseFlipCode::new(q(0), q(2), q(2)).is_err());
    }

    #[test]
    fn test_clean_codeword_has_empty_syndrome() {
        let code = BitFlipCode::new(q(0), q(1), q(2)).unwrap();
        let mut state = encoded_bit_flip();
        let report = code.correct(&mut state).unwrap();

        assert_eq!(report.syndrome.as_slice(), &[false, false]);
        assert!(!report.detected_error());
        assert_relative_eq!(state.fidelity(&encoded_bit_flip()).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bit_flip_corrects_each_qubit() {
        let code = BitFlipCode::new(q(0), q(1), q(2)).unwrap();

        for flipped in 0..3 {
            let mut state = encoded_bit_flip();
            state.apply_unitary(&matrices::PAULI_X, &[flipped]).unwrap();

            let report = code.correct(&mut state).unwrap();
            assert_eq!(report.corrected, Some(q(flipped)));
            assert_relative_eq!(
                state.fidelity(&encoded_bit_flip()).unwrap(),
                1.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_phase_flip_corrects_each_qubit() {
        let code = PhaseFlipCode::new(q(0), q(1), q(2)).unwrap();
        let mut reference = encoded_bit_flip();
        hadamard_all(&mut reference);

        for flipped in 0..3 {
            let mut state = reference.clone();
            state.apply_unitary(&matrices::PAULI_Z, &[flipped]).unwrap();

            let report = code.correct(&mut state).unwrap();
            assert_eq!(report.corrected, Some(q(flipped)));
            assert_relative_eq!(state.fidelity(&reference).unwrap(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_phase_code_ignores_clean_state() {
        let code = PhaseFlipCode::new(q(0), q(1), q(2)).unwrap();
        let mut state = StateVector::from_amplitudes(3, &[c64(H, 0.0); 8]).unwrap();
        assert_eq!(code.syndrome(&state).unwrap().as_slice(), &[false, false]);
        assert!(code.correct(&mut state).unwrap().corrected.is_none());
    }

    #[test]
    fn test_block_outside_state() {
        let code = BitFlipCode::new(q(0), q(1), q(5)).unwrap();
        let state = StateVector::new(3).unwrap();
        assert_eq!(
            code.syndrome(&state).unwrap_err(),
            QuantumError::InvalidQubit(5, 3)
        );
    }
}
