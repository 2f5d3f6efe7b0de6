//! Circuit operations

use crate::error_correction::ErrorCorrection;
use crate::{QuantumError, QubitId, Result};
use chaosq_gates::Gate;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// A gate bound to the qubits it acts on
///
/// # Example
/// ```
/// use chaosq_core::{GateOp, QubitId};
/// use chaosq_gates::standard;
///
/// let op = GateOp::new(
///     standard::pauli_x().into(),
///     &[QubitId::new(1)],
///     &[QubitId::new(0)],
/// )
/// .unwrap();
/// assert!(op.is_controlled());
/// ```
#[derive(Clone, Debug)]
pub struct GateOp {
    gate: Arc<Gate>,
    targets: SmallVec<[QubitId; 2]>,
    controls: SmallVec<[QubitId; 2]>,
}

impl GateOp {
    /// Bind `gate` to `targets`, conditioned on every qubit in `controls`
    ///
    /// # Errors
    /// - `InvalidQubitCount` if `targets.len()` differs from the gate arity
    /// - `DuplicateQubit` if a qubit repeats among targets or among controls
    /// - `OverlappingQubit` if a qubit is both target and control
    ///
    /// Bounds against a circuit are checked by [`Circuit`](crate::Circuit).
    pub fn new(gate: Arc<Gate>, targets: &[QubitId], controls: &[QubitId]) -> Result<Self> {
        if targets.len() != gate.num_qubits() {
            return Err(QuantumError::invalid_qubit_count(
                gate.name(),
                gate.num_qubits(),
                targets.len(),
            ));
        }

        check_distinct(targets)?;
        check_distinct(controls)?;

        if let Some(&shared) = controls.iter().find(|c| targets.contains(c)) {
            return Err(QuantumError::OverlappingQubit(shared));
        }

        Ok(Self {
            gate,
            targets: SmallVec::from_slice(targets),
            controls: SmallVec::from_slice(controls),
        })
    }

    #[inline]
    pub fn gate(&self) -> &Arc<Gate> {
        &self.gate
    }

    #[inline]
    pub fn targets(&self) -> &[QubitId] {
        &self.targets
    }

    #[inline]
    pub fn controls(&self) -> &[QubitId] {
        &self.controls
    }

    #[inline]
    pub fn is_controlled(&self) -> bool {
        !self.controls.is_empty()
    }

    /// Targets followed by controls
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.targets.iter().chain(self.controls.iter()).copied()
    }
}

fn check_distinct(qubits: &[QubitId]) -> Result<()> {
    for (i, q) in qubits.iter().enumerate() {
        if qubits[i + 1..].contains(q) {
            return Err(QuantumError::DuplicateQubit(*q));
        }
    }
    Ok(())
}

fn write_qubits(f: &mut fmt::Formatter<'_>, qubits: &[QubitId]) -> fmt::Result {
    for (i, q) in qubits.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", q)?;
    }
    Ok(())
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.gate)?;
        write_qubits(f, &self.targets)?;
        if self.is_controlled() {
            write!(f, " ctrl ")?;
            write_qubits(f, &self.controls)?;
        }
        Ok(())
    }
}

/// One step of a circuit
#[derive(Clone, Debug)]
pub enum Operation {
    /// Unitary (possibly controlled, possibly noisy) gate
    Gate(GateOp),
    /// Computational basis measurement with collapse
    Measure(QubitId),
    /// Syndrome extraction and recovery for an error-correcting code
    Correct(Arc<dyn ErrorCorrection>),
}

impl Operation {
    /// Every qubit this operation touches
    pub fn qubits(&self) -> SmallVec<[QubitId; 4]> {
        match self {
            Operation::Gate(op) => op.qubits().collect(),
            Operation::Measure(q) => SmallVec::from_slice(&[*q]),
            Operation::Correct(code) => SmallVec::from_slice(code.qubits()),
        }
    }

    pub fn as_gate(&self) -> Option<&GateOp> {
        match self {
            Operation::Gate(op) => Some(op),
            _ => None,
        }
    }

    #[inline]
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure(_))
    }
}

impl From<GateOp> for Operation {
    fn from(op: GateOp) -> Self {
        Operation::Gate(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(op) => write!(f, "{}", op),
            Operation::Measure(q) => write!(f, "MEASURE {}", q),
            Operation::Correct(code) => {
                write!(f, "CORRECT {} ", code.name())?;
                write_qubits(f, code.qubits())
            }
        }
    }
}
