//! Circuit execution
//!
//! Each call builds a fresh |0...0⟩ state and replays the operations in
//! order. Randomness comes from the caller; a circuit without measurements
//! or noisy gates never draws from it.

use crate::circuit::Circuit;
use crate::error_correction::CorrectionReport;
use crate::observer::{ExecutionObserver, NoopObserver};
use crate::operation::Operation;
use crate::qubit::indices;
use crate::{QubitId, Result};
use chaosq_state::StateVector;
use tracing::{debug, trace};

/// One measurement outcome, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasurementRecord {
    /// Position of the measurement in the circuit
    pub operation_index: usize,
    pub qubit: QubitId,
    /// 0 or 1
    pub outcome: u8,
}

/// Correction point that ran during execution
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionRecord {
    pub operation_index: usize,
    pub report: CorrectionReport,
}

/// Output of one circuit execution
#[derive(Clone, Debug)]
pub struct ExecutionResult {
    pub final_state: StateVector,
    pub measurements: Vec<MeasurementRecord>,
    pub corrections: Vec<CorrectionRecord>,
}

impl ExecutionResult {
    /// Measurement outcomes in execution order
    pub fn outcomes(&self) -> Vec<u8> {
        self.measurements.iter().map(|m| m.outcome).collect()
    }

    /// Outcomes as a string of '0'/'1', first measurement first
    pub fn bitstring(&self) -> String {
        self.measurements
            .iter()
            .map(|m| if m.outcome == 1 { '1' } else { '0' })
            .collect()
    }

    /// Number of correction points that applied a recovery
    pub fn num_corrected(&self) -> usize {
        self.corrections
            .iter()
            .filter(|c| c.report.detected_error())
            .count()
    }
}

impl Circuit {
    /// Run the circuit once
    ///
    /// `rng` must return values uniform in `[0, 1)`.
    ///
    /// # Example
    /// ```
    /// use chaosq_core::{Circuit, QubitId};
    /// use chaosq_gates::standard;
    ///
    /// let mut circuit = Circuit::new(1).unwrap();
    /// circuit.add_gate(standard::pauli_x(), &[QubitId::new(0)]).unwrap();
    /// circuit.add_measurement(QubitId::new(0)).unwrap();
    ///
    /// let result = circuit.execute(&mut || 0.5).unwrap();
    /// assert_eq!(result.outcomes(), vec![1]);
    /// ```
    pub fn execute(&self, rng: &mut dyn FnMut() -> f64) -> Result<ExecutionResult> {
        self.execute_with_observer(rng, &mut NoopObserver)
    }

    /// Run the circuit once, reporting every step to `observer`
    pub fn execute_with_observer(
        &self,
        rng: &mut dyn FnMut() -> f64,
        observer: &mut dyn ExecutionObserver,
    ) -> Result<ExecutionResult> {
        debug!(
            num_qubits = self.num_qubits(),
            num_operations = self.len(),
            "executing circuit"
        );

        let mut state = StateVector::new(self.num_qubits())?;
        let mut measurements = Vec::with_capacity(self.num_measurements());
        let mut corrections = Vec::new();

        observer.on_start(self.num_qubits(), self.len());

        for (index, operation) in self.operations().iter().enumerate() {
            trace!(index, %operation, "applying operation");

            match operation {
                Operation::Gate(op) => {
                    let targets = indices(op.targets());
                    let controls = indices(op.controls());
                    op.gate()
                        .apply_controlled(&mut state, &targets, &controls, rng)?;
                    observer.on_gate(index, op, &state);
                }
                Operation::Measure(qubit) => {
                    let outcome = state.measure(qubit.index(), rng)?;
                    let record = MeasurementRecord {
                        operation_index: index,
                        qubit: *qubit,
                        outcome,
                    };
                    trace!(index, qubit = qubit.index(), outcome, "measured");
                    observer.on_measurement(&record, &state);
                    measurements.push(record);
                }
                Operation::Correct(code) => {
                    let report = code.correct(&mut state)?;
                    if let Some(q) = report.corrected {
                        debug!(index, code = code.name(), qubit = q.index(), "error corrected");
                    }
                    observer.on_correction(index, &report, &state);
                    corrections.push(CorrectionRecord {
                        operation_index: index,
                        report,
                    });
                }
            }
        }

        debug!(
            measurements = measurements.len(),
            corrections = corrections.len(),
            "circuit execution finished"
        );

        Ok(ExecutionResult {
            final_state: state,
            measurements,
            corrections,
        })
    }
}
