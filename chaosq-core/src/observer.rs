//! Execution hooks
//!
//! Circuits carry no global state. Anything that wants to watch an execution
//! (renderers, tracers, statistics collectors) implements
//! [`ExecutionObserver`] and is passed to
//! [`Circuit::execute_with_observer`](crate::Circuit::execute_with_observer).
//! Every hook defaults to a no-op.

use crate::error_correction::CorrectionReport;
use crate::execution::MeasurementRecord;
use crate::operation::GateOp;
use chaosq_state::StateVector;

pub trait ExecutionObserver {
    /// Called once before the first operation
    fn on_start(&mut self, _num_qubits: usize, _num_operations: usize) {}

    /// Called after the gate at `index` has been applied
    fn on_gate(&mut self, _index: usize, _op: &GateOp, _state: &StateVector) {}

    /// Called after a measurement has collapsed the state
    fn on_measurement(&mut self, _record: &MeasurementRecord, _state: &StateVector) {}

    /// Called after the correction point at `index` has run
    fn on_correction(&mut self, _index: usize, _report: &CorrectionReport, _state: &StateVector) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExecutionObserver for NoopObserver {}
