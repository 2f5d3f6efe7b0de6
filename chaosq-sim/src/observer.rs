//! Observers used by the simulator

use crate::statistics::ExecutionStatistics;
use chaosq_core::{CorrectionReport, ExecutionObserver, GateOp, MeasurementRecord};
use chaosq_state::StateVector;
use tracing::{debug, trace};

/// Emits a tracing event for every executed operation
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionObserver for TracingObserver {
    fn on_start(&mut self, num_qubits: usize, num_operations: usize) {
        debug!(num_qubits, num_operations, "execution started");
    }

    fn on_gate(&mut self, index: usize, op: &GateOp, state: &StateVector) {
        trace!(index, %op, norm = state.norm(), "gate applied");
    }

    fn on_measurement(&mut self, record: &MeasurementRecord, _state: &StateVector) {
        debug!(
            index = record.operation_index,
            qubit = record.qubit.index(),
            outcome = record.outcome,
            "qubit measured"
        );
    }

    fn on_correction(&mut self, index: usize, report: &CorrectionReport, _state: &StateVector) {
        debug!(
            index,
            code = %report.code,
            syndrome = ?report.syndrome.as_slice(),
            corrected = ?report.corrected.map(|q| q.index()),
            "correction point"
        );
    }
}

/// Counts operations into an [`ExecutionStatistics`]
#[derive(Debug, Default, Clone)]
pub struct StatisticsObserver {
    stats: ExecutionStatistics,
}

impl StatisticsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statistics(&self) -> &ExecutionStatistics {
        &self.stats
    }

    pub fn into_statistics(self) -> ExecutionStatistics {
        self.stats
    }
}

impl ExecutionObserver for StatisticsObserver {
    fn on_gate(&mut self, _index: usize, _op: &GateOp, _state: &StateVector) {
        self.stats.gates_applied += 1;
    }

    fn on_measurement(&mut self, _record: &MeasurementRecord, _state: &StateVector) {
        self.stats.measurements_performed += 1;
    }

    fn on_correction(&mut self, _index: usize, report: &CorrectionReport, _state: &StateVector) {
        self.stats.correction_points += 1;
        if report.detected_error() {
            self.stats.corrections_applied += 1;
        }
    }
}

/// Forwards every event to each observer in turn
#[derive(Default)]
pub struct ObserverSet<'a> {
    observers: Vec<&'a mut dyn ExecutionObserver>,
}

impl<'a> ObserverSet<'a> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn push(&mut self, observer: &'a mut dyn ExecutionObserver) {
        self.observers.push(observer);
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl ExecutionObserver for ObserverSet<'_> {
    fn on_start(&mut self, num_qubits: usize, num_operations: usize) {
        for o in &mut self.observers {
            o.on_start(num_qubits, num_operations);
        }
    }

    fn on_gate(&mut self, index: usize, op: &GateOp, state: &StateVector) {
        for o in &mut self.observers {
            o.on_gate(index, op, state);
        }
    }

    fn on_measurement(&mut self, record: &MeasurementRecord, state: &StateVector) {
        for o in &mut self.observers {
            o.on_measurement(record, state);
        }
    }

    fn on_correction(&mut self, index: usize, report: &CorrectionReport, state: &StateVector) {
        for o in &mut self.observers {
            o.on_correction(index, report, state);
        }
    }
}
