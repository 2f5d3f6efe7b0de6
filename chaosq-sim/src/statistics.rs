//! Execution statistics tracking

use std::time::Duration;

/// Execution statistics for a simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStatistics {
    /// Total time spent in `run`
    pub total_time: Duration,

    /// Time of the primary execution
    pub execution_time: Duration,

    /// Time spent sampling shots
    pub sampling_time: Duration,

    /// Gates applied during the primary execution
    pub gates_applied: usize,

    /// Measurements performed during the primary execution
    pub measurements_performed: usize,

    /// Correction points that ran
    pub correction_points: usize,

    /// Correction points that applied a recovery
    pub corrections_applied: usize,

    /// Number of sampled shots
    pub shots: usize,

    /// Whether shots were sampled in parallel
    pub parallel: bool,
}

impl ExecutionStatistics {
    /// Create a new statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the gate execution rate (gates per second)
    pub fn gates_per_second(&self) -> f64 {
        let secs = self.execution_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.gates_applied as f64 / secs
        }
    }

    /// Get the sampling rate (shots per second)
    pub fn shots_per_second(&self) -> f64 {
        let secs = self.sampling_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.shots as f64 / secs
        }
    }

    /// Fraction of correction points that found an error
    pub fn correction_rate(&self) -> f64 {
        if self.correction_points == 0 {
            0.0
        } else {
            self.corrections_applied as f64 / self.correction_points as f64
        }
    }
}

impl std::fmt::Display for ExecutionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Execution Statistics:")?;
        writeln!(f, "  Total time: {:?}", self.total_time)?;
        writeln!(f, "    Execution: {:?}", self.execution_time)?;
        writeln!(f, "    Sampling: {:?}", self.sampling_time)?;

        writeln!(f, "\n  Operations:")?;
        writeln!(f, "    Gates: {}", self.gates_applied)?;
        writeln!(f, "    Measurements: {}", self.measurements_performed)?;
        writeln!(
            f,
            "    Corrections: {}/{} ({:.1}%)",
            self.corrections_applied,
            self.correction_points,
            self.correction_rate() * 100.0
        )?;
        writeln!(f, "    Execution rate: {:.0} gates/sec", self.gates_per_second())?;

        writeln!(f, "\n  Sampling:")?;
        writeln!(
            f,
            "    Shots: {} ({})",
            self.shots,
            if self.parallel { "parallel" } else { "serial" }
        )?;
        writeln!(f, "    Rate: {:.0} shots/sec", self.shots_per_second())?;

        Ok(())
    }
}
