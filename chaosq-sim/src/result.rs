//! Simulation result types

use chaosq_core::{CorrectionRecord, MeasurementRecord};
use chaosq_state::StateVector;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::statistics::ExecutionStatistics;

/// Result of a simulator run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Final state of the primary (shot 0) execution
    pub state: StateVector,

    /// Measurement outcomes of the primary execution
    pub measurements: Vec<MeasurementRecord>,

    /// Correction points of the primary execution
    pub corrections: Vec<CorrectionRecord>,

    /// Sampled counts (if the circuit measures and more than one shot was requested)
    pub counts: Option<MeasurementCounts>,

    /// Execution statistics (if statistics collection was enabled)
    pub statistics: Option<ExecutionStatistics>,
}

impl SimulationResult {
    pub fn new(
        state: StateVector,
        measurements: Vec<MeasurementRecord>,
        corrections: Vec<CorrectionRecord>,
    ) -> Self {
        Self {
            state,
            measurements,
            corrections,
            counts: None,
            statistics: None,
        }
    }

    /// Add measurement counts to the result
    pub fn with_counts(mut self, counts: MeasurementCounts) -> Self {
        self.counts = Some(counts);
        self
    }

    /// Add execution statistics to the result
    pub fn with_statistics(mut self, stats: ExecutionStatistics) -> Self {
        self.statistics = Some(stats);
        self
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    /// Outcomes of the primary execution as a bitstring
    pub fn bitstring(&self) -> String {
        bitstring(&self.measurements)
    }

    /// Get the total number of sampled shots (if sampling ran)
    pub fn total_shots(&self) -> Option<usize> {
        self.counts.as_ref().map(|c| c.total_shots())
    }
}

/// One character per measurement record, in measurement order
pub(crate) fn bitstring(records: &[MeasurementRecord]) -> String {
    records
        .iter()
        .map(|m| if m.outcome == 1 { '1' } else { '0' })
        .collect()
}

/// Measurement outcome counts
///
/// Maps bitstrings (one character per measurement, first measurement first)
/// to the number of shots that produced them. Iteration is in bitstring order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeasurementCounts {
    counts: BTreeMap<String, usize>,
    total_shots: usize,
}

impl MeasurementCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a batch of shot outcomes
    pub fn from_bitstrings<I, S>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = Self::new();
        for outcome in outcomes {
            counts.record(outcome);
        }
        counts
    }

    /// Record a single shot
    pub fn record(&mut self, bitstring: impl Into<String>) {
        self.add(bitstring, 1);
    }

    /// Record `count` shots with the same outcome
    pub fn add(&mut self, bitstring: impl Into<String>, count: usize) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
        self.total_shots += count;
    }

    /// Fold another set of counts into this one
    pub fn merge(&mut self, other: &MeasurementCounts) {
        for (bitstring, &count) in &other.counts {
            self.add(bitstring.clone(), count);
        }
    }

    /// Get the count for a specific bitstring
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Get the observed frequency of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    pub fn bitstrings(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Get number of unique outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// Most frequent outcome; ties resolve to the smallest bitstring
    pub fn most_common(&self) -> Option<(&str, usize)> {
        self.sorted().into_iter().next()
    }

    /// Get outcomes sorted by frequency (descending)
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<_> = self
            .counts
            .iter()
            .map(|(bs, &count)| (bs.as_str(), count))
            .collect();
        // Stable sort keeps bitstring order among ties
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Convert to a probability distribution
    pub fn to_probabilities(&self) -> BTreeMap<String, f64> {
        self.counts
            .keys()
            .map(|bs| (bs.clone(), self.probability(bs)))
            .collect()
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total_shots)?;

        let sorted = self.sorted();
        for (bitstring, count) in sorted.iter().take(10) {
            writeln!(
                f,
                "  {}: {} ({:.2}%)",
                bitstring,
                count,
                self.probability(bitstring) * 100.0
            )?;
        }

        if sorted.len() > 10 {
            writeln!(f, "  ... and {} more outcomes", sorted.len() - 10)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosq_core::QubitId;

    #[test]
    fn test_measurement_counts_basic() {
        let mut counts = MeasurementCounts::new();
        counts.add("00", 50);
        counts.add("01", 30);
        counts.add("11", 20);

        assert_eq!(counts.get("00"), 50);
        assert_eq!(counts.get("10"), 0);
        assert_eq!(counts.total_shots(), 100);
        assert_eq!(counts.num_outcomes(), 3);
        assert!((counts.probability("01") - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_from_bitstrings_and_merge() {
        let mut a = MeasurementCounts::from_bitstrings(["0", "1", "1"]);
        let b = MeasurementCounts::from_bitstrings(vec!["1".to_string()]);
        a.merge(&b);

        assert_eq!(a.get("1"), 3);
        assert_eq!(a.total_shots(), 4);
        assert_eq!(a.bitstrings().collect::<Vec<_>>(), vec!["0", "1"]);
    }

    #[test]
    fn test_most_common_tie_break() {
        let counts = MeasurementCounts::from_bitstrings(["11", "00", "11", "00", "01"]);
        assert_eq!(counts.most_common(), Some(("00", 2)));
        assert_eq!(MeasurementCounts::new().most_common(), None);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let counts = MeasurementCounts::from_bitstrings(["0", "1", "1", "1"]);
        let total: f64 = counts.to_probabilities().values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bitstring_order() {
        let records = [
            MeasurementRecord {
                operation_index: 3,
                qubit: QubitId::new(1),
                outcome: 1,
            },
            MeasurementRecord {
                operation_index: 4,
                qubit: QubitId::new(0),
                outcome: 0,
            },
        ];
        assert_eq!(bitstring(&records), "10");
    }

    #[test]
    fn test_display_truncates() {
        let counts = MeasurementCounts::from_bitstrings((0..12).map(|i| format!("{:04b}", i)));
        let text = counts.to_string();
        assert!(text.starts_with("Measurement Counts (12 shots):"));
        assert!(text.contains("... and 2 more outcomes"));
    }
}
