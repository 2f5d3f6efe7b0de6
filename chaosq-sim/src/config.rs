//! Simulator configuration

use serde::{Deserialize, Serialize};

/// Configuration for the simulator
///
/// Missing fields take their default values when deserializing, so a config
/// file only needs the settings it changes:
///
/// ```
/// use chaosq_sim::SimulatorConfig;
///
/// let config: SimulatorConfig = serde_json::from_str(r#"{ "shots": 100, "seed": 7 }"#).unwrap();
/// assert_eq!(config.shots, 100);
/// assert_eq!(config.max_qubits, 24);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Number of executions sampled by [`Simulator::run`](crate::Simulator::run)
    /// when the circuit measures
    ///
    /// Default: 1024
    pub shots: usize,

    /// Base seed for reproducible runs
    ///
    /// Shot `k` draws from `StdRng::seed_from_u64(seed + k)`. If None, a
    /// random base seed is chosen for every call.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Widest circuit the simulator accepts
    ///
    /// Default: 24
    pub max_qubits: usize,

    /// Sample shots on the rayon thread pool
    ///
    /// Default: true
    pub parallel_shots: bool,

    /// Minimum shot count before sampling goes parallel
    ///
    /// Default: 64
    pub parallel_threshold: usize,

    /// Enable execution statistics collection
    ///
    /// Default: false
    pub collect_statistics: bool,

    /// Emit a tracing event for every operation of the primary execution
    ///
    /// Default: false
    pub trace_operations: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            max_qubits: 24,
            parallel_shots: true,
            parallel_threshold: 64,
            collect_statistics: false,
            trace_operations: false,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for debugging
    ///
    /// - Deterministic seed
    /// - Serial sampling
    /// - Statistics and per-operation tracing
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            parallel_shots: false,
            collect_statistics: true,
            trace_operations: true,
            ..Default::default()
        }
    }

    /// Set the number of shots
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Enable or disable parallel sampling
    pub fn with_parallel_shots(mut self, enabled: bool) -> Self {
        self.parallel_shots = enabled;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enable statistics collection
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.collect_statistics = enabled;
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.trace_operations = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.shots == 0 {
            return Err("shots must be > 0".to_string());
        }

        if self.max_qubits == 0 || self.max_qubits > chaosq_state::MAX_QUBITS {
            return Err(format!(
                "max_qubits must be in 1..={}, got {}",
                chaosq_state::MAX_QUBITS,
                self.max_qubits
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_qubits, 24);
        assert!(config.parallel_shots);
        assert_eq!(config.parallel_threshold, 64);
        assert!(!config.collect_statistics);
    }

    #[test]
    fn test_debug_config() {
        let config = SimulatorConfig::debug();
        assert_eq!(config.seed, Some(42));
        assert!(!config.parallel_shots);
        assert!(config.collect_statistics);
        assert!(config.trace_operations);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulatorConfig::new()
            .with_shots(2048)
            .with_seed(7)
            .with_max_qubits(10)
            .with_parallel_threshold(8);

        assert_eq!(config.shots, 2048);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_qubits, 10);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn test_validate() {
        assert!(SimulatorConfig::default().validate().is_ok());

        let invalid = SimulatorConfig {
            shots: 0,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let invalid = SimulatorConfig::default().with_max_qubits(64);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_and_defaults() {
        let config = SimulatorConfig::debug().with_shots(10);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<SimulatorConfig>(&json).unwrap(), config);

        let partial: SimulatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, SimulatorConfig::default());
    }
}
