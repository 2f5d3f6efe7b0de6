//! Error types for gate construction and application

use chaosq_state::StateError;
use thiserror::Error;

/// Errors that can occur when building or applying gates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    /// Matrix length is not (2^k)² for some k ≥ 1
    #[error("Gate '{name}' has a {len}-entry matrix, expected (2^k)^2 entries with k >= 1")]
    InvalidDimension { name: String, len: usize },

    /// Matrix contains NaN or infinite entries
    #[error("Gate '{0}' matrix contains NaN or infinite values")]
    InvalidValues(String),

    /// Noise level outside [0, 1)
    #[error("Noise level {0} is outside [0, 1)")]
    InvalidNoiseLevel(f64),

    /// Gate name is empty
    #[error("Gate name must not be empty")]
    EmptyName,

    /// No gate with this name in the library
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Wrong number of parameters for a parameterized gate
    #[error("Gate '{gate}' takes {expected} parameter(s), but {actual} were provided")]
    InvalidParameters {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Failure reported by the state vector while applying the gate
    #[error(transparent)]
    State(#[from] StateError),
}

impl GateError {
    pub fn invalid_parameters(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidParameters {
            gate: gate.into(),
            expected,
            actual,
        }
    }
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
