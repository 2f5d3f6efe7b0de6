//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Qubit index outside `[0, num_qubits)`
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Qubit repeated within one operation, or shared between targets and controls
    #[error("Qubit {index} appears more than once in the same operation")]
    DuplicateQubit { index: usize },

    /// Dimension is not a power of two (or is zero)
    #[error("Invalid state dimension {dimension}, expected power of 2")]
    InvalidDimension { dimension: usize },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Total probability too close to zero to renormalize
    #[error("Degenerate state: total probability {total_probability:e} cannot be normalized")]
    DegenerateState { total_probability: f64 },

    /// Requested more qubits than the allocation guard permits
    #[error("Cannot allocate a {num_qubits}-qubit state vector (maximum is {max_qubits})")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
