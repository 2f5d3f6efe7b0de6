//! Error types for circuit construction and execution

use crate::QubitId;
use chaosq_gates::GateError;
use chaosq_state::StateError;
use thiserror::Error;

/// Errors that can occur in quantum circuit operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// Qubit index outside the circuit
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Gate applied to the wrong number of targets
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Same qubit listed twice among targets or among controls
    #[error("Duplicate qubit {0} in operation")]
    DuplicateQubit(QubitId),

    /// Qubit used as both target and control
    #[error("Qubit {0} is both a target and a control")]
    OverlappingQubit(QubitId),

    /// Circuit has no qubits
    #[error("Circuit must have at least one qubit")]
    EmptyCircuit,

    /// Generic circuit validation error
    #[error("Circuit validation failed: {0}")]
    ValidationError(String),

    /// Gate construction or application failed
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    /// State vector operation failed
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Serialization failed
    #[error("Serialization failed: {0}")]
    SerializationError(String),

    /// Deserialization failed
    #[error("Deserialization failed: {0}")]
    DeserializationError(String),

    /// Serialized data written by a newer format
    #[error("Format version mismatch: supported up to {expected}, found {actual}")]
    VersionMismatch { expected: u32, actual: u32 },
}

impl QuantumError {
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }
}
