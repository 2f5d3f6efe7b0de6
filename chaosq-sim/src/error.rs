//! Error types for the simulator

use chaosq_core::QuantumError;
use chaosq_state::StateError;
use std::fmt;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    InvalidConfig(String),

    /// Circuit is wider than the configured ceiling
    TooManyQubits {
        num_qubits: usize,
        max_qubits: usize,
    },

    /// Circuit construction or execution failed
    Circuit(QuantumError),

    /// State operation failed outside circuit execution
    State(StateError),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits,
            } => {
                write!(
                    f,
                    "Too many qubits: circuit has {}, max supported is {}",
                    num_qubits, max_qubits
                )
            }
            SimulatorError::Circuit(err) => write!(f, "Circuit error: {}", err),
            SimulatorError::State(err) => write!(f, "State error: {}", err),
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::Circuit(err) => Some(err),
            SimulatorError::State(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuantumError> for SimulatorError {
    fn from(err: QuantumError) -> Self {
        SimulatorError::Circuit(err)
    }
}

impl From<StateError> for SimulatorError {
    fn from(err: StateError) -> Self {
        SimulatorError::State(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = SimulatorError::TooManyQubits {
            num_qubits: 30,
            max_qubits: 24,
        };
        assert_eq!(
            err.to_string(),
            "Too many qubits: circuit has 30, max supported is 24"
        );
    }

    #[test]
    fn test_source_chain() {
        let err: SimulatorError = QuantumError::EmptyCircuit.into();
        assert!(err.source().is_some());
        assert!(SimulatorError::InvalidConfig("x".into()).source().is_none());
    }
}
