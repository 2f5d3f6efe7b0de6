//! Circuits, execution and error correction for chaosq
//!
//! This crate builds on the state and gate crates:
//! - [`QubitId`]: Type-safe qubit addressing
//! - [`Circuit`]: Ordered, validated list of [`Operation`]s
//! - [`Circuit::execute`]: Replay a circuit on a fresh state with injected randomness
//! - [`error_correction`]: Three-qubit bit-flip and phase-flip codes
//!
//! # Example
//! ```
//! use chaosq_core::{Circuit, QubitId};
//! use chaosq_gates::standard;
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! let (q0, q1) = (QubitId::new(0), QubitId::new(1));
//! circuit.add_gate(standard::hadamard(), &[q0]).unwrap();
//! circuit.add_gate(standard::cnot(), &[q0, q1]).unwrap();
//!
//! let result = circuit.execute(&mut || 0.5).unwrap();
//! let entropy = result.final_state.reduced_entanglement_entropy(0, 1).unwrap();
//! assert!((entropy - 1.0).abs() < 1e-9);
//! ```

pub mod circuit;
pub mod error;
pub mod error_correction;
pub mod execution;
pub mod observer;
pub mod operation;
pub mod qubit;

#[cfg(feature = "serialization")]
pub mod serialization;

// Re-exports for convenience
pub use circuit::Circuit;
pub use error::QuantumError;
pub use error_correction::{BitFlipCode, CorrectionReport, ErrorCorrection, PhaseFlipCode};
pub use execution::{CorrectionRecord, ExecutionResult, MeasurementRecord};
pub use num_complex::Complex64;
pub use observer::{ExecutionObserver, NoopObserver};
pub use operation::{GateOp, Operation};
pub use qubit::QubitId;

/// Type alias for results in chaosq
pub type Result<T> = std::result::Result<T, QuantumError>;
