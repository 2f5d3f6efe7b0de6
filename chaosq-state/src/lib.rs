//! Qubit state representation and the linear algebra that acts on it
//!
//! This crate provides a dense state vector for small qubit registers together
//! with the operations a circuit executor needs from it:
//!
//! - Unitary application to arbitrary target sets, optionally controlled
//! - Renormalization after every mutation
//! - Single-qubit measurement with caller-injected randomness
//! - Reduced density matrices, partial traces and von Neumann entropy
//!
//! # Basis ordering
//!
//! Bit `b` of a basis index is the value of qubit `b`. Gate matrices address
//! their targets with the first target as the most significant bit.
//!
//! # Example
//!
//! ```
//! use chaosq_state::StateVector;
//! use chaosq_state::complex::c64;
//!
//! let h = std::f64::consts::FRAC_1_SQRT_2;
//! let hadamard = [c64(h, 0.0), c64(h, 0.0), c64(h, 0.0), c64(-h, 0.0)];
//!
//! let mut state = StateVector::new(1).unwrap();
//! state.apply_unitary(&hadamard, &[0]).unwrap();
//! assert!((state.measurement_probability(0).unwrap() - 0.5).abs() < 1e-12);
//! ```

pub mod complex;
pub mod density_matrix;
pub mod eigen;
pub mod entanglement;
pub mod error;
pub mod kernels;
pub mod measurement;
pub mod state_vector;

pub use complex::Complex64;
pub use density_matrix::DensityMatrix;
pub use error::{Result, StateError};
pub use state_vector::{StateVector, DEGENERACY_THRESHOLD, MAX_QUBITS};
