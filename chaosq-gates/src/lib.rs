//! Quantum gate library for chaosq
//!
//! Gates are plain values: a [`Gate`] carries its name, flattened row-major
//! matrix, construction parameters and an optional noise level. There is one
//! type for every gate; the standard set is a collection of preset
//! constructors in [`standard`], reachable by name through [`library`].
//!
//! # Examples
//!
//! ```
//! use chaosq_gates::{library, standard, Gate};
//! use chaosq_state::complex::{ONE, ZERO};
//! use chaosq_state::StateVector;
//!
//! // Presets
//! let h = standard::hadamard();
//! let cx = library::lookup("CNOT").unwrap();
//!
//! // Bell state
//! let mut state = StateVector::new(2).unwrap();
//! let mut rng = || 0.0;
//! h.apply(&mut state, &[0], &mut rng).unwrap();
//! cx.apply(&mut state, &[0, 1], &mut rng).unwrap();
//! assert!((state.probability(0b11).unwrap() - 0.5).abs() < 1e-12);
//!
//! // Custom gates and noise
//! let custom = Gate::new("MyX", vec![ZERO, ONE, ONE, ZERO]).unwrap();
//! let noisy = custom.with_noise(0.05).unwrap();
//! assert!(noisy.is_noisy());
//! ```

pub mod error;
pub mod gate;
pub mod library;
pub mod matrices;
pub mod standard;

pub use error::{GateError, Result};
pub use gate::Gate;
