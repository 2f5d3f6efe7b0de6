//! Seeded multi-shot simulator for chaosq circuits
//!
//! This crate is the consuming layer on top of `chaosq-core`: it owns the
//! random number generation, repeats executions to build measurement
//! statistics and wires the core observer hooks to `tracing`.
//!
//! # Features
//!
//! - **Reproducible sampling**: per-shot `StdRng` derived from a base seed
//! - **Parallel shots**: independent executions on the rayon pool
//! - **Flexible configuration**: serde-loadable [`SimulatorConfig`]
//! - **Telemetry**: [`ExecutionStatistics`] and a tracing observer
//!
//! # Example
//!
//! ```
//! use chaosq_core::{Circuit, QubitId};
//! use chaosq_gates::standard;
//! use chaosq_sim::{Simulator, SimulatorConfig};
//!
//! let simulator = Simulator::new(SimulatorConfig::default().with_seed(11)).unwrap();
//!
//! let mut circuit = Circuit::new(1).unwrap();
//! circuit.add_gate(standard::hadamard(), &[QubitId::new(0)]).unwrap();
//! circuit.add_measurement(QubitId::new(0)).unwrap();
//!
//! let counts = simulator.sample(&circuit, 1000).unwrap();
//! assert_eq!(counts.total_shots(), 1000);
//! assert!((counts.probability("0") - 0.5).abs() < 0.1);
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod result;
pub mod simulator;
pub mod statistics;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use observer::{ObserverSet, StatisticsObserver, TracingObserver};
pub use result::{MeasurementCounts, SimulationResult};
pub use simulator::Simulator;
pub use statistics::ExecutionStatistics;
