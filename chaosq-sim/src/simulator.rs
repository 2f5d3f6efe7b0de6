//! Core simulator implementation

use chaosq_core::{Circuit, ExecutionObserver, ExecutionResult};
use chaosq_state::StateVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use crate::{
    config::SimulatorConfig,
    error::{Result, SimulatorError},
    observer::{ObserverSet, StatisticsObserver, TracingObserver},
    result::{bitstring, MeasurementCounts, SimulationResult},
};

/// Seeded multi-shot circuit simulator
///
/// Every shot builds its own state and its own [`StdRng`], seeded with
/// `base_seed + shot`. Sampling therefore gives the same counts for a given
/// seed whether it runs serially or on the rayon pool.
///
/// # Example
///
/// ```
/// use chaosq_core::{Circuit, QubitId};
/// use chaosq_gates::standard;
/// use chaosq_sim::{Simulator, SimulatorConfig};
///
/// let simulator = Simulator::new(SimulatorConfig::default().with_seed(1).with_shots(200)).unwrap();
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.add_gate(standard::hadamard(), &[QubitId::new(0)]).unwrap();
/// circuit
///     .add_gate(standard::cnot(), &[QubitId::new(0), QubitId::new(1)])
///     .unwrap();
/// circuit.measure_all();
///
/// let result = simulator.run(&circuit).unwrap();
/// let counts = result.counts.unwrap();
/// assert_eq!(counts.get("00") + counts.get("11"), 200);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator with the given configuration
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration fails validation.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run a circuit
    ///
    /// Executes once with the shot-0 generator and returns that execution's
    /// final state and outcomes. When the circuit measures and more than one
    /// shot is configured, `shots` executions are also sampled into counts.
    ///
    /// # Errors
    ///
    /// - `TooManyQubits` if the circuit exceeds `max_qubits`
    /// - `Circuit` if execution fails
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        let total_start = Instant::now();
        self.check_qubits(circuit)?;

        let base_seed = self.base_seed();
        info!(
            num_qubits = circuit.num_qubits(),
            num_operations = circuit.len(),
            shots = self.config.shots,
            base_seed,
            "running circuit"
        );

        let mut tracer = TracingObserver::new();
        let mut stats = StatisticsObserver::new();
        let mut observers = ObserverSet::new();
        if self.config.trace_operations {
            observers.push(&mut tracer);
        }
        if self.config.collect_statistics {
            observers.push(&mut stats);
        }

        let exec_start = Instant::now();
        let primary = execute_shot(circuit, base_seed, 0, &mut observers)?;
        let execution_time = exec_start.elapsed();
        drop(observers);

        let mut result =
            SimulationResult::new(primary.final_state, primary.measurements, primary.corrections);

        let sample_start = Instant::now();
        let sampled = circuit.num_measurements() > 0 && self.config.shots > 1;
        if sampled {
            let counts = self.sample_with_seed(circuit, self.config.shots, base_seed)?;
            result = result.with_counts(counts);
        }
        let sampling_time = sample_start.elapsed();

        if self.config.collect_statistics {
            let mut s = stats.into_statistics();
            s.execution_time = execution_time;
            if sampled {
                s.sampling_time = sampling_time;
                s.shots = self.config.shots;
                s.parallel = self.use_parallel(self.config.shots);
            }
            s.total_time = total_start.elapsed();
            result = result.with_statistics(s);
        }

        debug!(elapsed = ?total_start.elapsed(), "run finished");
        Ok(result)
    }

    /// Sample `shots` executions into counts
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for zero shots
    /// - `TooManyQubits` if the circuit exceeds `max_qubits`
    /// - `Circuit` if any shot fails
    pub fn sample(&self, circuit: &Circuit, shots: usize) -> Result<MeasurementCounts> {
        self.check_qubits(circuit)?;
        self.sample_with_seed(circuit, shots, self.base_seed())
    }

    /// Final state of a single execution
    pub fn statevector(&self, circuit: &Circuit) -> Result<StateVector> {
        self.check_qubits(circuit)?;
        let result = execute_shot(circuit, self.base_seed(), 0, &mut chaosq_core::NoopObserver)?;
        Ok(result.final_state)
    }

    /// Entanglement between qubits `a` and `b` after a single execution
    ///
    /// Half the quantum mutual information of the two-qubit reduced state.
    pub fn entanglement(&self, circuit: &Circuit, a: usize, b: usize) -> Result<f64> {
        let state = self.statevector(circuit)?;
        Ok(state.reduced_entanglement_entropy(a, b)?)
    }

    fn sample_with_seed(
        &self,
        circuit: &Circuit,
        shots: usize,
        base_seed: u64,
    ) -> Result<MeasurementCounts> {
        if shots == 0 {
            return Err(SimulatorError::InvalidConfig(
                "shots must be > 0".to_string(),
            ));
        }

        let parallel = self.use_parallel(shots);
        debug!(shots, parallel, "sampling circuit");

        let run_shot = |shot: usize| -> Result<String> {
            let result = execute_shot(circuit, base_seed, shot, &mut chaosq_core::NoopObserver)?;
            Ok(bitstring(&result.measurements))
        };

        let outcomes = if parallel {
            (0..shots)
                .into_par_iter()
                .map(run_shot)
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..shots).map(run_shot).collect::<Result<Vec<_>>>()?
        };

        Ok(MeasurementCounts::from_bitstrings(outcomes))
    }

    fn use_parallel(&self, shots: usize) -> bool {
        self.config.parallel_shots && shots >= self.config.parallel_threshold
    }

    fn base_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(rand::random)
    }

    fn check_qubits(&self, circuit: &Circuit) -> Result<()> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.config.max_qubits {
            return Err(SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits: self.config.max_qubits,
            });
        }
        Ok(())
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            config: SimulatorConfig::default(),
        }
    }
}

/// Generator for one shot
fn shot_rng(base_seed: u64, shot: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add(shot as u64))
}

fn execute_shot(
    circuit: &Circuit,
    base_seed: u64,
    shot: usize,
    observer: &mut dyn ExecutionObserver,
) -> Result<ExecutionResult> {
    let mut rng = shot_rng(base_seed, shot);
    let mut draw = || rng.gen::<f64>();
    Ok(circuit.execute_with_observer(&mut draw, observer)?)
}
