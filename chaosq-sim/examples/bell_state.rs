//! Bell state preparation, sampling and entanglement
//!
//! Builds (|00⟩ + |11⟩)/√2, samples it and reports the entanglement of the
//! pair. Set `RUST_LOG=chaosq_core=trace` to see every operation.
//!
//! Run with: cargo run --example bell_state

use chaosq_core::{Circuit, QubitId};
use chaosq_gates::standard;
use chaosq_sim::{Simulator, SimulatorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Bell State\n");
    println!("==========\n");

    let (q0, q1) = (QubitId::new(0), QubitId::new(1));
    let mut circuit = Circuit::new(2)?;
    circuit.add_gate(standard::hadamard(), &[q0])?;
    circuit.add_gate(standard::cnot(), &[q0, q1])?;

    let config = SimulatorConfig::default()
        .with_seed(42)
        .with_shots(2048)
        .with_statistics(true)
        .with_tracing(true);
    let simulator = Simulator::new(config)?;

    let state = simulator.statevector(&circuit)?;
    println!("State: {}", state);
    println!(
        "Entanglement (q0, q1): {:.6}\n",
        simulator.entanglement(&circuit, 0, 1)?
    );

    circuit.measure_all();
    println!("{}", circuit);

    let result = simulator.run(&circuit)?;
    if let Some(counts) = &result.counts {
        println!("{}", counts);
    }
    if let Some(stats) = &result.statistics {
        println!("{}", stats);
    }

    Ok(())
}
