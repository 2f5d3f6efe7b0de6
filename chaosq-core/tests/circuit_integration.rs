//! End-to-end circuit behavior

use approx::assert_relative_eq;
use chaosq_core::{BitFlipCode, Circuit, PhaseFlipCode, QuantumError, QubitId};
use chaosq_gates::{library, standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_1_SQRT_2;

fn q(i: usize) -> QubitId {
    QubitId::new(i)
}

fn zero() -> f64 {
    0.0
}

fn bell_circuit() -> Circuit {
    let mut circuit = Circuit::new(2).unwrap();
    circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();
    circuit.add_gate(standard::cnot(), &[q(0), q(1)]).unwrap();
    circuit
}

#[test]
fn test_hadamard_twice_is_identity() {
    let mut circuit = Circuit::new(1).unwrap();
    circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();
    circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();

    let state = circuit.execute(&mut zero).unwrap().final_state;
    assert_relative_eq!(state.amplitudes()[0].re, 1.0, epsilon = 1e-12);
    assert_relative_eq!(state.amplitudes()[1].norm(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_pauli_x_flips_zero() {
    let mut circuit = Circuit::new(1).unwrap();
    circuit.add_gate(library::lookup("x").unwrap(), &[q(0)]).unwrap();

    let state = circuit.execute(&mut zero).unwrap().final_state;
    assert_relative_eq!(state.probability(1).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_bell_state_amplitudes_and_entropy() {
    let state = bell_circuit().execute(&mut zero).unwrap().final_state;
    let amps = state.amplitudes();

    assert_relative_eq!(amps[0b00].re, FRAC_1_SQRT_2, epsilon = 1e-12);
    assert_relative_eq!(amps[0b11].re, FRAC_1_SQRT_2, epsilon = 1e-12);
    assert_relative_eq!(amps[0b01].norm(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(amps[0b10].norm(), 0.0, epsilon = 1e-12);
    assert!(state.is_normalized(1e-9));

    let entropy = state.reduced_entanglement_entropy(0, 1).unwrap();
    assert_relative_eq!(entropy, 1.0, epsilon = 1e-9);
}

#[test]
fn test_product_state_has_no_entanglement() {
    let mut circuit = Circuit::new(2).unwrap();
    circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();
    circuit.add_gate(standard::ry(0.7), &[q(1)]).unwrap();

    let state = circuit.execute(&mut zero).unwrap().final_state;
    let entropy = state.reduced_entanglement_entropy(0, 1).unwrap();
    assert_relative_eq!(entropy, 0.0, epsilon = 1e-9);
}

#[test]
fn test_zero_draw_selects_one_on_superposition() {
    let mut circuit = Circuit::new(1).unwrap();
    circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();
    circuit.add_measurement(q(0)).unwrap();

    let result = circuit.execute(&mut zero).unwrap();
    assert_eq!(result.outcomes(), vec![1]);
    assert_relative_eq!(result.final_state.probability(1).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_cnot_with_zero_control_is_noop() {
    let mut circuit = Circuit::new(2).unwrap();
    circuit.add_gate(standard::cnot(), &[q(0), q(1)]).unwrap();
    let state = circuit.execute(&mut zero).unwrap().final_state;
    assert_relative_eq!(state.probability(0).unwrap(), 1.0, epsilon = 1e-12);

    // Same through an explicit control list
    let mut circuit = Circuit::new(2).unwrap();
    circuit
        .add_controlled(standard::pauli_x(), &[q(1)], &[q(0)])
        .unwrap();
    let state = circuit.execute(&mut zero).unwrap().final_state;
    assert_relative_eq!(state.probability(0).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_invalid_index_leaves_operations_unchanged() {
    let mut circuit = bell_circuit();
    let before = circuit.to_string();

    assert_eq!(
        circuit.add_gate(standard::hadamard(), &[q(2)]).unwrap_err(),
        QuantumError::InvalidQubit(2, 2)
    );
    assert!(circuit
        .add_operation(standard::cnot(), &[q(0), q(5)], &[])
        .is_err());
    assert_eq!(circuit.len(), 2);
    assert_eq!(circuit.to_string(), before);
}

#[test]
fn test_bit_flip_code_recovers_any_single_flip() {
    for flipped in 0..3 {
        let mut circuit = Circuit::new(3).unwrap();
        // Encode RY(1.1)|0⟩ into α|000⟩ + β|111⟩
        circuit.add_gate(standard::ry(1.1), &[q(0)]).unwrap();
        circuit.add_gate(standard::cnot(), &[q(0), q(1)]).unwrap();
        circuit.add_gate(standard::cnot(), &[q(0), q(2)]).unwrap();
        let encoded = circuit.execute(&mut zero).unwrap().final_state;

        circuit.add_gate(standard::pauli_x(), &[q(flipped)]).unwrap();
        circuit
            .add_correction(BitFlipCode::new(q(0), q(1), q(2)).unwrap())
            .unwrap();

        let result = circuit.execute(&mut zero).unwrap();
        assert_eq!(result.num_corrected(), 1);
        assert_eq!(result.corrections[0].report.corrected, Some(q(flipped)));
        assert_relative_eq!(
            result.final_state.fidelity(&encoded).unwrap(),
            1.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_phase_flip_code_recovers_z_error() {
    let mut circuit = Circuit::new(3).unwrap();
    circuit.add_gate(standard::ry(0.4), &[q(0)]).unwrap();
    circuit.add_gate(standard::cnot(), &[q(0), q(1)]).unwrap();
    circuit.add_gate(standard::cnot(), &[q(0), q(2)]).unwrap();
    for i in 0..3 {
        circuit.add_gate(standard::hadamard(), &[q(i)]).unwrap();
    }
    let encoded = circuit.execute(&mut zero).unwrap().final_state;

    circuit.add_gate(standard::pauli_z(), &[q(1)]).unwrap();
    circuit
        .add_correction(PhaseFlipCode::new(q(0), q(1), q(2)).unwrap())
        .unwrap();

    let result = circuit.execute(&mut zero).unwrap();
    assert_eq!(result.corrections[0].report.corrected, Some(q(1)));
    assert_relative_eq!(
        result.final_state.fidelity(&encoded).unwrap(),
        1.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_serialized_circuit_executes_identically() {
    let mut circuit = Circuit::new(3).unwrap();
    circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();
    circuit.add_gate(standard::rx(0.9), &[q(1)]).unwrap();
    circuit
        .add_controlled(standard::phase(0.3), &[q(2)], &[q(0), q(1)])
        .unwrap();
    circuit
        .add_gate(standard::hadamard().with_noise(0.02).unwrap(), &[q(2)])
        .unwrap();
    circuit.measure_all();

    let from_json = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
    let from_bytes = Circuit::from_bytes(&circuit.to_bytes().unwrap()).unwrap();

    for seed in 0..8 {
        let run = |c: &Circuit| {
            let mut rng = StdRng::seed_from_u64(seed);
            c.execute(&mut || rng.gen::<f64>()).unwrap()
        };
        let expected = run(&circuit);
        for restored in [&from_json, &from_bytes] {
            let actual = run(restored);
            assert_eq!(actual.outcomes(), expected.outcomes());
            assert_eq!(actual.final_state, expected.final_state);
        }
    }
}
