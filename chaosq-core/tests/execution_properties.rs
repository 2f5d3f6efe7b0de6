//! Property tests over random circuits

use chaosq_core::{Circuit, QubitId};
use chaosq_gates::{standard, Gate};
use proptest::prelude::*;

const NUM_QUBITS: usize = 4;

#[derive(Clone, Debug)]
enum Step {
    Single(u8, usize, f64),
    Pair(u8, usize, usize),
    Measure(usize),
}

fn single(kind: u8, angle: f64) -> Gate {
    match kind % 6 {
        0 => standard::hadamard(),
        1 => standard::t(),
        2 => standard::rx(angle),
        3 => standard::ry(angle),
        4 => standard::rz(angle),
        _ => standard::phase(angle),
    }
}

fn pair(kind: u8) -> Gate {
    match kind % 3 {
        0 => standard::cnot(),
        1 => standard::cz(),
        _ => standard::swap(),
    }
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (any::<u8>(), 0..NUM_QUBITS, -3.2f64..3.2).prop_map(|(k, t, a)| Step::Single(k, t, a)),
        2 => (any::<u8>(), 0..NUM_QUBITS, 1..NUM_QUBITS)
            .prop_map(|(k, a, off)| Step::Pair(k, a, (a + off) % NUM_QUBITS)),
        1 => (0..NUM_QUBITS).prop_map(Step::Measure),
    ]
}

fn build(steps: &[Step]) -> Circuit {
    let mut circuit = Circuit::new(NUM_QUBITS).unwrap();
    for s in steps {
        match *s {
            Step::Single(k, t, a) => circuit.add_gate(single(k, a), &[QubitId::new(t)]).unwrap(),
            Step::Pair(k, a, b) => circuit
                .add_gate(pair(k), &[QubitId::new(a), QubitId::new(b)])
                .unwrap(),
            Step::Measure(t) => circuit.add_measurement(QubitId::new(t)).unwrap(),
        }
    }
    circuit
}

proptest! {
    #[test]
    fn random_circuits_stay_normalized(
        steps in prop::collection::vec(step(), 1..30),
        draw in 0.0f64..1.0,
    ) {
        let circuit = build(&steps);
        let result = circuit.execute(&mut || draw).unwrap();
        prop_assert!(result.final_state.is_normalized(1e-9));
        prop_assert_eq!(result.measurements.len(), circuit.num_measurements());
    }

    #[test]
    fn noisy_gates_stay_normalized(
        angles in prop::collection::vec(-3.2f64..3.2, 1..10),
        level in 0.0f64..0.5,
        draw in 0.0f64..1.0,
    ) {
        let mut circuit = Circuit::new(2).unwrap();
        for (i, angle) in angles.iter().enumerate() {
            let gate = standard::ry(*angle).with_noise(level).unwrap();
            circuit.add_gate(gate, &[QubitId::new(i % 2)]).unwrap();
        }
        let result = circuit.execute(&mut || draw).unwrap();
        prop_assert!(result.final_state.is_normalized(1e-9));
    }

    #[test]
    fn entropy_is_bounded(steps in prop::collection::vec(step(), 1..20)) {
        let state = build(&steps).execute(&mut || 0.5).unwrap().final_state;
        let entropy = state.reduced_entanglement_entropy(0, 1).unwrap();
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&entropy));
    }
}
