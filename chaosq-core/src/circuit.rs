//! Quantum circuit representation

use crate::error_correction::ErrorCorrection;
use crate::operation::{GateOp, Operation};
use crate::{QuantumError, QubitId, Result};
use chaosq_gates::Gate;
use std::fmt;
use std::sync::Arc;

/// A quantum circuit
///
/// An ordered list of gates, measurements and correction points over a fixed
/// number of qubits. Every operation is validated on insertion, so a stored
/// circuit only refers to qubits it owns.
///
/// # Example
/// ```
/// use chaosq_core::{Circuit, QubitId};
/// use chaosq_gates::standard;
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.add_gate(standard::hadamard(), &[QubitId::new(0)]).unwrap();
/// circuit
///     .add_gate(standard::cnot(), &[QubitId::new(0), QubitId::new(1)])
///     .unwrap();
/// assert_eq!(circuit.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits
    ///
    /// # Errors
    /// `EmptyCircuit` for zero qubits
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        Ok(Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
        })
    }

    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of operations
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append `gate` on `targets`, conditioned on `controls`
    ///
    /// # Errors
    /// - `InvalidQubit` for an index outside the circuit
    /// - `InvalidQubitCount` if the target count differs from the gate arity
    /// - `DuplicateQubit` / `OverlappingQubit` for repeated qubits
    ///
    /// The circuit is unchanged when an error is returned.
    pub fn add_operation(
        &mut self,
        gate: impl Into<Arc<Gate>>,
        targets: &[QubitId],
        controls: &[QubitId],
    ) -> Result<()> {
        for &qubit in targets.iter().chain(controls) {
            self.check_qubit(qubit)?;
        }

        let op = GateOp::new(gate.into(), targets, controls)?;
        self.operations.push(Operation::Gate(op));
        Ok(())
    }

    /// Append an uncontrolled gate
    pub fn add_gate(&mut self, gate: impl Into<Arc<Gate>>, targets: &[QubitId]) -> Result<()> {
        self.add_operation(gate, targets, &[])
    }

    /// Append a controlled gate
    pub fn add_controlled(
        &mut self,
        gate: impl Into<Arc<Gate>>,
        targets: &[QubitId],
        controls: &[QubitId],
    ) -> Result<()> {
        self.add_operation(gate, targets, controls)
    }

    /// Append a computational basis measurement of `qubit`
    pub fn add_measurement(&mut self, qubit: QubitId) -> Result<()> {
        self.check_qubit(qubit)?;
        self.operations.push(Operation::Measure(qubit));
        Ok(())
    }

    /// Append a measurement of every qubit, lowest index first
    pub fn measure_all(&mut self) {
        self.operations
            .extend((0..self.num_qubits).map(|q| Operation::Measure(QubitId::new(q))));
    }

    /// Append a correction point for `code`
    pub fn add_correction(&mut self, code: impl ErrorCorrection + 'static) -> Result<()> {
        self.add_correction_arc(Arc::new(code))
    }

    /// Append a correction point for a shared code instance
    pub fn add_correction_arc(&mut self, code: Arc<dyn ErrorCorrection>) -> Result<()> {
        for &qubit in code.qubits() {
            self.check_qubit(qubit)?;
        }
        self.operations.push(Operation::Correct(code));
        Ok(())
    }

    /// All operations in execution order
    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn get_operation(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Number of measurement operations
    pub fn num_measurements(&self) -> usize {
        self.operations.iter().filter(|op| op.is_measurement()).count()
    }

    /// True if any gate carries noise (execution then draws from the RNG)
    pub fn has_noise(&self) -> bool {
        self.operations
            .iter()
            .filter_map(Operation::as_gate)
            .any(|op| op.gate().is_noisy())
    }

    /// Remove every operation
    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Re-check every operation against the qubit count
    pub fn validate(&self) -> Result<()> {
        for (i, op) in self.operations.iter().enumerate() {
            for qubit in op.qubits() {
                if qubit.index() >= self.num_qubits {
                    return Err(QuantumError::ValidationError(format!(
                        "Operation {} uses invalid qubit {}",
                        i, qubit
                    )));
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn check_qubit(&self, qubit: QubitId) -> Result<()> {
        if qubit.index() >= self.num_qubits {
            return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, op: Operation) {
        self.operations.push(op);
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit({} qubits, {} operations)", self.num_qubits, self.len())?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_correction::BitFlipCode;
    use chaosq_gates::standard;

    fn q(i: usize) -> QubitId {
        QubitId::new(i)
    }

    #[test]
    fn test_circuit_creation() {
        let circuit = Circuit::new(3).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert!(circuit.is_empty());
        assert_eq!(Circuit::new(0).unwrap_err(), QuantumError::EmptyCircuit);
    }

    #[test]
    fn test_invalid_qubit_leaves_circuit_unchanged() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();

        assert_eq!(
            circuit.add_gate(standard::hadamard(), &[q(2)]).unwrap_err(),
            QuantumError::InvalidQubit(2, 2)
        );
        assert_eq!(
            circuit
                .add_controlled(standard::pauli_x(), &[q(1)], &[q(7)])
                .unwrap_err(),
            QuantumError::InvalidQubit(7, 2)
        );
        assert!(circuit.add_measurement(q(9)).is_err());
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_structural_errors() {
        let mut circuit = Circuit::new(3).unwrap();
        assert!(matches!(
            circuit.add_gate(standard::cnot(), &[q(0)]),
            Err(QuantumError::InvalidQubitCount { .. })
        ));
        assert_eq!(
            circuit.add_gate(standard::cnot(), &[q(1), q(1)]).unwrap_err(),
            QuantumError::DuplicateQubit(q(1))
        );
        assert_eq!(
            circuit
                .add_controlled(standard::pauli_x(), &[q(0)], &[q(0)])
                .unwrap_err(),
            QuantumError::OverlappingQubit(q(0))
        );
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_measurements_and_corrections() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.add_gate(standard::pauli_x(), &[q(1)]).unwrap();
        circuit
            .add_correction(BitFlipCode::new(q(0), q(1), q(2)).unwrap())
            .unwrap();
        circuit.measure_all();

        assert_eq!(circuit.len(), 5);
        assert_eq!(circuit.num_measurements(), 3);
        assert!(matches!(circuit.get_operation(1), Some(Operation::Correct(_))));
        assert!(circuit.validate().is_ok());

        let out_of_range = BitFlipCode::new(q(0), q(1), q(3)).unwrap();
        assert_eq!(
            circuit.add_correction(out_of_range).unwrap_err(),
            QuantumError::InvalidQubit(3, 3)
        );
    }

    #[test]
    fn test_has_noise() {
        let mut circuit = Circuit::new(1).unwrap();
        circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();
        assert!(!circuit.has_noise());

        let noisy = standard::pauli_x().with_noise(0.01).unwrap();
        circuit.add_gate(noisy, &[q(0)]).unwrap();
        assert!(circuit.has_noise());

        circuit.clear();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_display() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.add_gate(standard::hadamard(), &[q(0)]).unwrap();
        circuit.add_measurement(q(0)).unwrap();

        let text = circuit.to_string();
        assert!(text.starts_with("Circuit(2 qubits, 2 operations)"));
        assert!(text.contains("0: H q0"));
        assert!(text.contains("1: MEASURE q0"));
    }

    #[test]
    fn test_circuit_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Circuit>();
    }
}
