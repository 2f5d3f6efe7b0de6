//! Circuit serialization types

use crate::circuit::Circuit;
use crate::serialization::gate::{DecodedOperation, SerializedOperation};
use crate::serialization::CIRCUIT_FORMAT_VERSION;
use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};

/// Serialized circuit representation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedCircuit {
    /// Format version for compatibility checking
    pub version: u32,
    pub num_qubits: usize,
    pub operations: Vec<SerializedOperation>,
}

impl SerializedCircuit {
    pub fn new(num_qubits: usize, operations: Vec<SerializedOperation>) -> Self {
        Self {
            version: CIRCUIT_FORMAT_VERSION,
            num_qubits,
            operations,
        }
    }

    /// Reject data written by a newer format version
    pub fn check_version(&self) -> Result<()> {
        if self.version > CIRCUIT_FORMAT_VERSION {
            return Err(QuantumError::VersionMismatch {
                expected: CIRCUIT_FORMAT_VERSION,
                actual: self.version,
            });
        }
        Ok(())
    }

    /// Capture `circuit`
    ///
    /// # Errors
    /// `SerializationError` if a correction point uses a code with no
    /// serialized form
    pub fn from_circuit(circuit: &Circuit) -> Result<Self> {
        let operations = circuit
            .operations()
            .iter()
            .map(SerializedOperation::from_operation)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(circuit.num_qubits(), operations))
    }

    /// Rebuild a circuit, validating every operation as it is appended
    pub fn to_circuit(&self) -> Result<Circuit> {
        self.check_version()?;

        let mut circuit = Circuit::with_capacity(self.num_qubits, self.operations.len())?;
        for op in &self.operations {
            match op.decode()? {
                DecodedOperation::Gate {
                    gate,
                    targets,
                    controls,
                } => circuit.add_operation(gate, &targets, &controls)?,
                DecodedOperation::Measure(qubit) => circuit.add_measurement(qubit)?,
                DecodedOperation::Correct(code) => circuit.add_correction_arc(code)?,
            }
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Serialize to compact JSON
    ///
    /// # Example
    /// ```
    /// use chaosq_core::{Circuit, QubitId};
    /// use chaosq_gates::standard;
    ///
    /// let mut circuit = Circuit::new(1).unwrap();
    /// circuit.add_gate(standard::hadamard(), &[QubitId::new(0)]).unwrap();
    ///
    /// let json = circuit.to_json().unwrap();
    /// let restored = Circuit::from_json(&json).unwrap();
    /// assert_eq!(restored.len(), 1);
    /// ```
    pub fn to_json(&self) -> Result<String> {
        let serialized = SerializedCircuit::from_circuit(self)?;
        serde_json::to_string(&serialized).map_err(|e| {
            QuantumError::SerializationError(format!("JSON serialization failed: {}", e))
        })
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        let serialized = SerializedCircuit::from_circuit(self)?;
        serde_json::to_string_pretty(&serialized).map_err(|e| {
            QuantumError::SerializationError(format!("JSON serialization failed: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let serialized: SerializedCircuit = serde_json::from_str(json).map_err(|e| {
            QuantumError::DeserializationError(format!("JSON deserialization failed: {}", e))
        })?;
        serialized.to_circuit()
    }

    /// Serialize to bincode
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let serialized = SerializedCircuit::from_circuit(self)?;
        bincode::serialize(&serialized).map_err(|e| {
            QuantumError::SerializationError(format!("Binary serialization failed: {}", e))
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let serialized: SerializedCircuit = bincode::deserialize(bytes).map_err(|e| {
            QuantumError::DeserializationError(format!("Binary deserialization failed: {}", e))
        })?;
        serialized.to_circuit()
    }
}
