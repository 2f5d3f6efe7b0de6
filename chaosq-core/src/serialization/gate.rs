//! Gate and operation serialization types

use crate::error_correction::{BitFlipCode, ErrorCorrection, PhaseFlipCode};
use crate::operation::{GateOp, Operation};
use crate::{QuantumError, QubitId, Result};
use chaosq_gates::{library, Gate};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serialized representation of a gate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SerializedGate {
    /// Library gate without parameters (H, X, CNOT, ...)
    Standard { name: String },
    /// Library rotation (RX, RY, RZ, P)
    Parameterized { name: String, parameters: Vec<f64> },
    /// Any other gate, stored by matrix as `[re, im]` pairs
    Custom { name: String, matrix: Vec<[f64; 2]> },
}

impl SerializedGate {
    /// Pick the most compact representation that reproduces `gate`
    pub fn from_gate(gate: &Gate) -> Self {
        let name = gate.name().to_string();

        if !gate.parameters().is_empty() && library::is_parameterized(&name) {
            return Self::Parameterized {
                name,
                parameters: gate.parameters().to_vec(),
            };
        }

        let is_library_gate = library::lookup(&name)
            .map(|g| g.matrix() == gate.matrix())
            .unwrap_or(false);
        if is_library_gate {
            return Self::Standard { name };
        }

        Self::Custom {
            name,
            matrix: gate.matrix().iter().map(|c| [c.re, c.im]).collect(),
        }
    }

    /// Rebuild the (noise-free) gate
    pub fn to_gate(&self) -> Result<Gate> {
        let gate = match self {
            Self::Standard { name } => library::lookup(name)?,
            Self::Parameterized { name, parameters } => {
                library::lookup_parameterized(name, parameters)?
            }
            Self::Custom { name, matrix } => Gate::new(
                name.clone(),
                matrix.iter().map(|&[re, im]| Complex64::new(re, im)).collect(),
            )?,
        };
        Ok(gate)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Standard { name } | Self::Parameterized { name, .. } | Self::Custom { name, .. } => {
                name
            }
        }
    }
}

/// Kind tag of a serialized operation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Gate,
    Measure,
    Correct,
}

/// Flat serialized operation
///
/// Fields not used by `kind` are left at their defaults. Every field is always
/// written so the same type round-trips through both JSON and bincode.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedOperation {
    pub kind: OperationKind,
    #[serde(default)]
    pub gate: Option<SerializedGate>,
    #[serde(default)]
    pub targets: Vec<usize>,
    #[serde(default)]
    pub controls: Vec<usize>,
    #[serde(default)]
    pub noise_level: Option<f64>,
    #[serde(default)]
    pub qubit: Option<usize>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub qubits: Vec<usize>,
}

impl SerializedOperation {
    fn empty(kind: OperationKind) -> Self {
        Self {
            kind,
            gate: None,
            targets: Vec::new(),
            controls: Vec::new(),
            noise_level: None,
            qubit: None,
            code: None,
            qubits: Vec::new(),
        }
    }

    pub fn gate(op: &GateOp) -> Self {
        let gate = op.gate();
        Self {
            gate: Some(SerializedGate::from_gate(gate)),
            targets: op.targets().iter().map(|q| q.index()).collect(),
            controls: op.controls().iter().map(|q| q.index()).collect(),
            noise_level: gate.is_noisy().then(|| gate.noise_level()),
            ..Self::empty(OperationKind::Gate)
        }
    }

    pub fn measure(qubit: QubitId) -> Self {
        Self {
            qubit: Some(qubit.index()),
            ..Self::empty(OperationKind::Measure)
        }
    }

    /// # Errors
    /// `SerializationError` for codes other than the built-in ones
    pub fn correct(code: &dyn ErrorCorrection) -> Result<Self> {
        match code.name() {
            BitFlipCode::NAME | PhaseFlipCode::NAME => Ok(Self {
                code: Some(code.name().to_string()),
                qubits: code.qubits().iter().map(|q| q.index()).collect(),
                ..Self::empty(OperationKind::Correct)
            }),
            other => Err(QuantumError::SerializationError(format!(
                "error-correcting code '{}' has no serialized form",
                other
            ))),
        }
    }

    pub fn from_operation(operation: &Operation) -> Result<Self> {
        match operation {
            Operation::Gate(op) => Ok(Self::gate(op)),
            Operation::Measure(q) => Ok(Self::measure(*q)),
            Operation::Correct(code) => Self::correct(code.as_ref()),
        }
    }
}

fn missing(kind: &str, field: &str) -> QuantumError {
    QuantumError::DeserializationError(format!("{} operation is missing '{}'", kind, field))
}

fn qubit_ids(indices: &[usize]) -> Vec<QubitId> {
    indices.iter().map(|&i| QubitId::new(i)).collect()
}

/// Decoded operation, ready to be appended to a circuit
pub(crate) enum DecodedOperation {
    Gate {
        gate: Gate,
        targets: Vec<QubitId>,
        controls: Vec<QubitId>,
    },
    Measure(QubitId),
    Correct(Arc<dyn ErrorCorrection>),
}

impl SerializedOperation {
    pub(crate) fn decode(&self) -> Result<DecodedOperation> {
        match self.kind {
            OperationKind::Gate => {
                let serialized = self.gate.as_ref().ok_or_else(|| missing("gate", "gate"))?;
                let mut gate = serialized.to_gate().map_err(|e| {
                    QuantumError::DeserializationError(format!(
                        "failed to create gate '{}': {}",
                        serialized.name(),
                        e
                    ))
                })?;
                if let Some(level) = self.noise_level {
                    gate = gate.with_noise(level)?;
                }
                Ok(DecodedOperation::Gate {
                    gate,
                    targets: qubit_ids(&self.targets),
                    controls: qubit_ids(&self.controls),
                })
            }
            OperationKind::Measure => {
                let qubit = self.qubit.ok_or_else(|| missing("measure", "qubit"))?;
                Ok(DecodedOperation::Measure(QubitId::new(qubit)))
            }
            OperationKind::Correct => {
                let name = self.code.as_deref().ok_or_else(|| missing("correct", "code"))?;
                let [q0, q1, q2] = match self.qubits.as_slice() {
                    &[a, b, c] => [QubitId::new(a), QubitId::new(b), QubitId::new(c)],
                    other => {
                        return Err(QuantumError::DeserializationError(format!(
                            "code '{}' needs 3 qubits, found {}",
                            name,
                            other.len()
                        )))
                    }
                };
                let code: Arc<dyn ErrorCorrection> = match name {
                    BitFlipCode::NAME => Arc::new(BitFlipCode::new(q0, q1, q2)?),
                    PhaseFlipCode::NAME => Arc::new(PhaseFlipCode::new(q0, q1, q2)?),
                    other => {
                        return Err(QuantumError::DeserializationError(format!(
                            "unknown error-correcting code '{}'",
                            other
                        )))
                    }
                };
                Ok(DecodedOperation::Correct(code))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosq_gates::standard;

    #[test]
    fn test_gate_representation_choice() {
        assert_eq!(
            SerializedGate::from_gate(&standard::hadamard()),
            SerializedGate::Standard {
                name: "H".to_string()
            }
        );
        assert_eq!(
            SerializedGate::from_gate(&standard::rx(1.5)),
            SerializedGate::Parameterized {
                name: "RX".to_string(),
                parameters: vec![1.5]
            }
        );
        assert!(matches!(
            SerializedGate::from_gate(&standard::t().adjoint()),
            SerializedGate::Custom { .. }
        ));
    }

    #[test]
    fn test_custom_gate_rebuilds() {
        let original = standard::s().adjoint();
        let rebuilt = SerializedGate::from_gate(&original).to_gate().unwrap();
        assert_eq!(rebuilt.name(), original.name());
        assert_eq!(rebuilt.matrix(), original.matrix());
    }

    #[test]
    fn test_unknown_standard_gate() {
        let gate = SerializedGate::Standard {
            name: "WARP".to_string(),
        };
        assert!(matches!(gate.to_gate(), Err(QuantumError::Gate(_))));
    }

    #[test]
    fn test_operation_json_shape() {
        let op = SerializedOperation::measure(QubitId::new(2));
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "measure");
        assert_eq!(json["qubit"], 2);
    }

    #[test]
    fn test_decode_requires_fields() {
        let op = SerializedOperation::empty(OperationKind::Measure);
        assert!(matches!(
            op.decode(),
            Err(QuantumError::DeserializationError(_))
        ));

        let mut correct = SerializedOperation::empty(OperationKind::Correct);
        correct.code = Some("surface".to_string());
        correct.qubits = vec![0, 1, 2];
        assert!(matches!(
            correct.decode(),
            Err(QuantumError::DeserializationError(msg)) if msg.contains("surface")
        ));
    }
}
