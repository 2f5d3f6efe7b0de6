//! Circuit serialization for persistence and interchange
//!
//! Circuits are written as JSON or bincode. Library gates are stored by name
//! (plus parameters for rotations), other gates by their full matrix. Loading
//! goes through the normal circuit builders, so a loaded circuit is validated
//! exactly like one built in code.

pub mod circuit;
pub mod gate;

pub use circuit::SerializedCircuit;
pub use gate::{OperationKind, SerializedGate, SerializedOperation};

/// Serialization format version
pub const CIRCUIT_FORMAT_VERSION: u32 = 1;
