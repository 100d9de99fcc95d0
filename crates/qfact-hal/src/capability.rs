//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// Gates a backend accepts, split by arity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate in the qfact IR.
    pub fn universal() -> Self {
        Self {
            single_qubit: [
                "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz",
                "p",
            ]
            .map(String::from)
            .to_vec(),
            two_qubit: ["cx", "cy", "cz", "swap"].map(String::from).to_vec(),
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().chain(&self.two_qubit).any(|g| g == gate)
    }

    /// All gate names, followed by the non-unitary operations every backend
    /// accepts.
    pub fn basis(&self) -> Vec<String> {
        self.single_qubit
            .iter()
            .chain(&self.two_qubit)
            .cloned()
            .chain(["measure".to_string(), "barrier".to_string()])
            .collect()
    }
}

/// What a backend can run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gates.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether the backend is a simulator.
    pub is_simulator: bool,
    /// Feature flags such as `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "statevector".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "expectation".into()],
        }
    }

    /// Check for a feature flag.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}
