//! Target description and the property set shared between passes.

use serde::{Deserialize, Serialize};

/// Names of the operations a target executes natively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a basis from operation names.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if an operation is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the operation names.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// IBM-style basis (RZ + SX + X + CX).
    pub fn ibm() -> Self {
        Self::new(["rz", "sx", "x", "cx", "measure", "barrier", "id"])
    }

    /// Every gate the statevector simulator executes directly.
    pub fn simulator() -> Self {
        Self::new([
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz",
            "p", "cx", "cy", "cz", "swap", "measure", "barrier",
        ])
    }
}

impl std::fmt::Display for BasisGates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.gates.join(", "))
    }
}

/// The device a circuit is compiled for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Target name, used in logs and errors.
    pub name: String,
    /// Number of qubits the target offers.
    pub num_qubits: u32,
    /// Native operations.
    pub basis_gates: BasisGates,
}

impl Target {
    /// Create a target.
    pub fn new(name: impl Into<String>, num_qubits: u32, basis_gates: BasisGates) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            basis_gates,
        }
    }
}

/// Data passes read from and write to while a pass manager runs.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Target being compiled for.
    pub target: Option<Target>,
    /// Number of gates rewritten by basis translation.
    pub translated_gates: usize,
    /// Number of gates removed by rotation merging.
    pub removed_gates: usize,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Basis gates of the configured target.
    pub fn basis_gates(&self) -> Option<&BasisGates> {
        self.target.as_ref().map(|t| &t.basis_gates)
    }
}
