//! Standard gate set.

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterExpression;

/// Gates the simulator and compiler understand natively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Paulis
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Fixed single-qubit gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Rotations
    /// Rotation around the X axis.
    Rx(ParameterExpression),
    /// Rotation around the Y axis.
    Ry(ParameterExpression),
    /// Rotation around the Z axis.
    Rz(ParameterExpression),
    /// Phase gate.
    P(ParameterExpression),

    // Two-qubit gates, control first
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Lowercase gate name, as used in basis sets and operation counts.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::I => "id",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::H => "h",
            Self::S => "s",
            Self::Sdg => "sdg",
            Self::T => "t",
            Self::Tdg => "tdg",
            Self::SX => "sx",
            Self::SXdg => "sxdg",
            Self::Rx(_) => "rx",
            Self::Ry(_) => "ry",
            Self::Rz(_) => "rz",
            Self::P(_) => "p",
            Self::CX => "cx",
            Self::CY => "cy",
            Self::CZ => "cz",
            Self::Swap => "swap",
        }
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Self::CX | Self::CY | Self::CZ | Self::Swap => 2,
            _ => 1,
        }
    }

    /// The gate's angle, if it has one.
    pub fn parameter(&self) -> Option<&ParameterExpression> {
        match self {
            Self::Rx(p) | Self::Ry(p) | Self::Rz(p) | Self::P(p) => Some(p),
            _ => None,
        }
    }

    /// Whether the gate's angle still contains free parameters.
    pub fn is_parameterized(&self) -> bool {
        self.parameter().is_some_and(ParameterExpression::is_symbolic)
    }

    /// Rebuild the gate with its angle transformed by `f`.
    ///
    /// Gates without an angle are returned unchanged.
    pub fn map_parameter(&self, f: impl FnOnce(&ParameterExpression) -> ParameterExpression) -> Self {
        match self {
            Self::Rx(p) => Self::Rx(f(p)),
            Self::Ry(p) => Self::Ry(f(p)),
            Self::Rz(p) => Self::Rz(f(p)),
            Self::P(p) => Self::P(f(p)),
            other => other.clone(),
        }
    }

    /// Short label for circuit drawings, including the angle when present.
    pub fn label(&self) -> String {
        let upper = match self {
            Self::I => "I",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::H => "H",
            Self::S => "S",
            Self::Sdg => "Sdg",
            Self::T => "T",
            Self::Tdg => "Tdg",
            Self::SX => "√X",
            Self::SXdg => "√Xdg",
            Self::Rx(_) => "Rx",
            Self::Ry(_) => "Ry",
            Self::Rz(_) => "Rz",
            Self::P(_) => "P",
            Self::CX => "X",
            Self::CY => "Y",
            Self::CZ => "Z",
            Self::Swap => "x",
        };
        match self.parameter() {
            Some(ParameterExpression::Constant(v)) => format!("{upper}({v:.3})"),
            Some(p) => format!("{upper}({p})"),
            None => upper.to_string(),
        }
    }
}
