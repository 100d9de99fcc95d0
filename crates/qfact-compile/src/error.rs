//! Error types for the compiler.

use qfact_ir::IrError;
use thiserror::Error;

/// Errors that can occur while transpiling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// IR error raised while rebuilding a circuit.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// A gate has no translation into the target basis.
    #[error("Gate '{gate}' cannot be expressed in basis [{basis}]")]
    GateNotInBasis {
        /// Name of the offending gate.
        gate: String,
        /// Comma-separated target basis.
        basis: String,
    },

    /// The circuit needs more qubits than the target provides.
    #[error("Circuit requires {required} qubits but target '{target}' has {available}")]
    CircuitTooLarge {
        /// Target name.
        target: String,
        /// Qubits used by the circuit.
        required: usize,
        /// Qubits offered by the target.
        available: u32,
    },

    /// A translation pass ran without a basis configured.
    #[error("Basis gates not specified")]
    MissingBasisGates,
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
