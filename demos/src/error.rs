//! Error type for the demo.

use thiserror::Error;

use qfact_compile::CompileError;
use qfact_hal::HalError;
use qfact_ir::IrError;
use qfact_primitives::ObservableError;

/// Errors that stop a demo run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DemoError {
    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// A circuit could not be adapted to the backend.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The estimator, sampler or backend rejected a job.
    #[error(transparent)]
    Hal(#[from] HalError),

    /// An observable label was malformed.
    #[error(transparent)]
    Observable(#[from] ObservableError),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sampler result lacked the expected register.
    #[error("Sampler result has no register '{0}'")]
    MissingRegister(String),
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
