//! qfact Hardware Abstraction Layer
//!
//! A common [`Backend`] trait for running circuits as jobs, the
//! [`Capabilities`] a backend advertises, and the [`Counts`] histograms it
//! returns inside an [`ExecutionResult`].
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qfact_hal::Backend;
//! use qfact_adapter_sim::SimulatorBackend;
//! use qfact_ir::library::bell;
//!
//! let backend = SimulatorBackend::new();
//! let job_id = backend.submit(&bell()?, 128, None).await?;
//! let result = backend.wait(&job_id).await?;
//! println!("{}", result.counts);
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
