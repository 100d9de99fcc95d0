//! Local statevector simulator for qfact.
//!
//! The simulator keeps the full state in memory and is exact: expectation
//! values come straight from the amplitudes, and shot counts are drawn from
//! the final Born distribution.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```no_run
//! use qfact_adapter_sim::SimulatorBackend;
//! use qfact_hal::Backend;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SimulatorBackend::with_seed(7);
//! let circuit = qfact_ir::library::bell()?;
//! let job_id = backend.submit(&circuit, 128, None).await?;
//! let result = backend.wait(&job_id).await?;
//!
//! // Roughly half '00' and half '11'.
//! println!("{}", result.counts);
//! # Ok(())
//! # }
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend, statevector};
pub use statevector::Statevector;
