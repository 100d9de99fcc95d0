//! Estimator and sampler primitives.
//!
//! Both primitives take batches of *pubs* (primitive unified blocs): a
//! circuit plus the bindings and settings to run it with. Results come back
//! one per pub, in submission order.
//!
//! # Example
//!
//! ```no_run
//! use qfact_primitives::{Estimator, EstimatorPub, SparsePauliOp};
//! use qfact_ir::library::real_amplitudes;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let psi = real_amplitudes(2, 2)?;
//! let h = SparsePauliOp::from_list([("ZI", 1.0), ("ZZ", 1.0)])?;
//! let pub_ = EstimatorPub::new(psi, vec![h])
//!     .with_parameter_values(vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]]);
//!
//! let results = Estimator::with_seed(7).run(&[pub_], Some(0.01))?;
//! assert_eq!(results[0].evs.shape(), &[1, 1]);
//! # Ok(())
//! # }
//! ```

mod binding;
mod estimator;
mod observable;
mod sampler;

pub use binding::ParameterValues;
pub use estimator::{
    Estimator, EstimatorMetadata, EstimatorPub, EstimatorPubResult, Observables,
};
pub use observable::{ObservableError, Pauli, SparsePauliOp};
pub use sampler::{DEFAULT_SHOTS, Sampler, SamplerPub, SamplerPubResult};
