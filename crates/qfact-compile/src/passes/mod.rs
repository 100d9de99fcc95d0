//! Built-in compilation passes.

mod optimize;
mod translation;
mod validation;

pub use optimize::Optimize1qRotations;
pub use translation::BasisTranslation;
pub use validation::TargetValidation;
