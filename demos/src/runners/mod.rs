//! Demo runners.

pub mod factorization;

pub use factorization::{DemoOutcome, FactorizationDemo};
