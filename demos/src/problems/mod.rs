//! Problem definitions for the demo.

pub mod divisors;
pub mod observables;

pub use divisors::divisors_below;
pub use observables::{THETA1, THETA2, THETA3, h1, h2, h3};
