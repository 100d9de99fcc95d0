//! Observables and parameter bindings evaluated by the demo.

use qfact_primitives::{ObservableError, SparsePauliOp};

/// Binding for the reps-2 ansatz.
pub const THETA1: [f64; 6] = [0.0, 1.0, 1.0, 2.0, 3.0, 5.0];
/// Binding for the reps-3 ansatz.
pub const THETA2: [f64; 8] = [0.0, 1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0];
/// Second binding for the reps-2 ansatz.
pub const THETA3: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

/// `II + 2·IZ + 3·XI`
pub fn h1() -> Result<SparsePauliOp, ObservableError> {
    SparsePauliOp::from_list([("II", 1.0), ("IZ", 2.0), ("XI", 3.0)])
}

/// `IZ`
pub fn h2() -> Result<SparsePauliOp, ObservableError> {
    SparsePauliOp::from_list([("IZ", 1.0)])
}

/// `ZI + ZZ`
pub fn h3() -> Result<SparsePauliOp, ObservableError> {
    SparsePauliOp::from_list([("ZI", 1.0), ("ZZ", 1.0)])
}
