//! Ready-made circuits.

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// Base name of the parameter vector used by [`real_amplitudes`].
pub const THETA: &str = "θ";

/// Hardware-efficient ansatz of RY layers separated by CX entanglers.
///
/// The circuit starts with an RY rotation on every qubit. Each of the `reps`
/// repetitions then applies a reverse-linear CX chain
/// (`CX(n-2, n-1)`, …, `CX(0, 1)`) followed by another RY layer. The
/// `num_qubits * (reps + 1)` angles are named `θ[0]`, `θ[1]`, … in the order
/// they are placed.
///
/// # Errors
///
/// Returns [`IrError::InvalidInstruction`] for a circuit without qubits.
pub fn real_amplitudes(num_qubits: u32, reps: usize) -> IrResult<Circuit> {
    if num_qubits == 0 {
        return Err(IrError::InvalidInstruction(
            "RealAmplitudes needs at least one qubit".into(),
        ));
    }

    let mut circuit = Circuit::with_size("RealAmplitudes", num_qubits, 0);
    let mut next = 0usize;
    let mut rotation_layer = |circuit: &mut Circuit| -> IrResult<()> {
        for q in 0..num_qubits {
            circuit.ry(ParameterExpression::indexed(THETA, next), QubitId(q))?;
            next += 1;
        }
        Ok(())
    };

    rotation_layer(&mut circuit)?;
    for _ in 0..reps {
        for control in (0..num_qubits.saturating_sub(1)).rev() {
            circuit.cx(QubitId(control), QubitId(control + 1))?;
        }
        rotation_layer(&mut circuit)?;
    }
    Ok(circuit)
}

/// Two-qubit Bell pair with every qubit measured into `meas`.
pub fn bell() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("bell", 2, 0);
    circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
    circuit.measure_all()?;
    Ok(circuit)
}
