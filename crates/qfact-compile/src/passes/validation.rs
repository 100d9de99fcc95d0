//! Target fitness checks.

use tracing::debug;

use qfact_ir::Circuit;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Rejects circuits that use more qubits than the target offers.
pub struct TargetValidation;

impl Pass for TargetValidation {
    fn name(&self) -> &'static str {
        "TargetValidation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let Some(target) = properties.target.as_ref() else {
            return Ok(());
        };
        debug!(
            "Validating {} qubits against target '{}' ({} qubits)",
            circuit.num_qubits(),
            target.name,
            target.num_qubits
        );
        if circuit.num_qubits() > target.num_qubits as usize {
            return Err(CompileError::CircuitTooLarge {
                target: target.name.clone(),
                required: circuit.num_qubits(),
                available: target.num_qubits,
            });
        }
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.target.is_some()
    }
}
