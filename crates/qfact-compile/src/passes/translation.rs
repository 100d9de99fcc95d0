//! Basis translation.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use tracing::debug;

use qfact_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

/// Rewrites gates outside the target basis.
///
/// Rules target the RZ + SX + X + CX family and hold up to a global phase.
/// Symbolic angles are carried into the rewritten rotations. A gate whose
/// rewrite still needs something the basis lacks fails with
/// [`CompileError::GateNotInBasis`].
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = properties
            .basis_gates()
            .ok_or(CompileError::MissingBasisGates)?
            .clone();

        let mut rewritten = Vec::with_capacity(circuit.instructions().len());
        let mut translated = 0;
        for inst in circuit.instructions() {
            match inst.as_gate() {
                Some(gate) if !basis.contains(gate.name()) => {
                    let replacement = translate(gate, &inst.qubits);
                    if let Some(missing) = replacement
                        .iter()
                        .find(|r| !basis.contains(r.name()))
                    {
                        debug!("No rule maps {} into basis (needs {})", gate.name(), missing.name());
                        return Err(not_in_basis(gate, &basis));
                    }
                    translated += 1;
                    rewritten.extend(replacement);
                }
                _ => rewritten.push(inst.clone()),
            }
        }

        debug!("Translated {translated} gates into [{basis}]");
        properties.translated_gates += translated;
        *circuit = circuit.with_instructions(rewritten)?;
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.basis_gates().is_some()
    }
}

fn not_in_basis(gate: &StandardGate, basis: &BasisGates) -> CompileError {
    CompileError::GateNotInBasis {
        gate: gate.name().to_string(),
        basis: basis.to_string(),
    }
}

fn rz(angle: impl Into<ParameterExpression>, q: QubitId) -> Instruction {
    Instruction::gate(StandardGate::Rz(angle.into()), [q])
}

fn sx(q: QubitId) -> Instruction {
    Instruction::gate(StandardGate::SX, [q])
}

fn cx(control: QubitId, target: QubitId) -> Instruction {
    Instruction::gate(StandardGate::CX, [control, target])
}

fn hadamard(q: QubitId) -> [Instruction; 3] {
    [rz(FRAC_PI_2, q), sx(q), rz(FRAC_PI_2, q)]
}

/// `θ + π`, folded when `θ` is concrete.
fn shifted_by_pi(theta: &ParameterExpression) -> ParameterExpression {
    match theta.as_f64() {
        Some(v) => ParameterExpression::Constant(v + PI),
        None => theta.clone() + ParameterExpression::pi(),
    }
}

/// Instructions listed in execution order.
fn translate(gate: &StandardGate, qubits: &[QubitId]) -> Vec<Instruction> {
    let q0 = qubits[0];
    match gate {
        StandardGate::I => vec![],
        StandardGate::X => vec![Instruction::gate(StandardGate::X, [q0])],
        StandardGate::Y => vec![rz(PI, q0), Instruction::gate(StandardGate::X, [q0])],
        StandardGate::Z => vec![rz(PI, q0)],
        StandardGate::H => hadamard(q0).to_vec(),
        StandardGate::S => vec![rz(FRAC_PI_2, q0)],
        StandardGate::Sdg => vec![rz(-FRAC_PI_2, q0)],
        StandardGate::T => vec![rz(FRAC_PI_4, q0)],
        StandardGate::Tdg => vec![rz(-FRAC_PI_4, q0)],
        StandardGate::SX => vec![sx(q0)],
        // SX³ = SX†
        StandardGate::SXdg => vec![sx(q0), Instruction::gate(StandardGate::X, [q0])],
        StandardGate::Rx(theta) => vec![
            rz(FRAC_PI_2, q0),
            sx(q0),
            rz(shifted_by_pi(theta), q0),
            sx(q0),
            rz(FRAC_PI_2, q0),
        ],
        StandardGate::Ry(theta) => vec![sx(q0), rz(shifted_by_pi(theta), q0), sx(q0), rz(PI, q0)],
        StandardGate::Rz(theta) | StandardGate::P(theta) => vec![rz(theta.clone(), q0)],
        StandardGate::CX => vec![cx(q0, qubits[1])],
        StandardGate::CY => {
            let q1 = qubits[1];
            vec![rz(-FRAC_PI_2, q1), cx(q0, q1), rz(FRAC_PI_2, q1)]
        }
        StandardGate::CZ => {
            let q1 = qubits[1];
            let mut out = hadamard(q1).to_vec();
            out.push(cx(q0, q1));
            out.extend(hadamard(q1));
            out
        }
        StandardGate::Swap => {
            let q1 = qubits[1];
            vec![cx(q0, q1), cx(q1, q0), cx(q0, q1)]
        }
    }
}
