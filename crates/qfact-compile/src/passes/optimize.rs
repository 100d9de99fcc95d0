//! Single-qubit rotation merging.

use tracing::debug;

use qfact_ir::{Circuit, Instruction, InstructionKind, ParameterExpression, StandardGate};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Angles below this magnitude count as zero.
const ZERO_ANGLE: f64 = 1e-12;

/// Merges adjacent same-axis rotations on a qubit and drops zero rotations.
///
/// Two rotations are adjacent when no other instruction touches the qubit
/// between them. Measurements and barriers break adjacency. A rotation is
/// only dropped when its angle is a concrete zero.
pub struct Optimize1qRotations;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
    Phase,
}

fn rotation(gate: &StandardGate) -> Option<(Axis, &ParameterExpression)> {
    match gate {
        StandardGate::Rx(p) => Some((Axis::X, p)),
        StandardGate::Ry(p) => Some((Axis::Y, p)),
        StandardGate::Rz(p) => Some((Axis::Z, p)),
        StandardGate::P(p) => Some((Axis::Phase, p)),
        _ => None,
    }
}

fn combine(a: &ParameterExpression, b: &ParameterExpression) -> ParameterExpression {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => ParameterExpression::Constant(x + y),
        _ => a.clone() + b.clone(),
    }
}

fn is_zero_rotation(inst: &Instruction) -> bool {
    inst.as_gate()
        .and_then(rotation)
        .and_then(|(_, angle)| angle.as_f64())
        .is_some_and(|v| v.abs() < ZERO_ANGLE)
}

impl Pass for Optimize1qRotations {
    fn name(&self) -> &'static str {
        "Optimize1qRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut out: Vec<Instruction> = Vec::with_capacity(circuit.instructions().len());
        // Index into `out` of the last instruction on each qubit, if that
        // instruction is a rotation still open for merging.
        let mut open: Vec<Option<usize>> = vec![None; circuit.num_qubits()];

        for inst in circuit.instructions() {
            let single_rotation = inst.as_gate().and_then(rotation).filter(|_| inst.qubits.len() == 1);
            let Some((axis, angle)) = single_rotation else {
                for q in &inst.qubits {
                    open[q.index()] = None;
                }
                out.push(inst.clone());
                continue;
            };

            let q = inst.qubits[0].index();
            if let Some(idx) = open[q] {
                if let InstructionKind::Gate(prev) = &out[idx].kind {
                    if let Some((prev_axis, prev_angle)) = rotation(prev) {
                        if prev_axis == axis {
                            let merged = combine(prev_angle, angle);
                            out[idx].kind = InstructionKind::Gate(prev.map_parameter(|_| merged));
                            continue;
                        }
                    }
                }
            }
            open[q] = Some(out.len());
            out.push(inst.clone());
        }

        let before = out.len();
        out.retain(|inst| !is_zero_rotation(inst));
        let removed = circuit.instructions().len() - out.len();
        debug!(
            "Merged rotations: {} -> {} instructions ({} zero rotations dropped)",
            circuit.instructions().len(),
            out.len(),
            before - out.len()
        );
        properties.removed_gates += removed;
        *circuit = circuit.with_instructions(out)?;
        Ok(())
    }
}
