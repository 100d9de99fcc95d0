//! Text drawings of circuits for terminal output.
//!
//! Each qubit gets one wire drawn with `─` and each classical register one
//! wire drawn with `═`. Instructions are packed into columns the same way
//! [`Circuit::depth`] layers them, so independent gates share a column.
//!
//! ```text
//!   q0: ─H──●──░─M───
//!   q1: ────⊕──░─┼─M─
//! meas: ═════════0═1═
//! ```

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::InstructionKind;

const QUBIT_WIRE: char = '─';
const CLBIT_WIRE: char = '═';

/// Draw `circuit` as text, one line per qubit and per classical register.
pub fn draw_text(circuit: &Circuit) -> String {
    let registers = circuit.registers();
    let num_qubits = circuit.num_qubits();
    let num_rows = num_qubits + registers.len();

    // Map each classical bit to its (register row, index within register).
    let mut clbit_slot = vec![(0usize, 0usize); circuit.num_clbits()];
    for (r, reg) in registers.iter().enumerate() {
        for (i, clbit) in reg.clbits.iter().enumerate() {
            clbit_slot[clbit.index()] = (num_qubits + r, i);
        }
    }

    let mut columns: Vec<Vec<Option<String>>> = Vec::new();
    let mut row_level = vec![0usize; num_rows];

    for inst in circuit.instructions() {
        let mut cells: Vec<(usize, String)> = Vec::new();
        match &inst.kind {
            InstructionKind::Gate(gate) => match gate {
                StandardGate::CX | StandardGate::CY | StandardGate::CZ => {
                    cells.push((inst.qubits[0].index(), "●".to_string()));
                    let target = match gate {
                        StandardGate::CX => "⊕".to_string(),
                        StandardGate::CZ => "●".to_string(),
                        other => other.label(),
                    };
                    cells.push((inst.qubits[1].index(), target));
                }
                StandardGate::Swap => {
                    cells.push((inst.qubits[0].index(), "x".to_string()));
                    cells.push((inst.qubits[1].index(), "x".to_string()));
                }
                single => cells.push((inst.qubits[0].index(), single.label())),
            },
            InstructionKind::Measure => {
                cells.push((inst.qubits[0].index(), "M".to_string()));
                let (row, idx) = clbit_slot[inst.clbits[0].index()];
                cells.push((row, idx.to_string()));
            }
            InstructionKind::Barrier => {
                for q in &inst.qubits {
                    cells.push((q.index(), "░".to_string()));
                }
            }
        }
        if cells.is_empty() {
            continue;
        }

        // Barriers occupy only their own rows; everything else also blocks
        // the rows its vertical connector crosses.
        let (lo, hi) = cells
            .iter()
            .fold((usize::MAX, 0), |(lo, hi), (row, _)| (lo.min(*row), hi.max(*row)));
        let span: Vec<usize> = if inst.is_barrier() {
            cells.iter().map(|(row, _)| *row).collect()
        } else {
            (lo..=hi).collect()
        };

        let level = span.iter().map(|&r| row_level[r]).max().unwrap_or(0);
        for &r in &span {
            row_level[r] = level + 1;
        }
        if columns.len() <= level {
            columns.resize(level + 1, vec![None; num_rows]);
        }
        let column = &mut columns[level];
        for &r in &span {
            let crossing = if r < num_qubits { "┼" } else { "╪" };
            column[r] = Some(crossing.to_string());
        }
        for (row, text) in cells {
            column[row] = Some(text);
        }
    }

    let mut labels: Vec<String> = (0..num_qubits).map(|q| format!("q{q}: ")).collect();
    labels.extend(registers.iter().map(|r| format!("{}: ", r.name)));
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(row, label)| {
            let wire = if row < num_qubits { QUBIT_WIRE } else { CLBIT_WIRE };
            format!("{label:>label_width$}{wire}")
        })
        .collect();

    for column in &columns {
        let width = column
            .iter()
            .flatten()
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(1);
        for (row, line) in lines.iter_mut().enumerate() {
            let wire = if row < num_qubits { QUBIT_WIRE } else { CLBIT_WIRE };
            let cell = column[row].as_deref().unwrap_or("");
            let pad = width - cell.chars().count();
            let left = pad / 2;
            line.extend(std::iter::repeat_n(wire, left));
            line.push_str(cell);
            line.extend(std::iter::repeat_n(wire, pad - left + 1));
        }
    }

    lines.join("\n")
}
