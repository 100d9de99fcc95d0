//! Circuit diagrams.

use std::io::{self, Write};

use console::style;
use qfact_ir::{Circuit, draw_text};

/// Write a titled text drawing of `circuit`.
pub fn render_circuit(out: &mut impl Write, circuit: &Circuit) -> io::Result<()> {
    writeln!(out, "{}", style(circuit.name()).bold())?;
    for line in draw_text(circuit).lines() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)
}
