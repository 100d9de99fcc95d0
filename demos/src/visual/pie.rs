//! Factor pie chart, drawn as a legend with one bar per slice.

use std::io::{self, Write};

use console::style;

const BAR_WIDTH: usize = 40;

/// One labeled slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    /// Slice label.
    pub label: String,
    /// Slice weight.
    pub weight: usize,
}

/// One slice per factor, weighted by how often the factor occurs in
/// `factors`.
///
/// Divisor lists hold each value once, so every weight is 1 and the chart
/// is uniform.
pub fn factor_slices(factors: &[u64]) -> Vec<PieSlice> {
    factors
        .iter()
        .map(|f| PieSlice {
            label: f.to_string(),
            weight: factors.iter().filter(|&g| g == f).count(),
        })
        .collect()
}

/// Write the chart titled for `number`.
pub fn render_pie(out: &mut impl Write, number: u64, slices: &[PieSlice]) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        style(format!("Factor distribution for the number {number}")).bold()
    )?;
    let total: usize = slices.iter().map(|s| s.weight).sum();
    if total == 0 {
        return writeln!(out, "  (no factors)");
    }

    let label_width = slices.iter().map(|s| s.label.len()).max().unwrap_or(0);
    for slice in slices {
        let share = slice.weight as f64 / total as f64;
        let bar = ((share * BAR_WIDTH as f64).round() as usize).max(1);
        writeln!(
            out,
            "  {:>label_width$} {} {:.1}%",
            slice.label,
            style("█".repeat(bar)).cyan(),
            share * 100.0
        )?;
    }
    Ok(())
}
