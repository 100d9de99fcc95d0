//! qfact demo library.
//!
//! Pairs a trial-division divisor enumeration with independent estimator
//! and sampler runs on the local simulator, then renders everything as a
//! terminal report:
//!
//! - **Expectation values** of `RealAmplitudes` ansätze against fixed
//!   Pauli observables
//! - **Counts** for a Bell pair and the measured ansätze
//! - **Divisors** of the configured number, with a pie chart
//! - **Circuit diagrams** and an optional picture
//!
//! The quantum results never feed into the divisor computation; both meet
//! only in the report.
//!
//! ```no_run
//! use qfact_demos::{DemoConfig, runners::FactorizationDemo};
//!
//! # async fn demo() -> Result<(), qfact_demos::DemoError> {
//! let config = DemoConfig::default().with_seed(7);
//! let outcome = FactorizationDemo::run(&config, &mut std::io::stdout()).await?;
//! assert_eq!(outcome.divisors.len(), 62);
//! # Ok(())
//! # }
//! ```

pub mod circuits;
pub mod config;
pub mod error;
pub mod problems;
pub mod runners;
pub mod visual;

pub use config::DemoConfig;
pub use error::{DemoError, DemoResult};

use std::io::{self, Write};
use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for a running job, hidden when stderr is not a terminal.
pub fn create_spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print a demo header.
pub fn print_header(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style("═".repeat(60)).cyan())?;
    writeln!(out, "{}", style(format!("  {title}")).cyan().bold())?;
    writeln!(out, "{}", style("═".repeat(60)).cyan())?;
    writeln!(out)
}

/// Print a demo section.
pub fn print_section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(format!("▶ {title}")).green().bold())?;
    writeln!(out, "{}", style("─".repeat(40)).dim())
}

/// Print a result line.
pub fn print_result(out: &mut impl Write, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "  {} {}", style(format!("{label}:")).dim(), value)
}

/// Print a success message.
pub fn print_success(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("✓").green().bold(), message)
}

/// Print a notice that does not stop the run.
pub fn print_notice(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("!").yellow().bold(), message)
}
