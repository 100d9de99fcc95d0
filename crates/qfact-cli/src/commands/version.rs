//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - divisor enumeration with quantum simulation",
        style("qfact").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qfact-ir          Circuit intermediate representation");
    println!("  qfact-compile     Transpilation to a backend's basis gates");
    println!("  qfact-hal         Backend abstraction, jobs and counts");
    println!("  qfact-adapter-sim Local statevector simulator");
    println!("  qfact-primitives  Estimator and sampler");
    println!("  qfact-demos       Divisor report and visualizer");
    println!("  qfact-cli         Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
