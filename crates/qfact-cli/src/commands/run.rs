//! Run command implementation.

use std::num::NonZeroU64;
use std::path::PathBuf;

use anyhow::Result;
use console::style;
use tracing::info;

use qfact_demos::DemoConfig;
use qfact_demos::runners::FactorizationDemo;

/// Execute the run command.
pub async fn execute(number: NonZeroU64, image: Option<PathBuf>, seed: Option<u64>) -> Result<()> {
    let mut config = DemoConfig::default().with_number(number);
    config.image_path = image;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    info!("Running demo for {number}");

    let outcome = {
        let mut stdout = std::io::stdout().lock();
        FactorizationDemo::run(&config, &mut stdout).await?
    };

    println!(
        "{} {} divisors, {} Bell shots",
        style("→").cyan().bold(),
        outcome.divisors.len(),
        outcome.bell_counts.total_shots()
    );
    Ok(())
}
