//! qfact command-line interface.
//!
//! ```text
//! qfact run [--number N] [--image PATH] [--no-image] [--seed S]
//! qfact setup
//! qfact version
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::num::NonZeroU64;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{run, setup, version};

/// qfact - divisor enumeration alongside estimator and sampler runs
#[derive(Parser)]
#[command(name = "qfact")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo and print its report
    Run {
        /// Number whose divisors are listed
        #[arg(short, long, default_value = "14400")]
        number: NonZeroU64,

        /// Picture to preview in the report
        #[arg(short, long, default_value = "/mnt/data/image.png")]
        image: PathBuf,

        /// Skip the picture
        #[arg(long, conflicts_with = "image")]
        no_image: bool,

        /// Seed for reproducible sampling
        #[arg(short, long, env = "QFACT_SEED")]
        seed: Option<u64>,
    },

    /// Check the Rust toolchain and install required components
    Setup,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run {
            number,
            image,
            no_image,
            seed,
        } => run::execute(number, (!no_image).then_some(image), seed).await,

        Commands::Setup => setup::execute(),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
