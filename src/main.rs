//! Media Renamer - batch photo and video organization by capture metadata

use anyhow::Result;
use clap::Parser;
use dialoguer::Confirm;
use media_renamer::{Cli, Processor};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config()?;
    setup_logging(config.verbose);

    info!(version = env!("CARGO_PKG_VERSION"), "media-renamer starting");

    if !cli.input_path.exists() {
        eprintln!("Input path not found: {}", cli.input_path.display());
        std::process::exit(1);
    }
    if !cli.input_path.is_dir() {
        eprintln!("Input path must be a directory: {}", cli.input_path.display());
        std::process::exit(1);
    }

    if cli.in_place && cli.output.is_some() {
        println!("Warning: --output is ignored when using --in-place");
    }

    // Writing into an existing destination tree needs an explicit go-ahead
    // unless we are previewing or shuffling within the source tree.
    if !cli.in_place && !cli.dry_run && config.output_dir.exists() {
        let proceed = Confirm::new()
            .with_prompt(format!(
                "Output directory '{}' already exists. Continue?",
                config.output_dir.display()
            ))
            .default(false)
            .interact()?;

        if !proceed {
            println!("Operation cancelled");
            return Ok(());
        }
    }

    let mut processor = Processor::new(config);
    match processor.run() {
        Ok(_) => {
            info!(stats = ?processor.stats(), "Run complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Processing failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Structured logs go to stderr so they never mix with the per-file
/// progress lines on stdout.
fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
