//! flatcopy CLI - concurrent flat-directory file copier
//!
//! Copies every regular file under a source tree into one destination
//! directory with a fixed worker pool, journaling per-file copy times.

use clap::Parser;
use flatcopy::config::{CliArgs, CopyConfig};
use flatcopy::core::CopyEngine;
use flatcopy::error::{IoResultExt, Result};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    // Build configuration
    let config = CopyConfig::from_cli(&args)?;

    // Print configuration if verbose
    if args.verbose > 0 {
        print_config(&config);
    }

    // The destination directory must exist before any worker opens a
    // file inside it.
    create_destination(&config.destination)?;

    // Create and run copy engine
    let engine = CopyEngine::new(config.clone());
    let result = engine.execute()?;

    // Print results
    if !config.quiet {
        result.print_summary();
    }

    // Per-file failures were already reported on stderr and in the
    // summary; only setup and scan failures change the exit status.
    Ok(())
}

fn create_destination(dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest).with_path(dest)
}

fn print_config(config: &CopyConfig) {
    println!("=== Configuration ===");
    println!("Source:      {:?}", config.source);
    println!("Destination: {:?}", config.destination);
    println!("Threads:     {}", config.threads);
    println!(
        "Buffer:      {}",
        humansize::format_size(config.buffer_size as u64, humansize::BINARY)
    );
    println!("Layout:      {:?}", config.layout);
    println!("Journal:     {:?}", config.log_file);
    println!();
}
