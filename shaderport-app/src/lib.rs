//! Shaderport Application Library
//!
//! This crate contains the configuration, logging, and pipeline driver of
//! the shader porting tool.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;

pub use config::{Cli, Settings};
pub use error::AppError;

use anyhow::{Context, Result};
use clap::Parser;

/// Parses the command line, then lists or ports the shaders it names.
pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;
    logging::init_logger(settings.log_level);
    log::debug!("Loaded settings: {:?}", settings);

    if cli.list {
        for (identifier, kind) in pipeline::list(&settings)? {
            println!("{identifier}\t{kind}");
        }
        return Ok(());
    }

    // Shaders are translated one after another; a single thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    let summary = runtime.block_on(pipeline::run(&settings))?;
    if summary.skipped > 0 {
        log::warn!(
            "{} shader declarations were skipped and are missing from {:?}",
            summary.skipped,
            settings.output
        );
    }
    Ok(())
}
