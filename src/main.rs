//! Tabsense - indentation style detection CLI
//!
//! Guesses tabs vs. spaces and the indent width from file content,
//! merged with .editorconfig directives and a configured default.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = tabsense::cli::Cli::parse();
    tabsense::cli::run(cli)
}
