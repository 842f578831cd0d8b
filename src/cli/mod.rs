//! CLI command definitions and handlers

mod detect;
mod init;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate a sample-size cap (must be positive)
fn parse_sample_bytes(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("sample bytes must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Tabsense - indentation style detection
#[derive(Parser, Debug)]
#[command(name = "tabsense")]
#[command(
    version,
    about = "Detect the indentation style of source files — tabs vs. spaces, and the indent width",
    long_about = "Tabsense scans a sample of a file's content, tallies line-to-line \
indentation deltas, and reports the most likely indent character and width. \
Explicit .editorconfig directives outrank inference; a configured default \
covers files with no evidence at all.",
    after_help = "\
Examples:
  tabsense detect src/main.py              Resolve one file's indentation
  cat src/main.py | tabsense detect -      Classify stdin (content only)
  tabsense detect src/main.py -f json      JSON output for scripting
  tabsense scan .                          Audit a whole tree's indentation
  tabsense init                            Write an example tabsense.toml"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the indentation for one file ("-" reads stdin)
    Detect {
        /// File to examine
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Ignore .editorconfig directives, use content inference only
        #[arg(long)]
        no_editorconfig: bool,

        /// Maximum bytes of the file to scan
        #[arg(long, value_parser = parse_sample_bytes)]
        sample_bytes: Option<usize>,
    },

    /// Classify every file under a path and summarize the styles found
    Scan {
        /// Directory to walk (respects .gitignore)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Maximum files to classify (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_files: usize,
    },

    /// Write an example tabsense.toml config file
    Init,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect {
            file,
            format,
            no_editorconfig,
            sample_bytes,
        } => detect::run(&file, &format, no_editorconfig, sample_bytes),

        Commands::Scan {
            path,
            format,
            max_files,
        } => scan::run(&path, &format, max_files),

        Commands::Init => init::run(),
    }
}
