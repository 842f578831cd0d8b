//! Init command - write an example tabsense.toml

use crate::config::SETTINGS_FILE;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const EXAMPLE_CONFIG: &str = r#"# Tabsense configuration

# Used when neither .editorconfig nor the file content settles the
# indentation. `style` is "tab" or "space".
[default_indentation]
style = "space"
size = 4

# How much of a file the classifier scans, in bytes.
sample_bytes = 65536

# Consult .editorconfig files (highest-priority source).
use_editorconfig = true

# Force tab indentation for makefiles.
makefile_override = true
"#;

pub fn run() -> Result<()> {
    let config_path = Path::new(SETTINGS_FILE);
    if config_path.exists() {
        println!(
            "{} {} already exists, leaving it untouched",
            style("✓").green(),
            style(SETTINGS_FILE).cyan()
        );
        return Ok(());
    }

    std::fs::write(config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", SETTINGS_FILE))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(SETTINGS_FILE).cyan()
    );
    Ok(())
}
