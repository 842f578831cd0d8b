//! Tool configuration
//!
//! Loads per-project settings from a `tabsense.toml` in the working
//! directory. A missing file means defaults; a malformed file is warned
//! about and replaced by defaults, never fatal.
//!
//! # Configuration Format
//!
//! ```toml
//! # tabsense.toml
//!
//! # Used when neither .editorconfig nor the file content settles the
//! # indentation. `style` is "tab" or "space".
//! [default_indentation]
//! style = "space"
//! size = 4
//!
//! # How much of a file the classifier scans, in bytes.
//! sample_bytes = 65536
//!
//! # Consult .editorconfig files (highest-priority source).
//! use_editorconfig = true
//!
//! # Force tab indentation for makefiles.
//! makefile_override = true
//! ```

use crate::classifier::DEFAULT_SAMPLE_BYTES;
use crate::models::IndentKind;
use crate::resolver::DefaultIndentation;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const SETTINGS_FILE: &str = "tabsense.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_indentation: DefaultIndentationSetting,

    #[serde(default = "default_sample_bytes")]
    pub sample_bytes: usize,

    #[serde(default = "default_true")]
    pub use_editorconfig: bool,

    #[serde(default = "default_true")]
    pub makefile_override: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_indentation: DefaultIndentationSetting::default(),
            sample_bytes: DEFAULT_SAMPLE_BYTES,
            use_editorconfig: true,
            makefile_override: true,
        }
    }
}

/// The raw, not-yet-validated default indentation as written in the
/// settings file.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultIndentationSetting {
    pub style: String,
    pub size: i64,
}

impl Default for DefaultIndentationSetting {
    fn default() -> Self {
        DefaultIndentationSetting {
            style: "space".to_string(),
            size: 4,
        }
    }
}

impl DefaultIndentationSetting {
    /// Validate into a usable default. A misconfigured default is a
    /// user defect: it is warned about here, once at load time, and
    /// replaced by the built-in space/4 rather than silently producing
    /// a broken indentation downstream.
    pub fn validated(&self) -> DefaultIndentation {
        let builtin = DefaultIndentation::default();

        let style = self.style.to_ascii_lowercase();
        let kind = if style.starts_with("tab") {
            Some(IndentKind::Tab)
        } else if style.starts_with("space") {
            Some(IndentKind::Space)
        } else {
            None
        };
        let Some(kind) = kind else {
            warn!(
                "unrecognized default indentation style '{}', using {}/{}",
                self.style, builtin.kind, builtin.size
            );
            return builtin;
        };

        if self.size <= 0 {
            warn!(
                "default indentation size must be positive, got {}; using {}",
                self.size, builtin.size
            );
            return DefaultIndentation {
                kind,
                size: builtin.size,
            };
        }

        DefaultIndentation {
            kind,
            size: self.size as u32,
        }
    }
}

fn default_sample_bytes() -> usize {
    DEFAULT_SAMPLE_BYTES
}

fn default_true() -> bool {
    true
}

/// Load settings from `dir/tabsense.toml`, falling back to defaults.
pub fn load_settings(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Settings::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(settings) => {
                debug!("loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                warn!("failed to parse {}: {}", path.display(), err);
                Settings::default()
            }
        },
        Err(err) => {
            warn!("failed to read {}: {}", path.display(), err);
            Settings::default()
        }
    }
}
