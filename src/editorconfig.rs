//! .editorconfig lookup
//!
//! Reads the subset of EditorConfig this tool cares about:
//! `indent_style` and `indent_size`. Files named `.editorconfig` are
//! collected from the target's directory upward (stopping above a file
//! declaring `root = true`) and applied outermost first, so the section
//! nearest the file wins. Section globs are matched with `globset`.
//!
//! Everything here is best-effort: unreadable files, bad globs, and
//! unrecognized values all degrade to "no information" rather than
//! failing a resolution.

use crate::models::{IndentKind, PartialIndentation};
use crate::resolver::ExplicitConfigSource;
use globset::GlobBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
enum EditorConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot determine directory of {}", .0.display())]
    NoParent(PathBuf),
}

/// [`ExplicitConfigSource`] backed by on-disk `.editorconfig` files.
pub struct EditorConfigSource {
    enabled: bool,
}

impl EditorConfigSource {
    pub fn new() -> Self {
        EditorConfigSource { enabled: true }
    }

    /// A source that always reports no information; used when the user
    /// turned editorconfig support off.
    pub fn disabled() -> Self {
        EditorConfigSource { enabled: false }
    }
}

impl Default for EditorConfigSource {
    fn default() -> Self {
        EditorConfigSource::new()
    }
}

impl ExplicitConfigSource for EditorConfigSource {
    fn lookup(&self, path: &Path) -> PartialIndentation {
        if !self.enabled {
            return PartialIndentation::default();
        }
        match lookup_on_disk(path) {
            Ok(partial) => partial,
            Err(err) => {
                debug!("editorconfig lookup failed for {}: {err}", path.display());
                PartialIndentation::default()
            }
        }
    }
}

fn lookup_on_disk(path: &Path) -> Result<PartialIndentation, EditorConfigError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| EditorConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .join(path)
    };
    let start_dir = absolute
        .parent()
        .ok_or_else(|| EditorConfigError::NoParent(absolute.clone()))?;

    // Innermost first while walking up, stopping above a root file.
    let mut configs: Vec<(PathBuf, ParsedConfig)> = Vec::new();
    for dir in start_dir.ancestors() {
        let candidate = dir.join(".editorconfig");
        if !candidate.is_file() {
            continue;
        }
        let content =
            std::fs::read_to_string(&candidate).map_err(|source| EditorConfigError::Read {
                path: candidate.clone(),
                source,
            })?;
        let parsed = parse(&content);
        let is_root = parsed.root;
        configs.push((dir.to_path_buf(), parsed));
        if is_root {
            break;
        }
    }

    // Apply outermost first so closer sections override farther ones.
    let mut partial = PartialIndentation::default();
    for (dir, config) in configs.into_iter().rev() {
        let rel = absolute
            .strip_prefix(&dir)
            .unwrap_or(absolute.as_path())
            .to_string_lossy()
            .replace('\\', "/");
        let file_name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        for section in &config.sections {
            if section_matches(&section.pattern, &rel, &file_name) {
                // Later sections in the same file win outright.
                if section.indent_style.is_some() {
                    partial.kind = section.indent_style;
                }
                if section.indent_size.is_some() {
                    partial.size = section.indent_size;
                }
            }
        }
    }
    Ok(partial)
}

#[derive(Debug, Default)]
struct ParsedConfig {
    root: bool,
    sections: Vec<Section>,
}

#[derive(Debug)]
struct Section {
    pattern: String,
    indent_style: Option<IndentKind>,
    indent_size: Option<u32>,
}

/// Parse one `.editorconfig` file. INI-style: a preamble (where only
/// `root` matters), then `[glob]` sections of `key = value` pairs.
/// Unrecognized keys and unusable values are skipped.
fn parse(content: &str) -> ParsedConfig {
    let mut config = ParsedConfig::default();
    let mut current: Option<Section> = None;

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if let Some(section) = current.take() {
                config.sections.push(section);
            }
            current = Some(Section {
                pattern: line[1..line.len() - 1].to_string(),
                indent_style: None,
                indent_size: None,
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();

        match current.as_mut() {
            None => {
                if key == "root" && value == "true" {
                    config.root = true;
                }
            }
            Some(section) => match key.as_str() {
                "indent_style" => {
                    section.indent_style = match value.as_str() {
                        "tab" => Some(IndentKind::Tab),
                        "space" => Some(IndentKind::Space),
                        _ => None,
                    };
                }
                "indent_size" => {
                    // `indent_size = tab` and other non-numeric values
                    // are treated as unknown.
                    section.indent_size = value.parse::<u32>().ok().filter(|&n| n > 0);
                }
                _ => {}
            },
        }
    }
    if let Some(section) = current.take() {
        config.sections.push(section);
    }
    config
}

/// Match a section glob against the target. Patterns containing a slash
/// match against the path relative to the `.editorconfig` directory;
/// bare patterns match the file name alone, per the EditorConfig
/// convention.
fn section_matches(pattern: &str, rel_path: &str, file_name: &str) -> bool {
    let (pattern, target) = if pattern.contains('/') {
        (pattern.trim_start_matches('/'), rel_path)
    } else {
        (pattern, file_name)
    };
    match GlobBuilder::new(pattern).literal_separator(false).build() {
        Ok(glob) => glob.compile_matcher().is_match(target),
        Err(err) => {
            debug!("unusable editorconfig glob '{pattern}': {err}");
            false
        }
    }
}
