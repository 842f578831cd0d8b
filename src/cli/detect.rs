//! Detect command - resolve the indentation for one file

use crate::config::load_settings;
use crate::editorconfig::EditorConfigSource;
use crate::models::{IndentKind, ResolvedIndentation, Source};
use crate::resolver::{CategoryOverride, Resolver};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// What `--format json` prints.
#[derive(Debug, Serialize)]
struct DetectReport {
    file: String,
    indent: IndentKind,
    size: u32,
    sources: Vec<Source>,
}

pub fn run(
    file: &Path,
    format: &str,
    no_editorconfig: bool,
    sample_bytes: Option<usize>,
) -> Result<()> {
    let settings = load_settings(Path::new("."));
    let stdin_mode = file == Path::new("-");

    let sample = if stdin_mode {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        String::from_utf8_lossy(&buf).into_owned()
    } else {
        let bytes = std::fs::read(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        String::from_utf8_lossy(&bytes).into_owned()
    };

    let config_source = if no_editorconfig || !settings.use_editorconfig || stdin_mode {
        EditorConfigSource::disabled()
    } else {
        EditorConfigSource::new()
    };

    let mut resolver = Resolver::new(config_source, settings.default_indentation.validated())
        .with_sample_bytes(sample_bytes.unwrap_or(settings.sample_bytes));
    if settings.makefile_override {
        resolver = resolver.with_category_override(CategoryOverride::makefiles());
    }

    let file_path = if stdin_mode { None } else { Some(file) };
    let resolved = resolver.resolve(file_path, || sample);

    match format {
        "json" => println!("{}", render_json(file, &resolved)?),
        _ => println!("{}", render_text(&resolved)),
    }
    Ok(())
}

fn render_text(resolved: &ResolvedIndentation) -> String {
    resolved.status_line()
}

fn render_json(file: &Path, resolved: &ResolvedIndentation) -> Result<String> {
    let report = DetectReport {
        file: file.display().to_string(),
        indent: resolved.kind,
        size: resolved.size,
        sources: resolved.sources.clone(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
