//! Scan command - classify every file under a path
//!
//! Walks the tree (honoring .gitignore), runs the classifier on each
//! text file, and prints a per-file verdict plus a tally. Useful for
//! auditing how consistent a repository's indentation actually is.

use crate::classifier;
use crate::config::load_settings;
use crate::models::IndentVerdict;
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ScanEntry {
    file: PathBuf,
    verdict: IndentVerdict,
}

#[derive(Debug, Default, Serialize)]
struct ScanSummary {
    tab: usize,
    space: usize,
    mixed: usize,
    unknown: usize,
    total: usize,
}

impl ScanSummary {
    fn count(&mut self, verdict: &IndentVerdict) {
        match verdict {
            IndentVerdict::Tab { .. } => self.tab += 1,
            IndentVerdict::Space { .. } => self.space += 1,
            IndentVerdict::Mixed { .. } => self.mixed += 1,
            IndentVerdict::Unknown => self.unknown += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Serialize)]
struct ScanReport {
    entries: Vec<ScanEntry>,
    summary: ScanSummary,
}

pub fn run(path: &Path, format: &str, max_files: usize) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    let settings = load_settings(Path::new("."));

    let mut entries = Vec::new();
    let mut summary = ScanSummary::default();

    let walker = ignore::WalkBuilder::new(&root)
        .hidden(false)
        .git_ignore(true)
        .build();
    for entry in walker.filter_map(|e| e.ok()) {
        if max_files > 0 && summary.total >= max_files {
            break;
        }
        let file = entry.path();
        if !file.is_file() {
            continue;
        }
        let Some(sample) = read_text_prefix(file, settings.sample_bytes) else {
            continue;
        };

        let verdict = classifier::classify(&sample, settings.sample_bytes);
        let rel = file.strip_prefix(&root).unwrap_or(file).to_path_buf();
        summary.count(&verdict);
        entries.push(ScanEntry { file: rel, verdict });
    }

    match format {
        "json" => {
            let report = ScanReport { entries, summary };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_text(&entries, &summary),
    }
    Ok(())
}

/// Read at most `cap` bytes of a file and hand back its text, or `None`
/// for files that look binary (NUL byte in the prefix).
fn read_text_prefix(path: &Path, cap: usize) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let prefix = &bytes[..bytes.len().min(cap)];
    if prefix.contains(&0) {
        return None;
    }
    Some(String::from_utf8_lossy(prefix).into_owned())
}

fn print_text(entries: &[ScanEntry], summary: &ScanSummary) {
    for entry in entries {
        match entry.verdict {
            IndentVerdict::Unknown => println!(
                "{}  {}",
                entry.file.display(),
                style("unknown").dim()
            ),
            IndentVerdict::Mixed { .. } => println!(
                "{}  {}",
                entry.file.display(),
                style(entry.verdict.to_string()).yellow()
            ),
            _ => println!("{}  {}", entry.file.display(), entry.verdict),
        }
    }

    println!(
        "\n{} {} files: {} space, {} tab, {} mixed, {} unknown",
        style("Scanned").bold(),
        summary.total,
        style(summary.space).green(),
        style(summary.tab).green(),
        style(summary.mixed).yellow(),
        style(summary.unknown).dim(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tally() {
        let mut summary = ScanSummary::default();
        summary.count(&IndentVerdict::Space { width: 4 });
        summary.count(&IndentVerdict::Space { width: 2 });
        summary.count(&IndentVerdict::Tab { width: 1 });
        summary.count(&IndentVerdict::Unknown);
        assert_eq!(summary.space, 2);
        assert_eq!(summary.tab, 1);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_binary_prefix_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("blob.bin");
        std::fs::write(&bin, b"\x00\x01\x02indent").unwrap();
        assert!(read_text_prefix(&bin, 1024).is_none());

        let text = dir.path().join("a.py");
        std::fs::write(&text, "if a:\n    b\n").unwrap();
        assert_eq!(
            read_text_prefix(&text, 1024).as_deref(),
            Some("if a:\n    b\n")
        );
    }
}
