//! Indentation classifier
//!
//! Scans a bounded prefix of a text buffer line by line, tallies
//! line-to-line indentation deltas into per-style histograms, and picks
//! the statistical mode as the inferred indent width. Pure in-memory
//! computation: no I/O, never fails, worst case returns
//! [`IndentVerdict::Unknown`].

use crate::models::IndentVerdict;
use memchr::memrchr;
use std::collections::BTreeMap;

/// Default cap on how much of a buffer is scanned (64 KiB).
pub const DEFAULT_SAMPLE_BYTES: usize = 64 * 1024;

/// Largest space-indent step accepted as one deliberate indent level.
/// Bigger jumps are alignment (continuation lines, aligned arguments),
/// not indentation.
const MAX_SPACE_UNIT: u32 = 8;

/// Mixed-style lines count as decisive once they exceed this fraction
/// (1/5) of all indentation evidence.
const MIXED_LINE_DIVISOR: usize = 5;

/// Tab stop assumed for files that interleave tabs and spaces; 8 is the
/// convention such files are written against.
const MIXED_TAB_STOP: u32 = 8;

/// Space width reported for a mixed file whose space deltas never
/// produced a usable mode.
const MIXED_SPACE_FALLBACK: u32 = 4;

/// Leading whitespace of one physical line, decomposed into the tab run
/// followed by the space run. A line with no indentation is
/// `{ tabs: 0, spaces: 0 }` and is a valid comparison baseline for both
/// styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineIndent {
    tabs: u32,
    spaces: u32,
}

impl LineIndent {
    fn is_mixed(&self) -> bool {
        self.tabs > 0 && self.spaces > 0
    }
}

/// Occurrence counts of observed indentation-width deltas. Iteration is
/// width-ascending so mode ties resolve to the smallest width, the more
/// conventional indent unit.
#[derive(Debug, Default)]
struct DeltaHistogram {
    counts: BTreeMap<u32, usize>,
    mass: usize,
}

impl DeltaHistogram {
    fn record(&mut self, delta: u32) {
        *self.counts.entry(delta).or_insert(0) += 1;
        self.mass += 1;
    }

    /// The most frequent delta; smallest width wins ties.
    fn mode(&self) -> Option<u32> {
        let mut best: Option<(u32, usize)> = None;
        for (&width, &count) in &self.counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((width, count)),
            }
        }
        best.map(|(width, _)| width)
    }
}

/// Infer the indentation style of `sample`, scanning at most
/// `max_bytes` of it.
///
/// Evidence is a positive width delta between a line and the previous
/// significant line of the same style: entering a deeper block with
/// four more spaces is one vote for `space/4`. A single indented line
/// is accepted as evidence; sparse samples classify rather than demand
/// statistical significance.
pub fn classify(sample: &str, max_bytes: usize) -> IndentVerdict {
    let sample = truncate_sample(sample, max_bytes);

    let mut tab_hist = DeltaHistogram::default();
    let mut space_hist = DeltaHistogram::default();
    let mut mixed_space_hist = DeltaHistogram::default();
    let mut mixed_lines = 0usize;

    // The file starts at zero indentation, so a first line indented by
    // k is itself one delta observation.
    let mut baseline = LineIndent { tabs: 0, spaces: 0 };

    for line in sample.lines() {
        let Some(indent) = measure(line) else {
            continue;
        };

        if indent.is_mixed() {
            mixed_lines += 1;
            // Same tab prefix, deeper space remainder: the space step of
            // a tab-then-space file.
            if baseline.tabs == indent.tabs && indent.spaces > baseline.spaces {
                let delta = indent.spaces - baseline.spaces;
                if delta <= MAX_SPACE_UNIT {
                    mixed_space_hist.record(delta);
                }
            }
        } else if indent.tabs == 0 && baseline.tabs == 0 {
            if indent.spaces > baseline.spaces {
                let delta = indent.spaces - baseline.spaces;
                if delta <= MAX_SPACE_UNIT {
                    space_hist.record(delta);
                }
            }
        } else if indent.spaces == 0 && baseline.spaces == 0 {
            if indent.tabs > baseline.tabs {
                tab_hist.record(indent.tabs - baseline.tabs);
            }
        }
        // Dedents and cross-style transitions only move the baseline.
        baseline = indent;
    }

    let total = tab_hist.mass + space_hist.mass + mixed_lines;
    if total == 0 {
        return IndentVerdict::Unknown;
    }

    if mixed_lines * MIXED_LINE_DIVISOR > total {
        return IndentVerdict::mixed(
            tab_hist.mode().unwrap_or(MIXED_TAB_STOP),
            mixed_space_hist
                .mode()
                .or_else(|| space_hist.mode())
                .unwrap_or(MIXED_SPACE_FALLBACK),
        );
    }

    // Both styles carry real weight (the lesser is at least a quarter of
    // the greater): genuinely inconsistent source. Exactly equal weight
    // always lands here rather than picking a winner arbitrarily.
    let lesser = tab_hist.mass.min(space_hist.mass);
    let greater = tab_hist.mass.max(space_hist.mass);
    if lesser > 0 && lesser * 4 >= greater {
        return IndentVerdict::mixed(
            tab_hist.mode().unwrap_or(MIXED_TAB_STOP),
            space_hist.mode().unwrap_or(MIXED_SPACE_FALLBACK),
        );
    }

    if tab_hist.mass > space_hist.mass {
        IndentVerdict::tab(tab_hist.mode().unwrap_or(1))
    } else {
        IndentVerdict::space(space_hist.mode().unwrap_or(MIXED_SPACE_FALLBACK))
    }
}

/// Bound the sample to `max_bytes`, cutting back to a char boundary and
/// dropping the trailing partial line.
fn truncate_sample(sample: &str, max_bytes: usize) -> &str {
    if sample.len() <= max_bytes {
        return sample;
    }
    let mut end = max_bytes;
    while end > 0 && !sample.is_char_boundary(end) {
        end -= 1;
    }
    match memrchr(b'\n', &sample.as_bytes()[..end]) {
        Some(newline) => &sample[..newline],
        None => &sample[..end],
    }
}

/// Measure the leading whitespace run of one line: tabs first, then
/// spaces. Returns `None` for lines that carry no evidence: blank
/// lines, lines that look like comments, and lines with a space-then-tab
/// prefix (the wrong order; such indentation is noise).
fn measure(line: &str) -> Option<LineIndent> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b'\t' {
        i += 1;
    }
    let tabs = i as u32;
    let space_start = i;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    let spaces = (i - space_start) as u32;

    let rest = &line[i..];
    if rest.starts_with('\t') {
        return None;
    }
    let rest = rest.trim_start();
    if rest.is_empty() || looks_like_comment(rest) {
        return None;
    }
    Some(LineIndent { tabs, spaces })
}

/// Best-effort comment detection covering the common line-comment and
/// block-continuation markers. Misses are harmless: a comment block
/// indented like the code around it votes for the same style anyway.
fn looks_like_comment(rest: &str) -> bool {
    rest.starts_with('#')
        || rest.starts_with(';')
        || rest.starts_with("//")
        || rest.starts_with("/*")
        || rest.starts_with('*')
        || rest.starts_with("--")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(sample: &str) -> IndentVerdict {
        classify(sample, DEFAULT_SAMPLE_BYTES)
    }

    #[test]
    fn test_empty_sample_is_unknown() {
        assert_eq!(classify_all(""), IndentVerdict::Unknown);
    }

    #[test]
    fn test_blank_only_sample_is_unknown() {
        assert_eq!(classify_all("\n\n   \n\t\n"), IndentVerdict::Unknown);
    }

    #[test]
    fn test_flat_sample_is_unknown() {
        assert_eq!(
            classify_all("fn main() {}\nfn other() {}\n"),
            IndentVerdict::Unknown
        );
    }

    #[test]
    fn test_space_ladder() {
        for k in 1..=8u32 {
            let unit = " ".repeat(k as usize);
            let mut sample = String::from("if a:\n");
            for depth in 1..=4 {
                sample.push_str(&unit.repeat(depth));
                sample.push_str("body\n");
            }
            assert_eq!(
                classify_all(&sample),
                IndentVerdict::Space { width: k },
                "k = {}",
                k
            );
        }
    }

    #[test]
    fn test_single_indented_line_is_evidence() {
        assert_eq!(
            classify_all("if a:\n   body\n"),
            IndentVerdict::Space { width: 3 }
        );
    }

    #[test]
    fn test_tab_ladder() {
        let sample = "fn a() {\n\tif b {\n\t\tc();\n\t}\n}\n";
        assert_eq!(classify_all(sample), IndentVerdict::Tab { width: 1 });
    }

    #[test]
    fn test_equal_tab_and_space_weight_is_mixed() {
        // Two space deltas and two tab deltas of equal mass.
        let sample = "a:\n    b\nc:\n    d\ne:\n\tf\ng:\n\th\n";
        match classify_all(sample) {
            IndentVerdict::Mixed {
                tab_width,
                space_width,
            } => {
                assert_eq!(tab_width, 1);
                assert_eq!(space_width, 4);
            }
            other => panic!("expected mixed, got {:?}", other),
        }
    }

    #[test]
    fn test_tab_then_space_lines_are_mixed() {
        // Every indented line uses a tab prefix plus space remainder.
        let sample = "fn a() {\n\t    b();\n\t    c();\n\t    d();\n}\n";
        match classify_all(sample) {
            IndentVerdict::Mixed { tab_width, .. } => assert_eq!(tab_width, 8),
            other => panic!("expected mixed, got {:?}", other),
        }
    }

    #[test]
    fn test_dominant_style_wins_over_stray_lines() {
        // Ten space-indented deltas, one tab delta: spaces dominate.
        let mut sample = String::new();
        for _ in 0..10 {
            sample.push_str("a:\n  b\n");
        }
        sample.push_str("c:\n\td\n");
        assert_eq!(classify_all(&sample), IndentVerdict::Space { width: 2 });
    }

    #[test]
    fn test_mode_tie_prefers_smallest_width() {
        // One delta of 2 and one delta of 4, equally frequent.
        let sample = "a:\n  b\nc:\n    d\n";
        assert_eq!(classify_all(sample), IndentVerdict::Space { width: 2 });
    }

    #[test]
    fn test_comment_lines_do_not_vote() {
        // The oddly indented comment bodies would otherwise skew the mode.
        let sample = "fn a() {\n    // one\n       // two\n    b();\n    c();\n}\n";
        assert_eq!(classify_all(sample), IndentVerdict::Space { width: 4 });
    }

    #[test]
    fn test_dedents_are_not_evidence() {
        let sample = "a:\n    b\nc:\n    d\ne\n";
        assert_eq!(classify_all(sample), IndentVerdict::Space { width: 4 });
    }

    #[test]
    fn test_alignment_jumps_are_ignored() {
        // A 12-space continuation line is alignment, not an indent unit.
        let sample = "call(a,\n            b)\nif x:\n    y\nif z:\n    w\n";
        assert_eq!(classify_all(sample), IndentVerdict::Space { width: 4 });
    }

    #[test]
    fn test_space_then_tab_prefix_is_noise() {
        assert_eq!(classify_all("a:\n  \tb\n"), IndentVerdict::Unknown);
    }

    #[test]
    fn test_truncation_drops_partial_trailing_line() {
        let sample = "if a:\n    b\n        cccccccccc";
        // Cap lands inside the last line; only the first delta survives.
        let capped = classify(sample, 14);
        assert_eq!(capped, IndentVerdict::Space { width: 4 });
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let sample = "if a:\n    b\u{e9}\u{e9}\u{e9}\u{e9}\n";
        for cap in 0..sample.len() {
            // Must never panic on a mid-char cap.
            let _ = classify(sample, cap);
        }
    }

    #[test]
    fn test_stale_snapshot_tolerated() {
        // A sample cut mid-edit: unterminated string, stray braces. The
        // classifier only reads whitespace prefixes and must not care.
        let sample = "fn a() {\n    let s = \"unterminated\n    }}}\n";
        assert_eq!(classify_all(sample), IndentVerdict::Space { width: 4 });
    }
}
