//! Core data models for Tabsense
//!
//! These models are shared between the classifier (which infers an
//! indentation style from text) and the resolver (which merges the
//! inference with explicit configuration and defaults).

use serde::Serialize;
use std::fmt;

/// The indent character family of a fully resolved indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentKind {
    Tab,
    Space,
}

impl fmt::Display for IndentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentKind::Tab => write!(f, "tab"),
            IndentKind::Space => write!(f, "space"),
        }
    }
}

/// The classifier's output: the inferred indentation style of a text
/// sample, or the absence of a confident inference.
///
/// Widths are always positive; the constructors below fall back to
/// `Unknown` rather than produce a zero-width verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IndentVerdict {
    /// No usable indentation evidence in the sample.
    Unknown,
    /// Indented with tabs; `width` is the number of tabs per level
    /// (almost always 1).
    Tab { width: u32 },
    /// Indented with spaces; `width` is the number of spaces per level.
    Space { width: u32 },
    /// Tabs and spaces both carry real weight in the sample.
    Mixed { tab_width: u32, space_width: u32 },
}

impl IndentVerdict {
    pub fn tab(width: u32) -> Self {
        if width == 0 {
            IndentVerdict::Unknown
        } else {
            IndentVerdict::Tab { width }
        }
    }

    pub fn space(width: u32) -> Self {
        if width == 0 {
            IndentVerdict::Unknown
        } else {
            IndentVerdict::Space { width }
        }
    }

    pub fn mixed(tab_width: u32, space_width: u32) -> Self {
        if tab_width == 0 || space_width == 0 {
            IndentVerdict::Unknown
        } else {
            IndentVerdict::Mixed {
                tab_width,
                space_width,
            }
        }
    }

    /// Lower this verdict to a partial indentation for priority merging.
    ///
    /// A `Mixed` verdict contributes tab indentation, matching how
    /// tab-then-space files were authored. A `Tab` verdict whose width
    /// is 1 (tabs used as a single indent unit, no meaningful width)
    /// contributes the kind only and leaves the width for a
    /// lower-priority source to fill.
    pub fn to_partial(self) -> PartialIndentation {
        match self {
            IndentVerdict::Unknown => PartialIndentation::default(),
            IndentVerdict::Tab { width } => PartialIndentation {
                kind: Some(IndentKind::Tab),
                size: if width > 1 { Some(width) } else { None },
            },
            IndentVerdict::Space { width } => PartialIndentation {
                kind: Some(IndentKind::Space),
                size: Some(width),
            },
            IndentVerdict::Mixed { tab_width, .. } => PartialIndentation {
                kind: Some(IndentKind::Tab),
                size: Some(tab_width),
            },
        }
    }
}

impl fmt::Display for IndentVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentVerdict::Unknown => write!(f, "unknown"),
            IndentVerdict::Tab { width } => write!(f, "tab/{}", width),
            IndentVerdict::Space { width } => write!(f, "space/{}", width),
            IndentVerdict::Mixed {
                tab_width,
                space_width,
            } => write!(f, "mixed tab/{} space/{}", tab_width, space_width),
        }
    }
}

/// A partially known indentation: each field may independently be
/// unknown. One of these is produced per source (explicit config,
/// classifier guess) and merged in priority order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialIndentation {
    pub kind: Option<IndentKind>,
    pub size: Option<u32>,
}

impl PartialIndentation {
    /// No field known at all.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.size.is_none()
    }

    /// Both fields known.
    pub fn is_complete(&self) -> bool {
        self.kind.is_some() && self.size.is_some()
    }

    /// Fill any unknown field from `fallback`; fields already set are
    /// never overwritten.
    pub fn merge(self, fallback: PartialIndentation) -> PartialIndentation {
        PartialIndentation {
            kind: self.kind.or(fallback.kind),
            size: self.size.or(fallback.size),
        }
    }
}

/// Which inputs contributed to a resolved indentation, for diagnostic
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Explicit per-file configuration (.editorconfig).
    Config,
    /// Content-based inference by the classifier.
    Guessing,
    /// The configured default indentation.
    Default,
    /// A category override rule (e.g. makefiles are tab-only).
    Special,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Config => write!(f, "config"),
            Source::Guessing => write!(f, "guessing"),
            Source::Default => write!(f, "default"),
            Source::Special => write!(f, "special"),
        }
    }
}

/// The final, authoritative indentation for a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIndentation {
    pub kind: IndentKind,
    /// Always positive.
    pub size: u32,
    /// The inputs that contributed, in the order they were consulted.
    pub sources: Vec<Source>,
}

impl ResolvedIndentation {
    /// Human-readable status line, e.g. `Indentation: space/4 (config, guessing)`.
    pub fn status_line(&self) -> String {
        let reason = self
            .sources
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Indentation: {}/{} ({})", self.kind, self.size, reason)
    }
}
