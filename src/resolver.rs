//! Indentation resolver
//!
//! Decides the authoritative indentation for a buffer by folding
//! partial verdicts from each source in priority order: explicit
//! per-file configuration outranks content-based guessing, which
//! outranks the configured default. A category override (makefiles
//! only accept tabs) trumps everything for the indent kind.
//!
//! Every resolution call is independent: all intermediate state is
//! local, so callers may resolve different buffers from different
//! threads freely.

use crate::classifier::{self, DEFAULT_SAMPLE_BYTES};
use crate::models::{IndentKind, PartialIndentation, ResolvedIndentation, Source};
use std::path::Path;
use tracing::debug;

/// A provider of explicit per-file indentation configuration, the
/// highest-priority source. Lookup failures are "no information", never
/// errors; implementations return an empty partial instead.
pub trait ExplicitConfigSource {
    fn lookup(&self, path: &Path) -> PartialIndentation;
}

/// The externally supplied fallback indentation, already validated
/// (size is positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultIndentation {
    pub kind: IndentKind,
    pub size: u32,
}

impl Default for DefaultIndentation {
    fn default() -> Self {
        DefaultIndentation {
            kind: IndentKind::Space,
            size: 4,
        }
    }
}

/// A fixed indentation rule for files of a known category, regardless
/// of content or configuration. The motivating case: make only accepts
/// tab indentation in recipes.
pub struct CategoryOverride {
    label: &'static str,
    forced: IndentKind,
    matcher: Box<dyn Fn(&Path) -> bool + Send + Sync>,
}

impl CategoryOverride {
    pub fn new(
        label: &'static str,
        forced: IndentKind,
        matcher: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) -> Self {
        CategoryOverride {
            label,
            forced,
            matcher: Box::new(matcher),
        }
    }

    /// The built-in rule: makefiles are tab-indented, full stop.
    pub fn makefiles() -> Self {
        CategoryOverride::new("makefile", IndentKind::Tab, |path| {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => return false,
            };
            matches!(name, "Makefile" | "makefile" | "GNUmakefile")
                || name.ends_with(".mk")
                || name.ends_with(".mak")
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn forced(&self) -> IndentKind {
        self.forced
    }

    pub fn matches(&self, path: &Path) -> bool {
        (self.matcher)(path)
    }
}

impl std::fmt::Debug for CategoryOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryOverride")
            .field("label", &self.label)
            .field("forced", &self.forced)
            .finish_non_exhaustive()
    }
}

/// Resolves buffer indentation from an explicit config source, the
/// classifier, an optional category override, and a default. Holds only
/// read-only inputs; [`Resolver::resolve`] keeps no state across calls
/// and is idempotent for identical inputs.
pub struct Resolver<C> {
    config_source: C,
    default: DefaultIndentation,
    category_override: Option<CategoryOverride>,
    sample_bytes: usize,
}

impl<C: ExplicitConfigSource> Resolver<C> {
    pub fn new(config_source: C, default: DefaultIndentation) -> Self {
        Resolver {
            config_source,
            default,
            category_override: None,
            sample_bytes: DEFAULT_SAMPLE_BYTES,
        }
    }

    pub fn with_category_override(mut self, rule: CategoryOverride) -> Self {
        self.category_override = Some(rule);
        self
    }

    pub fn with_sample_bytes(mut self, sample_bytes: usize) -> Self {
        self.sample_bytes = sample_bytes;
        self
    }

    /// Resolve the indentation for a buffer.
    ///
    /// `sample_provider` is only invoked when the explicit config does
    /// not already fully specify the indentation; a complete config
    /// short-circuits the text scan.
    pub fn resolve(
        &self,
        file_path: Option<&Path>,
        sample_provider: impl FnOnce() -> String,
    ) -> ResolvedIndentation {
        let mut merged = PartialIndentation::default();
        let mut sources = Vec::new();

        if let Some(path) = file_path {
            let explicit = self.config_source.lookup(path);
            if !explicit.is_empty() {
                sources.push(Source::Config);
            }
            merged = merged.merge(explicit);
        }

        if !merged.is_complete() {
            let sample = sample_provider();
            let verdict = classifier::classify(&sample, self.sample_bytes);
            debug!(?verdict, "classified buffer sample");
            sources.push(Source::Guessing);
            merged = merged.merge(verdict.to_partial());
        }

        if let Some(rule) = &self.category_override {
            if file_path.is_some_and(|p| rule.matches(p)) {
                debug!(category = rule.label(), "category override applied");
                return ResolvedIndentation {
                    kind: rule.forced(),
                    size: merged.size.filter(|&s| s > 0).unwrap_or(self.default.size),
                    sources: vec![Source::Special],
                };
            }
        }

        match merged.kind {
            // The kind is settled; a missing or degenerate size is
            // filled from the default.
            Some(kind) => match merged.size.filter(|&s| s > 0) {
                Some(size) => ResolvedIndentation {
                    kind,
                    size,
                    sources,
                },
                None => {
                    sources.push(Source::Default);
                    ResolvedIndentation {
                        kind,
                        size: self.default.size,
                        sources,
                    }
                }
            },
            // No source could even name the indent character: the whole
            // result is the default, partial sizes discarded.
            None => ResolvedIndentation {
                kind: self.default.kind,
                size: self.default.size,
                sources: vec![Source::Default],
            },
        }
    }
}
