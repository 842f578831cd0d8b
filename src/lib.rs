//! Tabsense - indentation style detection
//!
//! Infers the indentation style (tabs vs. spaces, and width) of source
//! text from its content, merged with project-level `.editorconfig`
//! directives and a configured default.
//!
//! The two load-bearing pieces are [`classifier::classify`], a pure
//! heuristic over a text sample, and [`resolver::Resolver`], which
//! folds explicit configuration, the classifier's guess, category
//! overrides, and the default into one authoritative answer.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod editorconfig;
pub mod models;
pub mod resolver;
