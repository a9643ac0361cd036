//! # revlines - line-level revision analysis
//!
//! revlines is a CLI tool and library for comparing two revisions of a
//! source tree line by line. It provides:
//!
//! - **Comparison**: tags deleted lines of the old revision and added or
//!   modified lines of the new one
//! - **Metrics**: physical LOC, method count and structural status per file
//! - **Reflow**: rewrites lines wider than a limit (80 by default) at
//!   structural split points
//!
//! ## Architecture
//!
//! The line engine works on in-memory line sequences and never touches the
//! filesystem:
//!
//! - [`similarity`] - edit-distance similarity between two lines
//! - [`cleaner`] - comment and blank-line stripping
//! - [`diff`] - positional added/deleted/modified classification
//! - [`scanner`], [`loc_counter`] - comment-aware LOC and method counting
//! - [`syntax`] - structural convention checks
//! - [`metrics`] - the per-file metrics record
//! - [`formatter`], [`wrap`] - category-driven line reflow
//! - [`engine`] - the top-level classification entry points
//!
//! The rules read projects from disk and report on them:
//!
//! - [`project`], [`file_utils`] - project scanning and line IO
//! - [`compare_rule`], [`metrics_rule`], [`reflow_rule`] - one rule per command
//! - [`all_rules`] - orchestration for running every rule
//! - [`reporting`] - table, JSON, YAML and CSV output
//!
//! ## Usage as a Library
//!
//! ```rust
//! use revlines_core::{classify_added, classify_deleted, compute_metrics, reflow};
//!
//! # fn main() -> revlines_core::Result<()> {
//! let old = ["int a = 1;", "int b = 2;"];
//! let new = ["int a = 1;", "int b = 3;", "int c = 4;"];
//!
//! let (_, deleted) = classify_deleted(&old, &new);
//! let (tagged, changed) = classify_added(&old, &new)?;
//! assert_eq!(deleted, 1);
//! assert_eq!(changed, 2);
//! assert_eq!(tagged[1], "int b = 3; // modified line");
//!
//! let metrics = compute_metrics(&["public class A {", "}"]);
//! assert_eq!(metrics.physical_loc, 2);
//!
//! assert_eq!(reflow(&["short line"]), vec!["short line"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! revlines reads `Revlines.toml` via [`RevlinesConfig`]. See the [`config`]
//! module for the file format.
//!
//! ## Error Handling
//!
//! All functions that can fail return [`Result<T>`], which is a type alias for
//! `std::result::Result<T, RevlinesError>`. See the [`error`] module.

pub mod all_rules;
pub mod cleaner;
pub mod cli;
pub mod compare_rule;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod file_utils;
pub mod formatter;
pub mod loc_counter;
pub mod metrics;
pub mod metrics_rule;
pub mod patterns;
pub mod project;
pub mod reflow_rule;
pub mod reporting;
pub mod rule;
pub mod scanner;
pub mod similarity;
pub mod syntax;
pub mod wrap;

// Line engine exports
pub use crate::diff::{DiffClassifier, LineTag, TagMarkers};
pub use crate::engine::{classify_added, classify_deleted};
pub use crate::formatter::{LineCategory, LineFormatter, reflow};
pub use crate::metrics::{FileMetrics, Status, compute_metrics};
pub use crate::syntax::{Validation, validate};

// Rule exports
pub use crate::all_rules::run_all;
pub use crate::compare_rule::CompareRule;
pub use crate::metrics_rule::MetricsRule;
pub use crate::reflow_rule::ReflowRule;
pub use crate::rule::Rule;

// CLI exports
pub use crate::cli::{AllArgs, Cli, Commands, CompareArgs, MetricsArgs, OutputFormat, ReflowArgs};

// Config exports
pub use crate::config::{
    RevlinesConfig, load_config, load_config_from_path, merge_all_args, merge_compare_args,
    merge_metrics_args, merge_reflow_args,
};

// Error exports
pub use crate::error::{RevlinesError as Error, Result};
