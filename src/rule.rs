//! Rule Trait
//!
//! This module defines the [`Rule`] trait, the common interface of the
//! `compare`, `metrics` and `reflow` rules.
//!
//! # Overview
//!
//! Every rule follows the same pattern:
//!
//! - it has a name used in logs and errors
//! - [`Rule::analyze`] reads files and returns serializable data without
//!   printing anything
//! - [`Rule::run`] calls `analyze`, persists output files where the rule
//!   produces them, and renders the report
//!
//! # Implementing a Rule
//!
//! ```rust,no_run
//! use revlines_core::rule::Rule;
//! use revlines_core::error::Result;
//! use serde::Serialize;
//! use std::path::PathBuf;
//!
//! # #[derive(Debug, Serialize)]
//! # struct LongLineData {
//! #     pub long_lines: usize,
//! # }
//! #
//! # #[derive(Clone, Debug)]
//! # struct LongLineConfig {
//! #     pub path: PathBuf,
//! # }
//! #
//! # struct LongLineRule;
//! #
//! impl Rule for LongLineRule {
//!     type Data = LongLineData;
//!     type Config = LongLineConfig;
//!
//!     fn name() -> &'static str {
//!         "long_lines"
//!     }
//!
//!     fn description() -> &'static str {
//!         "Counts lines wider than 80 characters"
//!     }
//!
//!     fn run(&self, config: &LongLineConfig) -> Result<()> {
//!         let data = self.analyze(config)?;
//!         println!("{} long lines", data.long_lines);
//!         Ok(())
//!     }
//!
//!     fn analyze(&self, _config: &LongLineConfig) -> Result<LongLineData> {
//!         Ok(LongLineData { long_lines: 0 })
//!     }
//! }
//! ```

use crate::error::Result;
use serde::Serialize;
use std::fmt::Debug;

/// Common trait for all rules.
pub trait Rule: Sized {
    /// The arguments this rule accepts, usually a merged CLI args struct.
    type Config: Clone + Debug + Send + Sync;

    /// The data produced by [`Rule::analyze`], serializable to JSON, YAML
    /// or CSV rows.
    type Data: Debug + Send + Sync + Serialize;

    /// Unique snake_case name of the rule.
    fn name() -> &'static str;

    /// One-line description used in help text.
    fn description() -> &'static str;

    /// Runs the full pipeline: analyze, persist output files, report.
    ///
    /// # Errors
    ///
    /// Returns a [`RevlinesError`](crate::error::RevlinesError) if the input
    /// directories cannot be scanned or the report cannot be written.
    /// Failures confined to one file are logged and skipped.
    fn run(&self, config: &Self::Config) -> Result<()>;

    /// Reads the input and returns structured data without side effects.
    ///
    /// # Errors
    ///
    /// Returns a [`RevlinesError`](crate::error::RevlinesError) if the
    /// analysis cannot be completed.
    fn analyze(&self, config: &Self::Config) -> Result<Self::Data>;
}

/// Build a [`RevlinesError::AnalysisError`](crate::error::RevlinesError::AnalysisError)
/// carrying the rule name.
///
/// ```rust
/// # use revlines_core::rule_error;
/// let error = rule_error!("compare", "No files found under {}", "v1/");
/// ```
#[macro_export]
macro_rules! rule_error {
    ($rule_name:expr, $msg:expr) => {
        $crate::error::RevlinesError::analysis_error($rule_name, $msg)
    };
    ($rule_name:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::error::RevlinesError::analysis_error($rule_name, format!($fmt, $($arg)*))
    };
}
