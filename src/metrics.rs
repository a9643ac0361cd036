//! Per-file metrics record combining the counters and the validator.

use serde::Serialize;
use std::fmt;

use crate::loc_counter::count_metrics;
use crate::syntax::validate;

/// Outcome of validating a file before its metrics are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Well formed and declares a class.
    Ok,
    /// Breaks one of the structural conventions.
    SyntaxError,
    /// Well formed but declares no class.
    NoClassFound,
}

impl Status {
    /// Label used in result tables.
    pub const fn label(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::SyntaxError => "Bad file",
            Status::NoClassFound => "No class",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metrics reported for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileMetrics {
    /// Physical lines of code.
    pub physical_loc: usize,
    /// Number of concrete methods.
    pub method_count: usize,
    /// Validation outcome.
    pub status: Status,
}

/// Compute the metrics record for one revision of a file.
///
/// A malformed file reports zero counts. A file without a class keeps its
/// LOC but reports no methods.
pub fn compute_metrics<S: AsRef<str>>(lines: &[S]) -> FileMetrics {
    let validation = validate(lines);
    if !validation.well_formed {
        return FileMetrics {
            physical_loc: 0,
            method_count: 0,
            status: Status::SyntaxError,
        };
    }

    let counts = count_metrics(lines);
    if !validation.has_class {
        return FileMetrics {
            physical_loc: counts.physical_loc,
            method_count: 0,
            status: Status::NoClassFound,
        };
    }

    FileMetrics {
        physical_loc: counts.physical_loc,
        method_count: counts.method_count,
        status: Status::Ok,
    }
}
