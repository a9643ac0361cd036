//! Physical LOC and method counting over a raw line sequence.

use serde::Serialize;

use crate::patterns::{is_abstract_method_signature, is_method_signature};
use crate::scanner::{CommentScanner, LineClass};

/// Counts produced for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineMetrics {
    /// Lines that are neither blank nor part of a comment.
    pub physical_loc: usize,
    /// Concrete method signatures; abstract ones are not counted.
    pub method_count: usize,
}

/// Count physical LOC and methods in `lines`.
///
/// Both counts come from one pass of a [`CommentScanner`] over the trimmed
/// lines, so a line hidden by a block comment is neither code nor a method.
pub fn count_metrics<S: AsRef<str>>(lines: &[S]) -> LineMetrics {
    let mut scanner = CommentScanner::new();
    let mut metrics = LineMetrics::default();

    for line in lines {
        let trimmed = line.as_ref().trim();
        if scanner.classify(trimmed) != LineClass::Code {
            continue;
        }
        metrics.physical_loc += 1;

        if is_abstract_method_signature(trimmed) {
            continue;
        }
        if is_method_signature(trimmed) {
            metrics.method_count += 1;
        }
    }

    metrics
}
