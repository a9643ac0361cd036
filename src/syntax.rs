//! Structural convention checks.
//!
//! A file is well formed when no line declares several initialised variables
//! at once, no line starts with `{`, and every closing brace stands alone on
//! its line.

use serde::Serialize;

use crate::patterns::{is_class_declaration, is_multi_instance_declaration};

/// Result of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Whether every line follows the structural conventions.
    pub well_formed: bool,
    /// Whether any line declares a class.
    pub has_class: bool,
}

/// Check the structural conventions over every line.
pub fn is_well_formed<S: AsRef<str>>(lines: &[S]) -> bool {
    if lines
        .iter()
        .any(|line| is_multi_instance_declaration(line.as_ref()))
    {
        return false;
    }

    lines.iter().all(|line| {
        let trimmed = line.as_ref().trim();
        !(trimmed.starts_with('{')
            || has_trailing_closing_brace(trimmed)
            || is_commented_closing_brace(trimmed))
    })
}

/// `foo(); }`: a closing brace that ends a line with other content.
fn has_trailing_closing_brace(trimmed: &str) -> bool {
    trimmed.ends_with('}') && trimmed != "}"
}

/// `} // end`: a closing brace sharing its line with a comment.
fn is_commented_closing_brace(trimmed: &str) -> bool {
    trimmed.strip_prefix('}').is_some_and(|rest| {
        let rest = rest.trim_start();
        rest.starts_with("//") || rest.starts_with("/*")
    })
}

/// Returns true if any trimmed line is a class declaration.
pub fn has_class_declaration<S: AsRef<str>>(lines: &[S]) -> bool {
    lines
        .iter()
        .any(|line| is_class_declaration(line.as_ref().trim()))
}

/// Run both checks.
pub fn validate<S: AsRef<str>>(lines: &[S]) -> Validation {
    Validation {
        well_formed: is_well_formed(lines),
        has_class: has_class_declaration(lines),
    }
}
