//! Normalized edit-distance similarity between two lines.
//!
//! Used by the added-side diff pass to decide whether a changed line is a
//! modification of its old counterpart or an entirely new line.

use crate::error::{Result, RevlinesError};

/// Minimum similarity at which two lines are considered a modification.
pub const MIN_SIMILARITY: f64 = 0.70;

/// Levenshtein distance between `a` and `b`, counted in `char`s with unit
/// costs for insertion, deletion and substitution.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity ratio in `[0, 1]`: `1 - distance / max_len`.
///
/// Two empty strings are identical and score `1.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Returns true when `new_line` is similar enough to `old_line` to be
/// reported as a modification rather than a new line.
pub fn is_modified(old_line: &str, new_line: &str) -> bool {
    is_modified_with(old_line, new_line, MIN_SIMILARITY)
}

/// Same as [`is_modified`] with an explicit threshold.
pub fn is_modified_with(old_line: &str, new_line: &str, threshold: f64) -> bool {
    similarity(old_line, new_line) >= threshold
}

/// Checked variant of [`is_modified_with`] for lines looked up from slots
/// that may be empty.
///
/// # Errors
///
/// Returns [`RevlinesError::InvalidInput`] if either line is absent. Both
/// lines must be provided, even if they are empty strings.
pub fn try_is_modified(
    old_line: Option<&str>,
    new_line: Option<&str>,
    threshold: f64,
) -> Result<bool> {
    let old_line = old_line.ok_or_else(|| {
        RevlinesError::invalid_input_with_arg("lines to compare must be present", "old_line")
    })?;
    let new_line = new_line.ok_or_else(|| {
        RevlinesError::invalid_input_with_arg("lines to compare must be present", "new_line")
    })?;
    Ok(is_modified_with(old_line, new_line, threshold))
}
