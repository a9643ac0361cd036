//! Line-level operations over two already loaded revisions.
//!
//! These wrap [`DiffClassifier`] with the default markers and threshold and
//! return the tagged lines together with their count. Use the classifier
//! directly for custom annotation text or a different similarity cutoff.

use crate::diff::DiffClassifier;
use crate::error::Result;

/// Tag the lines of `old_lines` that no longer appear at the same position
/// in `new_lines`.
///
/// Returns the cleaned old revision with annotations appended and the
/// number of deleted lines.
pub fn classify_deleted<S: AsRef<str>>(old_lines: &[S], new_lines: &[S]) -> (Vec<String>, usize) {
    let tagged = DiffClassifier::new().classify_deleted(old_lines, new_lines);
    (tagged.lines, tagged.count)
}

/// Tag the lines of `new_lines` that were added or modified relative to
/// `old_lines`.
///
/// Returns the cleaned new revision with annotations appended and the
/// number of tagged lines, modified ones included.
///
/// # Errors
///
/// Returns [`RevlinesError::InvalidInput`](crate::error::RevlinesError::InvalidInput)
/// if a compared line is missing.
pub fn classify_added<S: AsRef<str>>(
    old_lines: &[S],
    new_lines: &[S],
) -> Result<(Vec<String>, usize)> {
    let tagged = DiffClassifier::new().classify_added(old_lines, new_lines)?;
    Ok((tagged.lines, tagged.count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_pair_end_to_end() {
        let old = ["a", "b", "c"];
        let new = ["a", "x", "c", "d"];

        let (deleted, deleted_count) = classify_deleted(&old, &new);
        assert_eq!(deleted_count, 1);
        assert_eq!(deleted, vec!["a", "b // deleted line", "c"]);

        let (added, added_count) = classify_added(&old, &new).unwrap();
        assert_eq!(added_count, 2);
        assert_eq!(
            added,
            vec!["a", "x // added line", "c", "d // added line"]
        );
    }

    #[test]
    fn test_identical_revisions_tag_nothing() {
        let lines = ["public class A {", "    int a;", "}"];
        assert_eq!(classify_deleted(&lines, &lines).1, 0);
        assert_eq!(classify_added(&lines, &lines).unwrap().1, 0);
    }

    #[test]
    fn test_similar_line_is_modified() {
        let old = ["int total = 0;"];
        let new = ["int total = 10;"];
        let (added, count) = classify_added(&old, &new).unwrap();
        assert_eq!(count, 1);
        assert_eq!(added, vec!["int total = 10; // modified line"]);
    }

    #[test]
    fn test_comments_are_cleaned_before_comparison() {
        let old = ["int a; // first", "/* note */", "int b;"];
        let new = ["int a; // changed comment", "int b;"];
        assert_eq!(classify_deleted(&old, &new).1, 0);
        assert_eq!(classify_added(&old, &new).unwrap().1, 0);
    }
}
