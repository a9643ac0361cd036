//! Positional diff classification of cleaned line sequences.
//!
//! Lines are compared index by index with no realignment: a single inserted
//! or removed line shifts every following index and reports the rest of the
//! file as changed. Only the added-side pass distinguishes modified lines from
//! new ones; the deleted-side pass marks every mismatch as deleted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::cleaner::clean_lines;
use crate::error::Result;
use crate::similarity::{MIN_SIMILARITY, try_is_modified};

/// The kind of change recorded for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTag {
    /// A line with no similar counterpart in the old revision.
    Added,
    /// A line of the old revision that does not survive at its position.
    Deleted,
    /// A line whose old counterpart is at least [`MIN_SIMILARITY`] similar.
    Modified,
}

impl LineTag {
    /// Annotation appended to a tagged line when no markers are configured.
    pub const fn default_annotation(self) -> &'static str {
        match self {
            LineTag::Added => " // added line",
            LineTag::Deleted => " // deleted line",
            LineTag::Modified => " // modified line",
        }
    }
}

impl fmt::Display for LineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineTag::Added => "added",
            LineTag::Deleted => "deleted",
            LineTag::Modified => "modified",
        };
        f.write_str(name)
    }
}

/// Annotation text appended to tagged lines, one per [`LineTag`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TagMarkers {
    /// Appended to added lines.
    #[serde(default = "default_added_marker")]
    pub added: String,
    /// Appended to deleted lines.
    #[serde(default = "default_deleted_marker")]
    pub deleted: String,
    /// Appended to modified lines.
    #[serde(default = "default_modified_marker")]
    pub modified: String,
}

impl TagMarkers {
    /// The annotation for `tag`.
    pub fn annotation(&self, tag: LineTag) -> &str {
        match tag {
            LineTag::Added => &self.added,
            LineTag::Deleted => &self.deleted,
            LineTag::Modified => &self.modified,
        }
    }
}

impl Default for TagMarkers {
    fn default() -> Self {
        Self {
            added: default_added_marker(),
            deleted: default_deleted_marker(),
            modified: default_modified_marker(),
        }
    }
}

fn default_added_marker() -> String {
    LineTag::Added.default_annotation().to_string()
}

fn default_deleted_marker() -> String {
    LineTag::Deleted.default_annotation().to_string()
}

fn default_modified_marker() -> String {
    LineTag::Modified.default_annotation().to_string()
}

/// Positions of a cleaned sequence selected for tagging, with their tag.
///
/// Built once per comparison and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    tags: BTreeMap<usize, LineTag>,
}

impl Classification {
    fn from_positions(positions: impl IntoIterator<Item = (usize, LineTag)>) -> Self {
        Self {
            tags: positions.into_iter().collect(),
        }
    }

    /// Tagged positions in ascending order.
    pub fn positions(&self) -> Vec<usize> {
        self.tags.keys().copied().collect()
    }

    /// Number of tagged positions.
    pub fn count(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if nothing was tagged.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The tag at `position`, if it was marked.
    pub fn tag_at(&self, position: usize) -> Option<LineTag> {
        self.tags.get(&position).copied()
    }

    /// Number of positions carrying `tag`.
    pub fn count_of(&self, tag: LineTag) -> usize {
        self.tags.values().filter(|t| **t == tag).count()
    }
}

/// Positions of `reference` that differ from `candidate` at the same index,
/// plus every position of `reference` beyond the end of `candidate`.
pub fn detect_positions<S: AsRef<str>>(reference: &[S], candidate: &[S]) -> Vec<usize> {
    let common = reference.len().min(candidate.len());
    let mismatches = (0..common).filter(|&i| reference[i].as_ref() != candidate[i].as_ref());
    mismatches.chain(common..reference.len()).collect()
}

/// Deleted-side classification: every detected position of `old_clean` is
/// tagged [`LineTag::Deleted`].
pub fn classify_deleted_positions<S: AsRef<str>>(old_clean: &[S], new_clean: &[S]) -> Classification {
    Classification::from_positions(
        detect_positions(old_clean, new_clean)
            .into_iter()
            .map(|i| (i, LineTag::Deleted)),
    )
}

/// Added-side classification over positions of `new_clean`.
///
/// Within the common prefix a changed line is [`LineTag::Modified`] when its
/// old counterpart is at least `threshold` similar, otherwise
/// [`LineTag::Added`]. Lines past the end of `old_clean` are always added.
pub fn classify_added_positions<S: AsRef<str>>(
    old_clean: &[S],
    new_clean: &[S],
    threshold: f64,
) -> Result<Classification> {
    let mut tags = Vec::new();
    for i in detect_positions(new_clean, old_clean) {
        let tag = if i < old_clean.len() {
            let old_line = old_clean.get(i).map(|s| s.as_ref());
            let new_line = new_clean.get(i).map(|s| s.as_ref());
            if try_is_modified(old_line, new_line, threshold)? {
                LineTag::Modified
            } else {
                LineTag::Added
            }
        } else {
            LineTag::Added
        };
        tags.push((i, tag));
    }
    Ok(Classification::from_positions(tags))
}

/// Append each tagged line's annotation, leaving the others untouched.
pub fn mark_and_tag<S: AsRef<str>>(
    cleaned: &[S],
    classification: &Classification,
    markers: &TagMarkers,
) -> Vec<String> {
    cleaned
        .iter()
        .enumerate()
        .map(|(i, line)| match classification.tag_at(i) {
            Some(tag) => format!("{}{}", line.as_ref(), markers.annotation(tag)),
            None => line.as_ref().to_string(),
        })
        .collect()
}

/// Output of one classification pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedLines {
    /// The cleaned sequence with annotations appended in place.
    pub lines: Vec<String>,
    /// Number of tagged lines.
    pub count: usize,
    /// The tagged positions.
    pub classification: Classification,
}

/// Cleans two raw revisions and classifies their lines.
#[derive(Debug, Clone)]
pub struct DiffClassifier {
    markers: TagMarkers,
    threshold: f64,
}

impl Default for DiffClassifier {
    fn default() -> Self {
        Self {
            markers: TagMarkers::default(),
            threshold: MIN_SIMILARITY,
        }
    }
}

impl DiffClassifier {
    /// Create a classifier with the default markers and threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `markers` for the appended annotations.
    pub fn with_markers(mut self, markers: TagMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Use `threshold` as the modified/added similarity cutoff.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Tag the lines of the old revision that are deleted in the new one.
    pub fn classify_deleted<S: AsRef<str>>(&self, old_lines: &[S], new_lines: &[S]) -> TaggedLines {
        let old_clean = clean_lines(old_lines);
        let new_clean = clean_lines(new_lines);
        let classification = classify_deleted_positions(&old_clean, &new_clean);
        tracing::trace!(deleted = classification.count(), "Classified deleted lines");
        TaggedLines {
            lines: mark_and_tag(&old_clean, &classification, &self.markers),
            count: classification.count(),
            classification,
        }
    }

    /// Tag the lines of the new revision that were added or modified.
    pub fn classify_added<S: AsRef<str>>(
        &self,
        old_lines: &[S],
        new_lines: &[S],
    ) -> Result<TaggedLines> {
        let old_clean = clean_lines(old_lines);
        let new_clean = clean_lines(new_lines);
        let classification = classify_added_positions(&old_clean, &new_clean, self.threshold)?;
        tracing::trace!(
            added = classification.count_of(LineTag::Added),
            modified = classification.count_of(LineTag::Modified),
            "Classified added lines"
        );
        Ok(TaggedLines {
            lines: mark_and_tag(&new_clean, &classification, &self.markers),
            count: classification.count(),
            classification,
        })
    }
}
