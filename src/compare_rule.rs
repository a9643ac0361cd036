//! The `compare` rule.
//!
//! Files of the old and new revision are paired by file name. A paired file
//! gets both classification passes, a file only in the new revision gets
//! the added pass against an empty old revision, and a file only in the old
//! revision gets the deleted pass against an empty new revision. Tagged
//! output is written to `<output_dir>/deleted_lines/<file>` and
//! `<output_dir>/added_lines/<file>`.

use prettytable::{Cell, Row};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::cli::{CompareArgs, OutputFormat};
use crate::diff::{DiffClassifier, LineTag};
use crate::error::{Result, RevlinesError};
use crate::file_utils::write_lines;
use crate::project::{SkippedFile, SourceFile, SourceProject};
use crate::reporting::{emit, new_table, render_structured};
use crate::rule::Rule;

/// Subdirectory of the output root holding tagged old revisions.
pub const DELETED_LINES_DIR: &str = "deleted_lines";
/// Subdirectory of the output root holding tagged new revisions.
pub const ADDED_LINES_DIR: &str = "added_lines";

/// Which revisions contain a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// Present in both revisions.
    Both,
    /// Added in the new revision.
    NewOnly,
    /// Removed in the new revision.
    OldOnly,
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pairing::Both => "both",
            Pairing::NewOnly => "new only",
            Pairing::OldOnly => "old only",
        })
    }
}

/// Comparison result for one file name.
#[derive(Debug, Clone, Serialize)]
pub struct FileComparison {
    /// File name shared by both revisions.
    pub filename: String,
    /// Which revisions contain the file.
    pub pairing: Pairing,
    /// Lines of the new revision tagged as added.
    pub added: usize,
    /// Lines of the new revision tagged as modified.
    pub modified: usize,
    /// Lines of the old revision tagged as deleted.
    pub deleted: usize,
    /// Tagged old revision; absent when the file is new.
    #[serde(skip)]
    pub deleted_lines: Option<Vec<String>>,
    /// Tagged new revision; absent when the file was removed.
    #[serde(skip)]
    pub added_lines: Option<Vec<String>>,
}

/// Output of [`CompareRule::analyze`].
#[derive(Debug, Clone, Serialize)]
pub struct CompareData {
    /// Name of the old revision's root directory.
    pub old_project: String,
    /// Name of the new revision's root directory.
    pub new_project: String,
    /// One entry per file name found in either revision.
    pub files: Vec<FileComparison>,
    pub total_added: usize,
    pub total_modified: usize,
    pub total_deleted: usize,
    /// Files whose comparison could not run.
    pub skipped: Vec<SkippedFile>,
}

/// Rule comparing two revisions of a project line by line.
#[derive(Debug, Default)]
pub struct CompareRule;

impl Rule for CompareRule {
    type Config = CompareArgs;
    type Data = CompareData;

    fn name() -> &'static str {
        "compare"
    }

    fn description() -> &'static str {
        "Tags deleted lines of the old revision and added or modified lines of the new one"
    }

    #[tracing::instrument(level = "debug", skip_all, err)]
    fn run(&self, args: &CompareArgs) -> Result<()> {
        let data = self.analyze(args)?;
        if !args.no_write {
            Self::write_outputs(&data, &args.output_dir);
        }
        let rendered = self.render(&data, args.output)?;
        emit(&rendered, args.output_file.as_deref())
    }

    fn analyze(&self, args: &CompareArgs) -> Result<CompareData> {
        if !(0.0..=1.0).contains(&args.threshold) {
            return Err(RevlinesError::invalid_input_with_arg(
                format!("similarity threshold must be between 0 and 1, got {}", args.threshold),
                "threshold",
            ));
        }

        let old = SourceProject::scan(&args.old, &args.extension)?;
        let new = SourceProject::scan(&args.new, &args.extension)?;
        tracing::info!(
            old = %old.name,
            new = %new.name,
            old_files = old.files.len(),
            new_files = new.files.len(),
            "Comparing revisions"
        );

        let classifier = DiffClassifier::new()
            .with_markers(args.markers.clone())
            .with_threshold(args.threshold);
        Ok(self.compare_projects(&classifier, &old, &new))
    }
}

impl CompareRule {
    /// Create the rule.
    pub fn new() -> Self {
        CompareRule
    }

    /// Pair the files of `old` and `new` by name and classify each pair.
    pub fn compare_projects(
        &self,
        classifier: &DiffClassifier,
        old: &SourceProject,
        new: &SourceProject,
    ) -> CompareData {
        let mut old_by_name: BTreeMap<&str, &SourceFile> = old
            .files
            .iter()
            .map(|f| (f.filename.as_str(), f))
            .collect();

        let mut files = Vec::new();
        let mut skipped = Vec::new();
        let mut record = |filename: &str, result: Result<FileComparison>| match result {
            Ok(comparison) => files.push(comparison),
            Err(err) => skipped.push(SkippedFile::from_error(Self::name(), filename, &err)),
        };

        for new_file in &new.files {
            let old_file = old_by_name.remove(new_file.filename.as_str());
            record(
                &new_file.filename,
                compare_file(classifier, old_file, Some(new_file)),
            );
        }
        for old_file in old_by_name.into_values() {
            record(&old_file.filename, compare_file(classifier, Some(old_file), None));
        }

        let total_added: usize = files.iter().map(|f| f.added).sum();
        let total_modified: usize = files.iter().map(|f| f.modified).sum();
        let total_deleted: usize = files.iter().map(|f| f.deleted).sum();
        tracing::info!(total_added, total_modified, total_deleted, "Comparison finished");

        CompareData {
            old_project: old.name.clone(),
            new_project: new.name.clone(),
            files,
            total_added,
            total_modified,
            total_deleted,
            skipped,
        }
    }

    /// Write the tagged revisions under `output_dir`. Failed writes are
    /// logged and skipped. Returns the number of files written.
    pub fn write_outputs(data: &CompareData, output_dir: &Path) -> usize {
        let mut written = 0;
        for file in &data.files {
            let outputs = [
                (DELETED_LINES_DIR, file.deleted_lines.as_ref()),
                (ADDED_LINES_DIR, file.added_lines.as_ref()),
            ];
            for (subdir, lines) in outputs {
                let Some(lines) = lines else { continue };
                let path = output_dir.join(subdir).join(&file.filename);
                match write_lines(&path, lines) {
                    Ok(()) => written += 1,
                    Err(err) => {
                        tracing::error!(path = %path.display(), error = %err, "Failed to write tagged file")
                    }
                }
            }
        }
        tracing::info!(written, dir = %output_dir.display(), "Tagged files written");
        written
    }

    /// Render `data` in `output` format.
    pub fn render(&self, data: &CompareData, output: OutputFormat) -> Result<String> {
        if let Some(rendered) = render_structured(data, &data.files, output)? {
            return Ok(rendered);
        }
        Ok(format!(
            "Comparison of '{}' (old) and '{}' (new):\n{}",
            data.old_project,
            data.new_project,
            Self::table(data)
        ))
    }

    fn table(data: &CompareData) -> prettytable::Table {
        let mut table = new_table();
        table.set_titles(Row::new(vec![
            Cell::new("File"),
            Cell::new("Revisions"),
            Cell::new("Added"),
            Cell::new("Modified"),
            Cell::new("Deleted"),
        ]));
        for file in &data.files {
            table.add_row(Row::new(vec![
                Cell::new(&file.filename),
                Cell::new(&file.pairing.to_string()),
                Cell::new(&file.added.to_string()),
                Cell::new(&file.modified.to_string()),
                Cell::new(&file.deleted.to_string()),
            ]));
        }
        table.add_row(Row::new(vec![
            Cell::new("Total"),
            Cell::new(""),
            Cell::new(&data.total_added.to_string()),
            Cell::new(&data.total_modified.to_string()),
            Cell::new(&data.total_deleted.to_string()),
        ]));
        table
    }
}

#[tracing::instrument(level = "debug", skip_all)]
fn compare_file(
    classifier: &DiffClassifier,
    old: Option<&SourceFile>,
    new: Option<&SourceFile>,
) -> Result<FileComparison> {
    let old_lines = old.map(SourceFile::read_lines).transpose()?.unwrap_or_default();
    let new_lines = new.map(SourceFile::read_lines).transpose()?.unwrap_or_default();

    let pairing = match (old, new) {
        (Some(_), Some(_)) => Pairing::Both,
        (None, Some(_)) => Pairing::NewOnly,
        (Some(_), None) => Pairing::OldOnly,
        (None, None) => {
            return Err(RevlinesError::invalid_input(
                "a comparison needs at least one revision of the file",
            ));
        }
    };
    let filename = new
        .or(old)
        .map(|f| f.filename.clone())
        .unwrap_or_default();

    let deleted = old.map(|_| classifier.classify_deleted(&old_lines, &new_lines));
    let added = new
        .map(|_| classifier.classify_added(&old_lines, &new_lines))
        .transpose()?;

    let comparison = FileComparison {
        filename,
        pairing,
        added: added
            .as_ref()
            .map_or(0, |t| t.classification.count_of(LineTag::Added)),
        modified: added
            .as_ref()
            .map_or(0, |t| t.classification.count_of(LineTag::Modified)),
        deleted: deleted.as_ref().map_or(0, |t| t.count),
        deleted_lines: deleted.map(|t| t.lines),
        added_lines: added.map(|t| t.lines),
    };
    tracing::debug!(
        file = %comparison.filename,
        added = comparison.added,
        modified = comparison.modified,
        deleted = comparison.deleted,
        "Compared file"
    );
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DEFAULT_EXTENSION;
    use crate::diff::TagMarkers;
    use crate::file_utils::read_lines;
    use crate::similarity::MIN_SIMILARITY;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(old: PathBuf, new: PathBuf, output_dir: PathBuf) -> CompareArgs {
        CompareArgs {
            old,
            new,
            output_dir,
            threshold: MIN_SIMILARITY,
            output: OutputFormat::Json,
            output_file: None,
            no_write: false,
            extension: DEFAULT_EXTENSION.to_string(),
            markers: TagMarkers::default(),
        }
    }

    fn write(dir: &Path, name: &str, lines: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), lines.join("\n")).unwrap();
    }

    fn fixture() -> (TempDir, CompareArgs) {
        let temp = TempDir::new().unwrap();
        let old = temp.path().join("v1");
        let new = temp.path().join("v2");
        write(&old, "Shared.java", &["a", "b", "c"]);
        write(&new, "Shared.java", &["a", "x", "c", "d"]);
        write(&old, "Removed.java", &["int gone;"]);
        write(&new, "Fresh.java", &["int born;", "int twin;"]);
        let out = temp.path().join("out");
        (temp, args(old, new, out))
    }

    #[test]
    fn test_analyze_pairs_files_by_name() {
        let (_temp, args) = fixture();
        let data = CompareRule::new().analyze(&args).unwrap();

        assert_eq!(data.old_project, "v1");
        assert_eq!(data.new_project, "v2");
        assert_eq!(data.files.len(), 3);

        let by_name = |name: &str| data.files.iter().find(|f| f.filename == name).unwrap();

        let shared = by_name("Shared.java");
        assert_eq!(shared.pairing, Pairing::Both);
        assert_eq!((shared.added, shared.modified, shared.deleted), (2, 0, 1));

        let fresh = by_name("Fresh.java");
        assert_eq!(fresh.pairing, Pairing::NewOnly);
        assert_eq!(fresh.added, 2);
        assert!(fresh.deleted_lines.is_none());

        let removed = by_name("Removed.java");
        assert_eq!(removed.pairing, Pairing::OldOnly);
        assert_eq!(removed.deleted, 1);
        assert!(removed.added_lines.is_none());

        assert_eq!(data.total_added, 4);
        assert_eq!(data.total_deleted, 2);
        assert!(data.skipped.is_empty());
    }

    #[test]
    fn test_run_writes_tagged_files() {
        let (_temp, args) = fixture();
        CompareRule::new().run(&args).unwrap();

        let deleted = read_lines(&args.output_dir.join(DELETED_LINES_DIR).join("Shared.java")).unwrap();
        assert_eq!(deleted, vec!["a", "b // deleted line", "c"]);

        let added = read_lines(&args.output_dir.join(ADDED_LINES_DIR).join("Shared.java")).unwrap();
        assert_eq!(added, vec!["a", "x // added line", "c", "d // added line"]);

        assert!(args.output_dir.join(ADDED_LINES_DIR).join("Fresh.java").exists());
        assert!(!args.output_dir.join(DELETED_LINES_DIR).join("Fresh.java").exists());
        assert!(args.output_dir.join(DELETED_LINES_DIR).join("Removed.java").exists());
        assert!(!args.output_dir.join(ADDED_LINES_DIR).join("Removed.java").exists());
    }

    #[test]
    fn test_no_write_leaves_output_dir_absent() {
        let (_temp, mut args) = fixture();
        args.no_write = true;
        CompareRule::new().run(&args).unwrap();
        assert!(!args.output_dir.exists());
    }

    #[test]
    fn test_custom_markers_are_appended() {
        let (_temp, mut args) = fixture();
        args.markers = TagMarkers {
            added: " // línea nueva".to_string(),
            deleted: " // línea borrada".to_string(),
            modified: " // línea modificada".to_string(),
        };
        let data = CompareRule::new().analyze(&args).unwrap();
        let shared = data.files.iter().find(|f| f.filename == "Shared.java").unwrap();
        assert_eq!(
            shared.deleted_lines.as_deref().unwrap()[1],
            "b // línea borrada"
        );
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let (_temp, mut args) = fixture();
        args.threshold = 1.5;
        let err = CompareRule::new().analyze(&args).unwrap_err();
        assert_eq!(err.name(), "InvalidInput");
    }

    #[test]
    fn test_missing_revision_directory_fails() {
        let (temp, mut args) = fixture();
        args.old = temp.path().join("does-not-exist");
        assert!(CompareRule::new().analyze(&args).is_err());
    }

    #[test]
    fn test_render_table_and_csv() {
        let (_temp, args) = fixture();
        let rule = CompareRule::new();
        let data = rule.analyze(&args).unwrap();

        let table = rule.render(&data, OutputFormat::Table).unwrap();
        assert!(table.starts_with("Comparison of 'v1' (old) and 'v2' (new):"));
        assert!(table.contains("Shared.java"));
        assert!(table.contains("old only"));

        let csv = rule.render(&data, OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("filename,pairing,added,modified,deleted")
        );
        assert!(csv.contains("Shared.java,both,2,0,1"));
    }
}
