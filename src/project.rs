//! Source trees scanned from disk.
//!
//! A [`SourceProject`] is a directory and the source files found under it.
//! Files are identified by file name only, so two revisions of a project are
//! paired file by file regardless of their package directories.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, RevlinesError};
use crate::file_utils::{collect_source_files, file_name_of, file_stem_of, read_lines};

/// One source file of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// File name, e.g. `Counter.java`.
    pub filename: String,
    /// Full path on disk.
    pub path: PathBuf,
}

impl SourceFile {
    /// Create a source file record for `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            filename: file_name_of(&path),
            path,
        }
    }

    /// File name without its extension.
    pub fn class_name(&self) -> String {
        file_stem_of(&self.path)
    }

    /// Read the file's raw lines.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        read_lines(&self.path)
    }
}

/// A project directory and the source files found under it.
#[derive(Debug, Clone, Serialize)]
pub struct SourceProject {
    /// Directory name used as the program name in reports.
    pub name: String,
    /// Directory that was scanned.
    pub root: PathBuf,
    /// Files found under `root`, in file-name order.
    pub files: Vec<SourceFile>,
}

impl SourceProject {
    /// Scan `root` for files with `extension`.
    ///
    /// # Errors
    ///
    /// Returns [`RevlinesError::InvalidInput`] if `root` is not a directory
    /// and [`RevlinesError::IoError`] if traversal fails.
    #[tracing::instrument(level = "debug", skip(root), fields(root = %root.display()))]
    pub fn scan(root: &Path, extension: &str) -> Result<Self> {
        if !root.is_dir() {
            return Err(RevlinesError::invalid_input_with_arg(
                format!("'{}' is not a directory", root.display()),
                root.display().to_string(),
            ));
        }

        let mut paths = Vec::new();
        collect_source_files(root, extension, &mut paths)?;
        let files: Vec<SourceFile> = paths.into_iter().map(SourceFile::new).collect();
        tracing::debug!(files = files.len(), "Scanned project");

        let project = Self {
            name: project_name(root),
            root: root.to_path_buf(),
            files,
        };
        if project.is_empty() {
            tracing::warn!(extension, "No source files found");
        }
        Ok(project)
    }

    /// Returns true if the scan found no source files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A file whose pipeline did not run, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    /// Display text of the error that stopped the file.
    pub reason: String,
}

impl SkippedFile {
    /// Record `file` as skipped because of `err`. File-scoped failures are
    /// logged as warnings, anything else as an error.
    pub fn from_error(rule: &str, filename: &str, err: &RevlinesError) -> Self {
        if err.is_file_scoped() {
            tracing::warn!(rule, file = filename, error = %err, "Skipping file");
        } else {
            tracing::error!(rule, file = filename, error = %err, "Skipping file");
        }
        Self {
            filename: filename.to_string(),
            reason: err.to_string(),
        }
    }
}

fn project_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| root.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
