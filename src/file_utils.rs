use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, RevlinesError};

/// Recursively collect every file under `dir` whose extension is
/// `extension` into `out_files`, in file-name order.
///
/// # Parameters
/// - `dir`: the project directory to walk.
/// - `extension`: extension without the leading dot (e.g. `"java"`).
/// - `out_files`: a `Vec<PathBuf>` to push each discovered file into.
///
/// # Returns
/// - `Ok(())` if successful.
/// - `Err` if directory traversal fails.
pub fn collect_source_files(
    dir: &Path,
    extension: &str,
    out_files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry_result in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry_result?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext == extension)
        {
            out_files.push(entry.into_path());
        }
    }
    Ok(())
}

/// Read `path` into one string per line, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        RevlinesError::io_error_with_source("read source file", path.to_path_buf(), e)
    })?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Write `lines` to `path`, one per line, creating parent directories as
/// needed. An existing file is replaced.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            RevlinesError::io_error_with_source("create output directory", parent.to_path_buf(), e)
        })?;
    }

    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    fs::write(path, content)
        .map_err(|e| RevlinesError::io_error_with_source("write output file", path.to_path_buf(), e))
}

/// Final path component as a string, e.g. `Counter.java`.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// File name with its extension removed, e.g. `Counter` for `Counter.java`.
pub fn file_stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name_of(path))
}
