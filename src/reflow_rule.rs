//! The `reflow` rule: rewrites every file of a project so its lines fit the
//! configured width, writing the result to `<output_dir>/<file>`.

use prettytable::{Cell, Row};
use serde::Serialize;
use std::path::Path;

use crate::cli::{OutputFormat, ReflowArgs};
use crate::error::{Result, RevlinesError};
use crate::file_utils::write_lines;
use crate::formatter::LineFormatter;
use crate::project::{SkippedFile, SourceFile, SourceProject};
use crate::reporting::{emit, new_table, render_structured};
use crate::rule::Rule;

/// Reflow result for one file.
#[derive(Debug, Clone, Serialize)]
pub struct ReflowedFile {
    pub filename: String,
    /// Line count before reflow.
    pub input_lines: usize,
    /// Line count after reflow.
    pub output_lines: usize,
    /// Input lines that were wider than the limit.
    pub reflowed: usize,
    /// Reflowed content, written to the output directory.
    #[serde(skip)]
    pub lines: Vec<String>,
}

/// Output of [`ReflowRule::analyze`].
#[derive(Debug, Clone, Serialize)]
pub struct ReflowData {
    /// Name of the project's root directory.
    pub program: String,
    /// Maximum line width used.
    pub width: usize,
    pub files: Vec<ReflowedFile>,
    /// Files that could not be read.
    pub skipped: Vec<SkippedFile>,
}

/// Rule reflowing the overlong lines of a project.
#[derive(Debug, Default)]
pub struct ReflowRule;

impl Rule for ReflowRule {
    type Config = ReflowArgs;
    type Data = ReflowData;

    fn name() -> &'static str {
        "reflow"
    }

    fn description() -> &'static str {
        "Rewrites lines wider than the configured width"
    }

    #[tracing::instrument(level = "debug", skip_all, err)]
    fn run(&self, args: &ReflowArgs) -> Result<()> {
        let data = self.analyze(args)?;
        Self::write_outputs(&data, &args.output_dir);
        let rendered = self.render(&data, args.output)?;
        emit(&rendered, args.output_file.as_deref())
    }

    fn analyze(&self, args: &ReflowArgs) -> Result<ReflowData> {
        if args.width == 0 {
            return Err(RevlinesError::invalid_input_with_arg(
                "line width must be at least 1",
                "width",
            ));
        }
        let project = SourceProject::scan(&args.path, &args.extension)?;
        Ok(self.reflow_project(&project, args.width))
    }
}

impl ReflowRule {
    /// Create the rule.
    pub fn new() -> Self {
        ReflowRule
    }

    /// Reflow every file of `project` to `width`.
    pub fn reflow_project(&self, project: &SourceProject, width: usize) -> ReflowData {
        tracing::info!(program = %project.name, width, "Reflowing project");
        let formatter = LineFormatter::with_width(width);

        let mut files = Vec::new();
        let mut skipped = Vec::new();
        for file in &project.files {
            match reflow_file(&formatter, file) {
                Ok(reflowed) => files.push(reflowed),
                Err(err) => skipped.push(SkippedFile::from_error(Self::name(), &file.filename, &err)),
            }
        }

        ReflowData {
            program: project.name.clone(),
            width: formatter.width(),
            files,
            skipped,
        }
    }

    /// Write each reflowed file to `output_dir`. Failed writes are logged
    /// and skipped. Returns the number of files written.
    pub fn write_outputs(data: &ReflowData, output_dir: &Path) -> usize {
        let mut written = 0;
        for file in &data.files {
            let path = output_dir.join(&file.filename);
            match write_lines(&path, &file.lines) {
                Ok(()) => written += 1,
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "Failed to write reflowed file")
                }
            }
        }
        tracing::info!(written, dir = %output_dir.display(), "Reflowed files written");
        written
    }

    /// Render `data` in `output` format.
    pub fn render(&self, data: &ReflowData, output: OutputFormat) -> Result<String> {
        if let Some(rendered) = render_structured(data, &data.files, output)? {
            return Ok(rendered);
        }
        Ok(format!(
            "Reflow of '{}' at width {}:\n{}",
            data.program,
            data.width,
            Self::table(data)
        ))
    }

    fn table(data: &ReflowData) -> prettytable::Table {
        let mut table = new_table();
        table.set_titles(Row::new(vec![
            Cell::new("File"),
            Cell::new("Lines in"),
            Cell::new("Lines out"),
            Cell::new("Reflowed"),
        ]));
        for file in &data.files {
            table.add_row(Row::new(vec![
                Cell::new(&file.filename),
                Cell::new(&file.input_lines.to_string()),
                Cell::new(&file.output_lines.to_string()),
                Cell::new(&file.reflowed.to_string()),
            ]));
        }
        table
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(file = %file.filename))]
fn reflow_file(formatter: &LineFormatter, file: &SourceFile) -> Result<ReflowedFile> {
    let input = file.read_lines()?;
    let reflowed = input
        .iter()
        .filter(|line| line.chars().count() > formatter.width())
        .count();
    let lines = formatter.format(&input);
    tracing::debug!(reflowed, "Reflowed file");

    Ok(ReflowedFile {
        filename: file.filename.clone(),
        input_lines: input.len(),
        output_lines: lines.len(),
        reflowed,
        lines,
    })
}
