//! The `metrics` rule: physical LOC, method count and structural status for
//! every file of a project, plus the project's total physical LOC.

use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::cli::{MetricsArgs, OutputFormat};
use crate::error::Result;
use crate::metrics::{Status, compute_metrics};
use crate::project::{SkippedFile, SourceFile, SourceProject};
use crate::reporting::{emit, new_table, render_structured};
use crate::rule::Rule;

/// Metrics of one file, flattened for tables and CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetricsRow {
    /// Project the file belongs to.
    pub program: String,
    /// File name without extension.
    pub class: String,
    /// Concrete method signatures outside comments.
    pub methods: usize,
    /// Non-blank, non-comment lines; zero for a malformed file.
    pub physical_loc: usize,
    pub status: Status,
}

/// Output of [`MetricsRule::analyze`] for one project.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsData {
    /// Name of the project's root directory.
    pub program: String,
    pub files: Vec<FileMetricsRow>,
    /// Sum of the physical LOC of every measured file.
    pub total_physical_loc: usize,
    /// Files that could not be read.
    pub skipped: Vec<SkippedFile>,
}

/// Rule measuring every file of a project.
#[derive(Debug, Default)]
pub struct MetricsRule;

impl Rule for MetricsRule {
    type Config = MetricsArgs;
    type Data = MetricsData;

    fn name() -> &'static str {
        "metrics"
    }

    fn description() -> &'static str {
        "Reports physical LOC, method count and structural status per file"
    }

    #[tracing::instrument(level = "debug", skip_all, err)]
    fn run(&self, args: &MetricsArgs) -> Result<()> {
        let data = self.analyze(args)?;
        let rendered = Self::render(std::slice::from_ref(&data), args.output)?;
        emit(&rendered, args.output_file.as_deref())
    }

    fn analyze(&self, args: &MetricsArgs) -> Result<MetricsData> {
        let project = SourceProject::scan(&args.path, &args.extension)?;
        Ok(self.measure(&project))
    }
}

impl MetricsRule {
    /// Create the rule.
    pub fn new() -> Self {
        MetricsRule
    }

    /// Measure every file of `project`. Unreadable files are skipped.
    pub fn measure(&self, project: &SourceProject) -> MetricsData {
        tracing::info!(program = %project.name, files = project.files.len(), "Measuring project");

        let mut files = Vec::new();
        let mut skipped = Vec::new();
        for file in &project.files {
            match measure_file(&project.name, file) {
                Ok(row) => files.push(row),
                Err(err) => skipped.push(SkippedFile::from_error(Self::name(), &file.filename, &err)),
            }
        }

        let total_physical_loc = files.iter().map(|f| f.physical_loc).sum();
        MetricsData {
            program: project.name.clone(),
            files,
            total_physical_loc,
            skipped,
        }
    }

    /// Render one or more projects' metrics in `output` format.
    ///
    /// Tables list each project followed by its total row. CSV carries the
    /// file rows of every project.
    pub fn render(data: &[MetricsData], output: OutputFormat) -> Result<String> {
        let rows: Vec<&FileMetricsRow> = data.iter().flat_map(|d| &d.files).collect();
        let structured = match data {
            [single] => render_structured(single, &rows, output)?,
            _ => render_structured(&data, &rows, output)?,
        };
        if let Some(rendered) = structured {
            return Ok(rendered);
        }
        Ok(Self::table(data).to_string())
    }

    fn table(data: &[MetricsData]) -> Table {
        let mut table = new_table();
        table.set_titles(Row::new(vec![
            Cell::new("Program"),
            Cell::new("Class"),
            Cell::new("Methods"),
            Cell::new("Physical LOC"),
            Cell::new("Total physical LOC"),
            Cell::new("Status"),
        ]));
        for project in data {
            for row in &project.files {
                table.add_row(Row::new(vec![
                    Cell::new(&row.program),
                    Cell::new(&row.class),
                    Cell::new(&row.methods.to_string()),
                    Cell::new(&row.physical_loc.to_string()),
                    Cell::new(""),
                    Cell::new(row.status.label()),
                ]));
            }
            if project.total_physical_loc > 0 {
                table.add_row(Row::new(vec![
                    Cell::new("Total Lines"),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(&project.total_physical_loc.to_string()),
                    Cell::new(""),
                ]));
            }
        }
        table
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(file = %file.filename))]
fn measure_file(program: &str, file: &SourceFile) -> Result<FileMetricsRow> {
    let lines = file.read_lines()?;
    let metrics = compute_metrics(&lines);
    if metrics.status != Status::Ok {
        tracing::debug!(status = %metrics.status, "File did not pass validation");
    }
    Ok(FileMetricsRow {
        program: program.to_string(),
        class: file.class_name(),
        methods: metrics.method_count,
        physical_loc: metrics.physical_loc,
        status: metrics.status,
    })
}
