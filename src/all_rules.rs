//! Orchestration for running every rule in one invocation.
//!
//! [`run_all`] compares the two revisions, reports metrics for both of them
//! and reflows the new one. A failing section does not stop the others; its
//! error is logged and listed in the consolidated report.
//!
//! # Output Formats
//!
//! - **Table**: the section tables one after another
//! - **JSON** / **YAML**: one document holding every section plus `errors`
//! - **CSV**: the metrics rows of both revisions
//!
//! # Example
//!
//! ```rust,no_run
//! use revlines_core::{run_all, AllArgs, OutputFormat, TagMarkers};
//! use std::path::PathBuf;
//!
//! # fn main() -> revlines_core::error::Result<()> {
//! let args = AllArgs {
//!     old: PathBuf::from("./v1"),
//!     new: PathBuf::from("./v2"),
//!     output: OutputFormat::Json,
//!     output_file: None,
//!     threshold: 0.7,
//!     comparison_dir: PathBuf::from("comparison_results"),
//!     formatted_dir: PathBuf::from("formatted_results"),
//!     width: 80,
//!     no_write: false,
//!     extension: "java".to_string(),
//!     markers: TagMarkers::default(),
//! };
//!
//! run_all(&args)?;
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{AllArgs, CompareArgs, MetricsArgs, OutputFormat, ReflowArgs};
use crate::compare_rule::{CompareData, CompareRule};
use crate::error::Result;
use crate::metrics_rule::{FileMetricsRow, MetricsData, MetricsRule};
use crate::reflow_rule::{ReflowData, ReflowRule};
use crate::reporting::{emit, render_structured};
use crate::rule::Rule;

/// Results of every section of an `all` run. `None` means the section was
/// not run.
#[derive(Debug, Default)]
pub struct AllReportData {
    /// Comparison of the two revisions.
    pub compare: Option<Result<CompareData>>,
    /// Metrics of the old revision.
    pub old_metrics: Option<Result<MetricsData>>,
    /// Metrics of the new revision.
    pub new_metrics: Option<Result<MetricsData>>,
    /// Reflow of the new revision.
    pub reflow: Option<Result<ReflowData>>,
}

#[derive(Debug, Serialize)]
struct ConsolidatedReport<'a> {
    compare: Option<&'a CompareData>,
    old_metrics: Option<&'a MetricsData>,
    new_metrics: Option<&'a MetricsData>,
    reflow: Option<&'a ReflowData>,
    errors: Vec<String>,
}

impl AllReportData {
    /// Create an empty report with no section run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Error messages of the failed sections, labelled by section.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(Err(e)) = &self.compare {
            errors.push(format!("Compare Error: {e}"));
        }
        if let Some(Err(e)) = &self.old_metrics {
            errors.push(format!("Old Metrics Error: {e}"));
        }
        if let Some(Err(e)) = &self.new_metrics {
            errors.push(format!("New Metrics Error: {e}"));
        }
        if let Some(Err(e)) = &self.reflow {
            errors.push(format!("Reflow Error: {e}"));
        }
        errors
    }

    fn successful_metrics(&self) -> Vec<MetricsData> {
        [&self.old_metrics, &self.new_metrics]
            .into_iter()
            .filter_map(|section| section.as_ref().and_then(|r| r.as_ref().ok()))
            .cloned()
            .collect()
    }

    fn consolidated(&self) -> ConsolidatedReport<'_> {
        ConsolidatedReport {
            compare: self.compare.as_ref().and_then(|r| r.as_ref().ok()),
            old_metrics: self.old_metrics.as_ref().and_then(|r| r.as_ref().ok()),
            new_metrics: self.new_metrics.as_ref().and_then(|r| r.as_ref().ok()),
            reflow: self.reflow.as_ref().and_then(|r| r.as_ref().ok()),
            errors: self.errors(),
        }
    }
}

/// Split the `all` arguments into the arguments of each rule.
fn section_args(args: &AllArgs) -> (CompareArgs, MetricsArgs, MetricsArgs, ReflowArgs) {
    let metrics = |path: &PathBuf| MetricsArgs {
        path: path.clone(),
        output: args.output,
        output_file: None,
        extension: args.extension.clone(),
    };
    let compare = CompareArgs {
        old: args.old.clone(),
        new: args.new.clone(),
        output_dir: args.comparison_dir.clone(),
        threshold: args.threshold,
        output: args.output,
        output_file: None,
        no_write: args.no_write,
        extension: args.extension.clone(),
        markers: args.markers.clone(),
    };
    let reflow = ReflowArgs {
        path: args.new.clone(),
        output_dir: args.formatted_dir.clone(),
        width: args.width,
        output: args.output,
        output_file: None,
        extension: args.extension.clone(),
    };
    (compare, metrics(&args.old), metrics(&args.new), reflow)
}

/// Analyze every section without writing anything.
pub fn analyze_all(args: &AllArgs) -> AllReportData {
    let (compare_args, old_args, new_args, reflow_args) = section_args(args);
    let data = AllReportData {
        compare: Some(CompareRule::new().analyze(&compare_args)),
        old_metrics: Some(MetricsRule::new().analyze(&old_args)),
        new_metrics: Some(MetricsRule::new().analyze(&new_args)),
        reflow: Some(ReflowRule::new().analyze(&reflow_args)),
    };
    for error in data.errors() {
        tracing::error!(error = %error, "Section failed");
    }
    data
}

/// Render the consolidated report in `output` format.
pub fn render_all(data: &AllReportData, output: OutputFormat) -> Result<String> {
    let metrics = data.successful_metrics();
    let rows: Vec<&FileMetricsRow> = metrics.iter().flat_map(|m| &m.files).collect();
    if let Some(rendered) = render_structured(&data.consolidated(), &rows, output)? {
        return Ok(rendered);
    }

    let mut parts = Vec::new();
    if let Some(Ok(compare)) = &data.compare {
        parts.push(CompareRule::new().render(compare, OutputFormat::Table)?);
    }
    if !metrics.is_empty() {
        parts.push(format!(
            "Metrics:\n{}",
            MetricsRule::render(&metrics, OutputFormat::Table)?
        ));
    }
    if let Some(Ok(reflow)) = &data.reflow {
        parts.push(ReflowRule::new().render(reflow, OutputFormat::Table)?);
    }
    let errors = data.errors();
    if !errors.is_empty() {
        parts.push(format!("Errors:\n{}", errors.join("\n")));
    }
    Ok(parts.join("\n"))
}

/// Run every section, write its output files unless `no_write` is set, and
/// emit the consolidated report.
#[tracing::instrument(level = "debug", skip_all, err)]
pub fn run_all(args: &AllArgs) -> Result<()> {
    let data = analyze_all(args);

    if !args.no_write {
        if let Some(Ok(compare)) = &data.compare {
            CompareRule::write_outputs(compare, &args.comparison_dir);
        }
        if let Some(Ok(reflow)) = &data.reflow {
            ReflowRule::write_outputs(reflow, &args.formatted_dir);
        }
    }

    let rendered = render_all(&data, args.output)?;
    emit(&rendered, args.output_file.as_deref())
}
