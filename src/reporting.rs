//! Report rendering shared by the rules.
//!
//! Every rule renders its data to a string in the requested
//! [`OutputFormat`] and hands it to [`emit`], which prints it or writes it to
//! the configured output file.

use prettytable::{format, Table};
use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::file_utils::write_lines;

/// Box-drawing table format used by every table report.
pub fn get_default_table_format() -> format::TableFormat {
    format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '┌', '┐'),
        )
        .separators(
            &[format::LinePosition::Title, format::LinePosition::Intern],
            format::LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '└', '┘'),
        )
        .padding(1, 1)
        .build()
}

/// A new empty table with the default format applied.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(get_default_table_format());
    table
}

/// Render `data` as JSON or YAML, or `rows` as CSV.
///
/// Returns `None` for [`OutputFormat::Table`], which each rule renders
/// itself.
pub fn render_structured<T, R>(data: &T, rows: &[R], output: OutputFormat) -> Result<Option<String>>
where
    T: Serialize,
    R: Serialize,
{
    match output {
        OutputFormat::Table => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(data)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(data)?)),
        OutputFormat::Csv => render_csv(rows).map(Some),
    }
}

/// Serialize `rows` as CSV with a header row.
pub fn render_csv<R: Serialize>(rows: &[R]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::rule_error!("csv_output", "Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Print `rendered` to stdout, or write it to `output_file` when set.
pub fn emit(rendered: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            write_lines(path, &[rendered.trim_end()])?;
            tracing::info!(path = %path.display(), "Report written");
            Ok(())
        }
        None => {
            println!("{}", rendered.trim_end());
            Ok(())
        }
    }
}
