//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::diff::TagMarkers;
use crate::formatter::DEFAULT_WIDTH;
use crate::similarity::MIN_SIMILARITY;

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = "java";
/// Default root for tagged comparison output.
pub const DEFAULT_COMPARISON_DIR: &str = "comparison_results";
/// Default root for reflowed output.
pub const DEFAULT_FORMATTED_DIR: &str = "formatted_results";

/// Top-level CLI for `revlines`.
#[derive(Parser, Debug)]
#[command(
    name = "revlines",
    version,
    about = "Compare two revisions of a source tree line by line, count LOC and methods, and reflow long lines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a configuration file. Defaults to searching for Revlines.toml,
    /// .revlines.toml or revlines.toml in the current and parent directories.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Source file extension to scan for, without the dot (default: java).
    #[arg(long, global = true)]
    pub extension: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tag deleted lines of the old revision and added/modified lines of the new one.
    Compare(CompareArgs),
    /// Report physical LOC, method counts and structural status per file.
    Metrics(MetricsArgs),
    /// Rewrite lines wider than the configured width.
    Reflow(ReflowArgs),
    /// Compare, report metrics for both revisions, then reflow the new one.
    All(AllArgs),
}

/// Report output formats shared by every subcommand.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn table on stdout.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// YAML document.
    Yaml,
    /// One CSV row per file.
    Csv,
}

/// Arguments for `revlines compare`.
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Directory holding the old revision.
    pub old: PathBuf,

    /// Directory holding the new revision.
    pub new: PathBuf,

    /// Root directory for the tagged output files.
    #[arg(long, default_value = DEFAULT_COMPARISON_DIR)]
    pub output_dir: PathBuf,

    /// Similarity at or above which a changed line counts as modified.
    #[arg(long, default_value_t = MIN_SIMILARITY)]
    pub threshold: f64,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Only report counts; do not write tagged files.
    #[arg(long)]
    pub no_write: bool,

    /// Source file extension, filled from `--extension` or the config.
    #[arg(skip = DEFAULT_EXTENSION.to_string())]
    pub extension: String,

    /// Annotation text, filled from the `[markers]` config section.
    #[arg(skip)]
    pub markers: TagMarkers,
}

/// Arguments for `revlines metrics`.
#[derive(Args, Debug, Clone)]
pub struct MetricsArgs {
    /// Project directory to measure.
    pub path: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Source file extension, filled from `--extension` or the config.
    #[arg(skip = DEFAULT_EXTENSION.to_string())]
    pub extension: String,
}

/// Arguments for `revlines reflow`.
#[derive(Args, Debug, Clone)]
pub struct ReflowArgs {
    /// Project directory whose files are reflowed.
    pub path: PathBuf,

    /// Directory receiving the reflowed files.
    #[arg(long, default_value = DEFAULT_FORMATTED_DIR)]
    pub output_dir: PathBuf,

    /// Maximum line width.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Source file extension, filled from `--extension` or the config.
    #[arg(skip = DEFAULT_EXTENSION.to_string())]
    pub extension: String,
}

/// Arguments for `revlines all`.
#[derive(Args, Debug, Clone)]
pub struct AllArgs {
    /// Directory holding the old revision.
    pub old: PathBuf,

    /// Directory holding the new revision.
    pub new: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Similarity at or above which a changed line counts as modified.
    #[arg(long, default_value_t = MIN_SIMILARITY)]
    pub threshold: f64,

    /// Root directory for the tagged output files.
    #[arg(long, default_value = DEFAULT_COMPARISON_DIR)]
    pub comparison_dir: PathBuf,

    /// Directory receiving the reflowed files.
    #[arg(long, default_value = DEFAULT_FORMATTED_DIR)]
    pub formatted_dir: PathBuf,

    /// Maximum line width for reflow.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Only report; do not write tagged or reflowed files.
    #[arg(long)]
    pub no_write: bool,

    /// Source file extension, filled from `--extension` or the config.
    #[arg(skip = DEFAULT_EXTENSION.to_string())]
    pub extension: String,

    /// Annotation text, filled from the `[markers]` config section.
    #[arg(skip)]
    pub markers: TagMarkers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare_with_defaults() {
        let cli = Cli::try_parse_from(["revlines", "compare", "v1", "v2"]).unwrap();
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.old, PathBuf::from("v1"));
        assert_eq!(args.new, PathBuf::from("v2"));
        assert_eq!(args.output_dir, PathBuf::from(DEFAULT_COMPARISON_DIR));
        assert_eq!(args.threshold, MIN_SIMILARITY);
        assert_eq!(args.output, OutputFormat::Table);
        assert_eq!(args.extension, DEFAULT_EXTENSION);
        assert!(!args.no_write);
        assert_eq!(args.markers, TagMarkers::default());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "revlines",
            "metrics",
            "src",
            "--output",
            "json",
            "--extension",
            "kt",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.extension.as_deref(), Some("kt"));
        let Commands::Metrics(args) = cli.command else {
            panic!("expected metrics");
        };
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn test_parse_reflow_width() {
        let cli = Cli::try_parse_from(["revlines", "reflow", "src", "--width", "100"]).unwrap();
        let Commands::Reflow(args) = cli.command else {
            panic!("expected reflow");
        };
        assert_eq!(args.width, 100);
        assert_eq!(args.output_dir, PathBuf::from(DEFAULT_FORMATTED_DIR));
    }

    #[test]
    fn test_compare_requires_both_revisions() {
        assert!(Cli::try_parse_from(["revlines", "compare", "v1"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
