//! Configuration file support for revlines.
//!
//! Settings are read from a TOML file and merged with command-line
//! arguments. CLI arguments take precedence over config file values, which
//! take precedence over the built-in defaults.
//!
//! ```toml
//! [general]
//! extension = "java"
//! verbose = false
//!
//! [compare]
//! output_dir = "comparison_results"
//! similarity_threshold = 0.70
//!
//! [markers]
//! added = " // added line"
//!
//! [reflow]
//! width = 100
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{
    AllArgs, CompareArgs, DEFAULT_COMPARISON_DIR, DEFAULT_EXTENSION, DEFAULT_FORMATTED_DIR,
    MetricsArgs, OutputFormat, ReflowArgs,
};
use crate::diff::TagMarkers;
use crate::error::{Result, RevlinesError};
use crate::formatter::DEFAULT_WIDTH;
use crate::similarity::MIN_SIMILARITY;

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["Revlines.toml", ".revlines.toml", "revlines.toml"];

/// A revlines configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RevlinesConfig {
    /// Settings shared by every command.
    #[serde(default)]
    pub general: GeneralConfig,

    /// `compare` command settings.
    #[serde(default)]
    pub compare: CompareConfig,

    /// Annotation text appended to tagged lines.
    #[serde(default)]
    pub markers: TagMarkers,

    /// `metrics` command settings.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// `reflow` command settings.
    #[serde(default)]
    pub reflow: ReflowConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Source file extension to scan for, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Enable debug logging.
    #[serde(default)]
    pub verbose: bool,

    /// Write reports to this file instead of stdout.
    pub output_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            verbose: false,
            output_file: None,
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// `compare` configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompareConfig {
    /// Root directory for tagged output.
    #[serde(default = "default_comparison_dir")]
    pub output_dir: PathBuf,

    /// Similarity at or above which a changed line counts as modified.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Report format.
    pub output: Option<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            output_dir: default_comparison_dir(),
            similarity_threshold: MIN_SIMILARITY,
            output: None,
        }
    }
}

fn default_comparison_dir() -> PathBuf {
    PathBuf::from(DEFAULT_COMPARISON_DIR)
}

fn default_similarity_threshold() -> f64 {
    MIN_SIMILARITY
}

/// `metrics` configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Report format.
    pub output: Option<String>,
}

/// `reflow` configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReflowConfig {
    /// Maximum line width.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Directory receiving the reflowed files.
    #[serde(default = "default_formatted_dir")]
    pub output_dir: PathBuf,

    /// Report format.
    pub output: Option<String>,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            output_dir: default_formatted_dir(),
            output: None,
        }
    }
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_formatted_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FORMATTED_DIR)
}

/// Load configuration from a specific file path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns [`RevlinesError::ConfigError`] if the file exists but cannot be
/// read or parsed.
pub fn load_config_from_path(path: &Path) -> Result<Option<RevlinesConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        RevlinesError::config_error_with_path(format!("Failed to read config: {e}"), path.to_path_buf())
    })?;
    let config: RevlinesConfig = toml::from_str(&content).map_err(|e| {
        RevlinesError::config_error_with_path(format!("Invalid config: {e}"), path.to_path_buf())
    })?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(Some(config))
}

/// Discover and load configuration from default locations.
///
/// Searches the current directory and then each parent directory for
/// `Revlines.toml`, `.revlines.toml` or `revlines.toml`, in that order.
pub fn discover_and_load_config() -> Result<Option<(PathBuf, RevlinesConfig)>> {
    let mut current_dir = std::env::current_dir()?;

    loop {
        for config_name in DEFAULT_CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if let Some(config) = load_config_from_path(&config_path)? {
                return Ok(Some((config_path, config)));
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Ok(None)
}

/// Load configuration from `config_path` if given, otherwise discover it.
///
/// A `config_path` that does not exist is an error, unlike a missing
/// discovered file.
pub fn load_config(config_path: Option<&Path>) -> Result<Option<(PathBuf, RevlinesConfig)>> {
    match config_path {
        Some(path) => match load_config_from_path(path)? {
            Some(config) => Ok(Some((path.to_path_buf(), config))),
            None => Err(RevlinesError::config_error_with_path(
                "Config file not found",
                path.to_path_buf(),
            )),
        },
        None => discover_and_load_config(),
    }
}

/// Parse a report format name.
pub fn parse_output_format(s: &str) -> Option<OutputFormat> {
    match s.to_lowercase().as_str() {
        "table" => Some(OutputFormat::Table),
        "json" => Some(OutputFormat::Json),
        "yaml" => Some(OutputFormat::Yaml),
        "csv" => Some(OutputFormat::Csv),
        _ => None,
    }
}

/// Config output format, used only when the CLI is on its default.
fn merge_output(cli: OutputFormat, config: Option<&String>) -> OutputFormat {
    match config {
        Some(name) if cli == OutputFormat::default() => match parse_output_format(name) {
            Some(format) => format,
            None => {
                tracing::warn!(output = %name, "Unknown output format in config, using table");
                cli
            }
        },
        _ => cli,
    }
}

/// CLI `--extension`, then `[general] extension`.
fn merge_extension(cli_extension: Option<&str>, config: &RevlinesConfig) -> String {
    cli_extension
        .map(str::to_string)
        .unwrap_or_else(|| config.general.extension.clone())
}

/// Merge `compare` CLI args with config file values.
///
/// Priority order:
/// 1. CLI arguments (highest priority)
/// 2. Config file values
/// 3. Default values (lowest priority)
///
/// Clap fills defaults, so a CLI value equal to its default is treated as
/// unset.
pub fn merge_compare_args(
    cli_args: &CompareArgs,
    cli_extension: Option<&str>,
    config: &RevlinesConfig,
) -> CompareArgs {
    let mut merged = cli_args.clone();

    if merged.output_dir.as_os_str() == DEFAULT_COMPARISON_DIR {
        merged.output_dir = config.compare.output_dir.clone();
    }
    if merged.threshold == MIN_SIMILARITY {
        merged.threshold = config.compare.similarity_threshold;
    }
    merged.output = merge_output(merged.output, config.compare.output.as_ref());
    if merged.output_file.is_none() {
        merged.output_file = config.general.output_file.clone();
    }
    merged.extension = merge_extension(cli_extension, config);
    merged.markers = config.markers.clone();

    merged
}

/// Merge `metrics` CLI args with config file values.
pub fn merge_metrics_args(
    cli_args: &MetricsArgs,
    cli_extension: Option<&str>,
    config: &RevlinesConfig,
) -> MetricsArgs {
    let mut merged = cli_args.clone();

    merged.output = merge_output(merged.output, config.metrics.output.as_ref());
    if merged.output_file.is_none() {
        merged.output_file = config.general.output_file.clone();
    }
    merged.extension = merge_extension(cli_extension, config);

    merged
}

/// Merge `reflow` CLI args with config file values.
pub fn merge_reflow_args(
    cli_args: &ReflowArgs,
    cli_extension: Option<&str>,
    config: &RevlinesConfig,
) -> ReflowArgs {
    let mut merged = cli_args.clone();

    if merged.output_dir.as_os_str() == DEFAULT_FORMATTED_DIR {
        merged.output_dir = config.reflow.output_dir.clone();
    }
    if merged.width == DEFAULT_WIDTH {
        merged.width = config.reflow.width;
    }
    merged.output = merge_output(merged.output, config.reflow.output.as_ref());
    if merged.output_file.is_none() {
        merged.output_file = config.general.output_file.clone();
    }
    merged.extension = merge_extension(cli_extension, config);

    merged
}

/// Merge `all` CLI args with config file values. The `[compare]` section
/// supplies the report format.
pub fn merge_all_args(
    cli_args: &AllArgs,
    cli_extension: Option<&str>,
    config: &RevlinesConfig,
) -> AllArgs {
    let mut merged = cli_args.clone();

    if merged.comparison_dir.as_os_str() == DEFAULT_COMPARISON_DIR {
        merged.comparison_dir = config.compare.output_dir.clone();
    }
    if merged.formatted_dir.as_os_str() == DEFAULT_FORMATTED_DIR {
        merged.formatted_dir = config.reflow.output_dir.clone();
    }
    if merged.threshold == MIN_SIMILARITY {
        merged.threshold = config.compare.similarity_threshold;
    }
    if merged.width == DEFAULT_WIDTH {
        merged.width = config.reflow.width;
    }
    merged.output = merge_output(merged.output, config.compare.output.as_ref());
    if merged.output_file.is_none() {
        merged.output_file = config.general.output_file.clone();
    }
    merged.extension = merge_extension(cli_extension, config);
    merged.markers = config.markers.clone();

    merged
}
