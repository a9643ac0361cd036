//! Error types for revlines.
//!
//! This module defines the error type shared by the line engine and the
//! file-level rules. Each variant corresponds to one failure mode so callers
//! can decide whether a failure is file-scoped (skip and continue) or not.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The main error type for revlines operations.
#[derive(Debug)]
pub enum RevlinesError {
    /// A file could not be read, written or traversed.
    IoError {
        /// The operation being performed.
        operation: String,
        /// The path involved in the error.
        path: Option<PathBuf>,
        /// The underlying IO error.
        source: Option<io::Error>,
    },

    /// An argument was missing or invalid.
    InvalidInput {
        /// Description of the invalid input.
        message: String,
        /// The argument or value that was invalid.
        argument: Option<String>,
    },

    /// A formatter strategy did not find the structural marker it splits on.
    ///
    /// The formatter never surfaces this to callers; it falls back to the
    /// whitespace wrap instead.
    NoMatch {
        /// The strategy that gave up.
        strategy: &'static str,
        /// The line the strategy was applied to.
        line: String,
    },

    /// An error occurred while loading or parsing configuration.
    ConfigError {
        /// Description of the configuration issue.
        message: String,
        /// The config file path, if applicable.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A rule could not complete.
    AnalysisError {
        /// The rule that failed.
        rule: String,
        /// Description of what went wrong.
        message: String,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RevlinesError {
    /// Creates a new `IoError` with a path and underlying error.
    ///
    /// # Arguments
    /// * `operation` - A description of the IO operation being performed.
    /// * `path` - The path involved in the error.
    /// * `source` - The underlying IO error.
    pub fn io_error_with_source(
        operation: impl Into<String>,
        path: PathBuf,
        source: io::Error,
    ) -> Self {
        Self::IoError {
            operation: operation.into(),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Creates a new `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            argument: None,
        }
    }

    /// Creates a new `InvalidInput` error with an argument name.
    pub fn invalid_input_with_arg(message: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            argument: Some(argument.into()),
        }
    }

    /// Creates a new `NoMatch` error for a formatter strategy.
    pub fn no_match(strategy: &'static str, line: impl Into<String>) -> Self {
        Self::NoMatch {
            strategy,
            line: line.into(),
        }
    }

    /// Creates a new `ConfigError` with a file path.
    pub fn config_error_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `AnalysisError` for the given rule.
    ///
    /// # Arguments
    /// * `rule` - The name of the rule that failed.
    /// * `message` - A description of what went wrong.
    pub fn analysis_error(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AnalysisError {
            rule: rule.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Returns the name of the error variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IoError { .. } => "IoError",
            Self::InvalidInput { .. } => "InvalidInput",
            Self::NoMatch { .. } => "NoMatch",
            Self::ConfigError { .. } => "ConfigError",
            Self::AnalysisError { .. } => "AnalysisError",
        }
    }

    /// Returns true when the failure only concerns a single file and the
    /// caller may continue with the next one.
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, Self::IoError { .. } | Self::NoMatch { .. })
    }

    /// Returns suggested recovery actions for the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::IoError { operation, .. } => {
                let mut s = vec![
                    "Check that the path exists and is accessible".to_string(),
                    "Verify you have the necessary permissions".to_string(),
                ];
                if operation.contains("write") {
                    s.push("Ensure the output directory is writable".to_string());
                }
                s
            }
            Self::InvalidInput { .. } => vec![
                "Review the command-line arguments".to_string(),
                "Verify both revisions were provided".to_string(),
            ],
            Self::NoMatch { strategy, .. } => vec![format!(
                "The '{}' strategy could not split this line; it was wrapped by the fallback",
                strategy
            )],
            Self::ConfigError { .. } => vec![
                "Check the configuration file syntax".to_string(),
                "Ensure the file is valid TOML format".to_string(),
                "Remove keys that are not part of the documented sections".to_string(),
            ],
            Self::AnalysisError { rule, .. } => vec![
                format!("Ensure the '{}' rule has valid inputs", rule),
                "Check that the directories contain source files".to_string(),
            ],
        }
    }
}

impl fmt::Display for RevlinesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError {
                operation, path, ..
            } => {
                if let Some(p) = path {
                    write!(
                        f,
                        "IO error during '{}' at '{}': operation failed",
                        operation,
                        p.display()
                    )
                } else {
                    write!(f, "IO error during '{}': operation failed", operation)
                }
            }
            Self::InvalidInput { message, argument } => {
                if let Some(arg) = argument {
                    write!(f, "Invalid input '{}': {}", arg, message)
                } else {
                    write!(f, "Invalid input: {}", message)
                }
            }
            Self::NoMatch { strategy, line } => {
                write!(f, "No split point for strategy '{}' in line: {}", strategy, line)
            }
            Self::ConfigError { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Configuration error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::AnalysisError { rule, message, .. } => {
                write!(f, "Analysis error in rule '{}': {}", rule, message)
            }
        }
    }
}

impl std::error::Error for RevlinesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => source.as_ref().map(|e| e as _),
            Self::ConfigError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::AnalysisError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::InvalidInput { .. } | Self::NoMatch { .. } => None,
        }
    }
}

impl From<io::Error> for RevlinesError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            operation: "file operation".to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<toml::de::Error> for RevlinesError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::ser::Error> for RevlinesError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to serialize TOML: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for RevlinesError {
    fn from(err: serde_json::Error) -> Self {
        Self::AnalysisError {
            rule: "json_output".to_string(),
            message: format!("Failed to serialize JSON: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for RevlinesError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::AnalysisError {
            rule: "yaml_output".to_string(),
            message: format!("Failed to serialize YAML: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for RevlinesError {
    fn from(err: csv::Error) -> Self {
        Self::AnalysisError {
            rule: "csv_output".to_string(),
            message: format!("Failed to write CSV: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<walkdir::Error> for RevlinesError {
    fn from(err: walkdir::Error) -> Self {
        Self::IoError {
            operation: "directory traversal".to_string(),
            path: err.path().map(PathBuf::from),
            source: None,
        }
    }
}

/// A type alias for `Result<T, RevlinesError>`.
pub type Result<T> = std::result::Result<T, RevlinesError>;
