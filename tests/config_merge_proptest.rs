//! Property-based tests for merging CLI arguments with configuration.
//!
//! These verify the precedence order: explicit CLI values win, config values
//! fill in arguments left at their defaults, and an empty configuration
//! leaves the CLI arguments untouched.

use revlines_core::cli::{
    CompareArgs, DEFAULT_COMPARISON_DIR, DEFAULT_EXTENSION, DEFAULT_FORMATTED_DIR, OutputFormat,
    ReflowArgs,
};
use revlines_core::config::{
    CompareConfig, GeneralConfig, ReflowConfig, RevlinesConfig, merge_compare_args,
    merge_reflow_args,
};
use revlines_core::diff::TagMarkers;
use revlines_core::formatter::DEFAULT_WIDTH;
use revlines_core::similarity::MIN_SIMILARITY;

proptest::proptest! {
    /// Property: the default configuration is neutral.
    #[test]
    fn prop_default_config_keeps_cli_args(cli in any_compare_args()) {
        let merged = merge_compare_args(&cli, None, &RevlinesConfig::default());
        prop_assert_eq!(merged.threshold, cli.threshold);
        prop_assert_eq!(&merged.output_dir, &cli.output_dir);
        prop_assert_eq!(merged.output, cli.output);
        prop_assert_eq!(&merged.output_file, &cli.output_file);
        prop_assert_eq!(merged.extension.as_str(), DEFAULT_EXTENSION);
        prop_assert_eq!(merged.markers, TagMarkers::default());
    }

    /// Property: a threshold given on the command line beats the config.
    #[test]
    fn prop_explicit_threshold_wins(
        cli in any_compare_args(),
        config in any_config(),
    ) {
        prop_assume!(cli.threshold != MIN_SIMILARITY);
        let merged = merge_compare_args(&cli, None, &config);
        prop_assert_eq!(merged.threshold, cli.threshold);
    }

    /// Property: a CLI extension beats the config extension.
    #[test]
    fn prop_cli_extension_wins(
        config in any_config(),
        extension in "[a-z]{1,5}",
    ) {
        let merged = merge_compare_args(&default_compare_args(), Some(extension.as_str()), &config);
        prop_assert_eq!(merged.extension, extension);
    }

    /// Property: config values fill arguments left at their defaults.
    #[test]
    fn prop_config_fills_defaults(config in any_config()) {
        let merged = merge_compare_args(&default_compare_args(), None, &config);
        prop_assert_eq!(merged.threshold, config.compare.similarity_threshold);
        prop_assert_eq!(&merged.output_dir, &config.compare.output_dir);
        prop_assert_eq!(&merged.extension, &config.general.extension);
        prop_assert_eq!(&merged.output_file, &config.general.output_file);

        let reflow = merge_reflow_args(&default_reflow_args(), None, &config);
        prop_assert_eq!(reflow.width, config.reflow.width);
        prop_assert_eq!(&reflow.output_dir, &config.reflow.output_dir);
    }

    /// Property: any configuration survives a trip through its TOML form.
    #[test]
    fn prop_config_toml_round_trip(config in any_config()) {
        let text = toml::to_string(&config).unwrap();
        let parsed: RevlinesConfig = toml::from_str(&text).unwrap();
        prop_assert_eq!(parsed, config);
    }
}

// ============================================================================
// Arbitrary Implementations for proptest
// ============================================================================

use proptest::prelude::*;
use std::path::PathBuf;

fn default_compare_args() -> CompareArgs {
    CompareArgs {
        old: PathBuf::from("v1"),
        new: PathBuf::from("v2"),
        output_dir: PathBuf::from(DEFAULT_COMPARISON_DIR),
        threshold: MIN_SIMILARITY,
        output: OutputFormat::Table,
        output_file: None,
        no_write: false,
        extension: DEFAULT_EXTENSION.to_string(),
        markers: TagMarkers::default(),
    }
}

fn default_reflow_args() -> ReflowArgs {
    ReflowArgs {
        path: PathBuf::from("v2"),
        output_dir: PathBuf::from(DEFAULT_FORMATTED_DIR),
        width: DEFAULT_WIDTH,
        output: OutputFormat::Table,
        output_file: None,
        extension: DEFAULT_EXTENSION.to_string(),
    }
}

fn any_output_format() -> BoxedStrategy<OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Yaml),
        Just(OutputFormat::Csv),
    ]
    .boxed()
}

fn any_path() -> BoxedStrategy<PathBuf> {
    prop::string::string_regex(r"[a-zA-Z0-9_]{1,10}(/[a-zA-Z0-9_]{1,10}){0,2}")
        .unwrap()
        .prop_map(PathBuf::from)
        .boxed()
}

/// Strategy for generating CLI `compare` arguments.
fn any_compare_args() -> BoxedStrategy<CompareArgs> {
    (
        any_path(),
        0.0f64..=1.0,
        any_output_format(),
        prop::option::of(any_path()),
    )
        .prop_map(|(output_dir, threshold, output, output_file)| CompareArgs {
            output_dir,
            threshold,
            output,
            output_file,
            ..default_compare_args()
        })
        .boxed()
}

/// Strategy for generating configuration files.
fn any_config() -> BoxedStrategy<RevlinesConfig> {
    let general = (
        prop::string::string_regex(r"[a-z]{1,5}").unwrap(),
        any::<bool>(),
        prop::option::of(any_path()),
    )
        .prop_map(|(extension, verbose, output_file)| GeneralConfig {
            extension,
            verbose,
            output_file,
        });
    let compare = (
        any_path(),
        0.0f64..=1.0,
        prop::option::of(prop::sample::select(vec!["table", "json", "yaml", "csv"])),
    )
        .prop_map(|(output_dir, similarity_threshold, output)| CompareConfig {
            output_dir,
            similarity_threshold,
            output: output.map(str::to_string),
        });
    let reflow = (any_path(), 1usize..200).prop_map(|(output_dir, width)| ReflowConfig {
        width,
        output_dir,
        output: None,
    });
    let markers = prop::string::string_regex(r" // [a-z ]{1,12}")
        .unwrap()
        .prop_map(|added| TagMarkers {
            added,
            ..TagMarkers::default()
        });

    (general, compare, reflow, markers)
        .prop_map(|(general, compare, reflow, markers)| RevlinesConfig {
            general,
            compare,
            markers,
            reflow,
            ..RevlinesConfig::default()
        })
        .boxed()
}
