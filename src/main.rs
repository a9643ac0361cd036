//! revlines: compare two revisions of a source tree line by line, report LOC
//! and method metrics, and reflow overlong lines.
//!
//! USAGE EXAMPLE:
//!   revlines compare ./v1 ./v2
//!   revlines metrics ./v2 --output json
//!   revlines reflow ./v2 --width 100
//!   revlines all ./v1 ./v2
//!
//! Logging is controlled with `RUST_LOG`. Without it, warnings are shown, or
//! debug output with `--verbose`.

use clap::Parser;
use color_eyre::{Report, Section};
use tracing_subscriber::EnvFilter;

use revlines_core::config::{
    RevlinesConfig, load_config, merge_all_args, merge_compare_args, merge_metrics_args,
    merge_reflow_args,
};
use revlines_core::{Cli, Commands, CompareRule, Error, MetricsRule, ReflowRule, Rule, run_all};

/// Attach the error's recovery suggestions to the report.
fn with_suggestions(err: Error) -> Report {
    let suggestions = err.suggestions();
    suggestions
        .into_iter()
        .fold(Report::new(err), |report, suggestion| report.suggestion(suggestion))
}

fn init_tracing(verbose: bool) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref()).map_err(with_suggestions)?;
    let config = match &loaded {
        Some((_, config)) => config.clone(),
        None => RevlinesConfig::default(),
    };

    init_tracing(cli.verbose || config.general.verbose)?;
    if let Some((path, _)) = &loaded {
        tracing::info!(path = %path.display(), "Using configuration file");
    }

    let extension = cli.extension.as_deref();
    let result = match &cli.command {
        Commands::Compare(args) => CompareRule::new().run(&merge_compare_args(args, extension, &config)),
        Commands::Metrics(args) => MetricsRule::new().run(&merge_metrics_args(args, extension, &config)),
        Commands::Reflow(args) => ReflowRule::new().run(&merge_reflow_args(args, extension, &config)),
        Commands::All(args) => run_all(&merge_all_args(args, extension, &config)),
    };

    result.map_err(with_suggestions)
}
