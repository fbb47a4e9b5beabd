//! Command executors that handle the actual logic for each command

pub mod check;
pub mod graph;

use console::style;
use miette::{Result, WrapErr};

use crate::analyzer::{AnalysisReport, ImportAnalyzer};
use crate::config::AnalysisConfig;
use crate::progress::ProgressReporter;

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Merge settings, then analyze the configured entry file
pub(crate) fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport> {
    let options = config
        .options()
        .wrap_err("Failed to load analysis settings")?;

    // Create progress reporter if we're in an interactive terminal
    let mut progress = if !config.quiet && console::Term::stderr().is_term() {
        Some(ProgressReporter::new())
    } else {
        None
    };

    let mut analyzer = ImportAnalyzer::new(options);
    let report = analyzer
        .analyze(&config.entry, progress.as_mut())
        .wrap_err_with(|| format!("Failed to analyze '{}'", config.entry.display()))?;

    if !config.quiet {
        eprintln!(
            "{} Workspace root: {}",
            style("→").dim(),
            style(report.root.display()).bold()
        );
    }

    Ok(report)
}
