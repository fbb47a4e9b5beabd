//! Check command executor

use console::style;
use miette::{Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::CheckCyclesConfig;
use crate::executors::{CommandExecutor, run_analysis};
use crate::reports::{
    GitHubReportGenerator, HumanReportGenerator, JsonReportGenerator, ReportGenerator,
};

pub struct CheckExecutor;

impl CommandExecutor for CheckExecutor {
    type Config = CheckCyclesConfig;

    fn execute(config: Self::Config) -> Result<()> {
        if !config.analysis.quiet {
            eprintln!(
                "{} Checking for import cycles from {}...\n",
                style("🧶").cyan(),
                style(config.analysis.entry.display()).bold()
            );
        }

        let report = run_analysis(&config.analysis)?;

        // Generate report based on format
        let report_result = match config.format {
            OutputFormat::Human => {
                let generator = HumanReportGenerator::new(config.max_cycles, config.show_warnings);
                generator.generate_report(&report)
            }
            OutputFormat::Json => {
                let generator = JsonReportGenerator::new();
                generator.generate_report(&report)
            }
            OutputFormat::GitHub => {
                let generator = GitHubReportGenerator::new();
                generator.generate_report(&report)
            }
        };

        let output = report_result.wrap_err("Failed to generate report")?;
        print!("{output}");

        // Exit with error code if cycles found and requested
        if config.error_on_cycles && report.has_cycles() {
            std::process::exit(1);
        }

        Ok(())
    }
}
