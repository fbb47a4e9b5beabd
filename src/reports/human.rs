//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::analyzer::AnalysisReport;
use crate::error::TangleError;
use crate::utils::string::{display_path, pluralize};

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
    show_warnings: bool,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>, show_warnings: bool) -> Self {
        Self {
            max_cycles,
            show_warnings,
        }
    }

    fn write_warnings(&self, report: &AnalysisReport, output: &mut String) -> Result<(), TangleError> {
        if report.warnings.is_empty() {
            return Ok(());
        }

        if !self.show_warnings {
            writeln!(
                output,
                "\n{} {} {} hidden. Use --show-warnings to list them.",
                style("ℹ️").blue(),
                report.warnings.len(),
                pluralize("warning", report.warnings.len())
            )?;
            return Ok(());
        }

        writeln!(output, "\n{} Warnings:", style("⚠").yellow())?;
        for warning in &report.warnings {
            writeln!(
                output,
                "  {} {}: {}",
                style("•").dim(),
                style(display_path(warning.path(), &report.root)).bold(),
                warning.message()
            )?;
        }
        Ok(())
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, report: &AnalysisReport) -> Result<String, TangleError> {
        let mut output = String::new();
        let root = &report.root;

        if !report.has_cycles() {
            write!(
                output,
                "\n{} No import cycles detected in {} {} reachable from {}.\n",
                style("✅").green().bold(),
                report.file_count(),
                pluralize("file", report.file_count()),
                style(display_path(&report.entry, root)).bold()
            )?;
            self.write_warnings(report, &mut output)?;
            return Ok(output);
        }

        let total_cycles = report.cycles.len();
        write!(
            output,
            "\n{} Found {} import {}:\n\n",
            style("❌").red().bold(),
            style(total_cycles).red().bold(),
            pluralize("cycle", total_cycles)
        )?;

        let limit = self.max_cycles.unwrap_or(total_cycles);

        for (i, cycle) in report.cycles.iter().take(limit).enumerate() {
            writeln!(
                output,
                "{} Cycle #{} ({} {})",
                style("🔄").yellow(),
                i + 1,
                cycle.members().len(),
                pluralize("file", cycle.members().len())
            )?;

            let chain: Vec<String> = cycle
                .files
                .files()
                .iter()
                .map(|file| display_path(file, root))
                .collect();
            writeln!(output, "  {}", style(chain.join(" → ")).bold())?;

            writeln!(
                output,
                "\n  {} Imports creating this cycle:",
                style("🔗").cyan()
            )?;

            for edge in &cycle.edges {
                writeln!(
                    output,
                    "\n    {} {}:{} → {}",
                    style("📄").blue(),
                    style(display_path(&edge.importer, root)).yellow(),
                    edge.line,
                    style(display_path(&edge.importee, root)).yellow()
                )?;
                if let Some(before) = &edge.before {
                    writeln!(output, "      {:>5} │ {}", edge.line - 1, style(before).dim())?;
                }
                writeln!(output, "      {:>5} │ {}", edge.line, style(&edge.text).red())?;
                if let Some(after) = &edge.after {
                    writeln!(output, "      {:>5} │ {}", edge.line + 1, style(after).dim())?;
                }
            }
            writeln!(output)?;
        }

        if limit < total_cycles {
            writeln!(
                output,
                "\n{} Showing {} of {} cycles. Use --max-cycles to see more.",
                style("ℹ️").blue(),
                style(limit).yellow(),
                style(total_cycles).yellow()
            )?;
        }

        writeln!(
            output,
            "\n{} To break a cycle, remove or invert at least one of its imports.",
            style("💡").yellow()
        )?;
        writeln!(
            output,
            "{} Imports used only for types can become `import type`, which is erased at \
             compile time.",
            style("💡").yellow()
        )?;

        self.write_warnings(report, &mut output)?;
        Ok(output)
    }
}
