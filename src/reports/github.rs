//! GitHub Actions format report generation
//!
//! Every cycle edge becomes an `::error` annotation on the import statement,
//! so cycles show up inline in pull request diffs.

use std::fmt::Write;

use super::ReportGenerator;
use crate::analyzer::AnalysisReport;
use crate::error::TangleError;
use crate::utils::string::{display_path, pluralize};

pub struct GitHubReportGenerator;

impl Default for GitHubReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

/// Escape workflow command data (`%`, CR and LF)
fn escape_data(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape workflow command properties (data escapes plus `:` and `,`)
fn escape_property(text: &str) -> String {
    escape_data(text).replace(':', "%3A").replace(',', "%2C")
}

impl ReportGenerator for GitHubReportGenerator {
    fn generate_report(&self, report: &AnalysisReport) -> Result<String, TangleError> {
        let mut output = String::new();
        let root = &report.root;

        for warning in &report.warnings {
            writeln!(
                output,
                "::warning file={}::{}",
                escape_property(&display_path(warning.path(), root)),
                escape_data(&warning.message())
            )?;
        }

        if !report.has_cycles() {
            writeln!(
                output,
                "::notice title=Import Check::No import cycles detected! ✅"
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "::error title=Import Cycles::Found {} import {}",
            report.cycles.len(),
            pluralize("cycle", report.cycles.len())
        )?;

        for (i, cycle) in report.cycles.iter().enumerate() {
            let chain: Vec<String> = cycle
                .files
                .files()
                .iter()
                .map(|file| display_path(file, root))
                .collect();
            let chain = chain.join(" → ");

            for edge in &cycle.edges {
                writeln!(
                    output,
                    "::error file={},line={},title={}::{}",
                    escape_property(&display_path(&edge.importer, root)),
                    edge.line,
                    escape_property(&format!("Import cycle {}", i + 1)),
                    escape_data(&format!("'{}' closes the cycle {}", edge.specifier, chain))
                )?;
            }

            if cycle.edges.is_empty() {
                writeln!(output, "::error title=Import cycle {}::{}", i + 1, escape_data(&chain))?;
            }
        }

        writeln!(
            output,
            "::notice title=Recommendation::To break these cycles, move the shared code into a \
             module that both sides can import, or turn type-only imports into `import type`."
        )?;

        Ok(output)
    }
}
