//! JSON format report generation

use serde_json::json;

use super::ReportGenerator;
use crate::analyzer::AnalysisReport;
use crate::error::TangleError;
use crate::utils::string::display_path;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, report: &AnalysisReport) -> Result<String, TangleError> {
        let root = &report.root;

        let cycles: Vec<_> = report
            .cycles
            .iter()
            .map(|cycle| {
                let files: Vec<_> = cycle
                    .files
                    .files()
                    .iter()
                    .map(|file| display_path(file, root))
                    .collect();
                let edges: Vec<_> = cycle
                    .edges
                    .iter()
                    .map(|edge| {
                        json!({
                            "importer": display_path(&edge.importer, root),
                            "importee": display_path(&edge.importee, root),
                            "specifier": edge.specifier,
                            "line": edge.line,
                            "text": edge.text,
                        })
                    })
                    .collect();

                json!({
                    "files": files,
                    "edges": edges,
                })
            })
            .collect();

        let warnings: Vec<_> = report
            .warnings
            .iter()
            .map(|warning| {
                json!({
                    "path": display_path(warning.path(), root),
                    "message": warning.message(),
                    "detail": warning,
                })
            })
            .collect();

        let configs: Vec<_> = report
            .configs
            .iter()
            .map(|config| display_path(config, root))
            .collect();

        let output = json!({
            "entry": display_path(&report.entry, root),
            "root": root,
            "file_count": report.file_count(),
            "configs": configs,
            "has_cycles": report.has_cycles(),
            "cycle_count": report.cycles.len(),
            "cycles": cycles,
            "warnings": warnings,
        });

        serde_json::to_string_pretty(&output).map_err(TangleError::Json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::reports::fixtures::{empty_report, report_with_cycles};

    #[test]
    fn test_json_report_no_cycles() {
        let report = JsonReportGenerator::new()
            .generate_report(&empty_report())
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_cycles"], false);
        assert_eq!(json["cycle_count"], 0);
        assert_eq!(json["entry"], "a.ts");
        assert_eq!(json["configs"], json!(["tsconfig.json"]));
        assert_eq!(json["cycles"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_json_report_with_cycles() {
        let report = JsonReportGenerator::new()
            .generate_report(&report_with_cycles())
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_cycles"], true);
        assert_eq!(json["cycle_count"], 2);
        assert_eq!(json["cycles"][0]["files"], json!(["a.ts", "b.ts", "a.ts"]));

        let edge = &json["cycles"][0]["edges"][0];
        assert_eq!(edge["importer"], "a.ts");
        assert_eq!(edge["importee"], "b.ts");
        assert_eq!(edge["specifier"], "./b");
        assert_eq!(edge["line"], 2);

        let warning = &json["warnings"][0];
        assert_eq!(warning["path"], "c.ts");
        assert_eq!(warning["detail"]["kind"], "unresolved");
        assert_eq!(warning["detail"]["specifier"], "@missing/pkg");
    }

    #[test]
    fn test_json_report_pretty_formatting() {
        let report = JsonReportGenerator::default()
            .generate_report(&empty_report())
            .unwrap();

        assert!(report.contains('\n'));
        assert!(report.contains("  "));
    }
}
