//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//! - github: GitHub Actions workflow commands with file and line annotations

pub mod github;
pub mod human;
pub mod json;

use crate::analyzer::AnalysisReport;
use crate::error::TangleError;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from analysis results
    fn generate_report(&self, report: &AnalysisReport) -> Result<String, TangleError>;
}

// Re-export for convenience
pub use github::GitHubReportGenerator;
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
