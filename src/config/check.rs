//! Check command configuration

use crate::cli::OutputFormat;
use crate::common::missing_field;
use crate::config::AnalysisConfig;
use crate::error::TangleError;

/// Configuration for the check command
///
/// This struct contains all options for detecting and reporting import
/// cycles reachable from one entry file.
#[derive(Debug, Clone)]
pub struct CheckCyclesConfig {
    /// Entry file and analysis inputs
    pub analysis: AnalysisConfig,
    /// Output format for the report
    pub format: OutputFormat,
    /// Whether to exit with error code if cycles are found
    pub error_on_cycles: bool,
    /// Maximum number of cycles to report (None = all)
    pub max_cycles: Option<usize>,
    /// Print warnings collected during the analysis
    pub show_warnings: bool,
}

impl CheckCyclesConfig {
    pub fn builder() -> CheckCyclesConfigBuilder {
        CheckCyclesConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct CheckCyclesConfigBuilder {
    analysis: Option<AnalysisConfig>,
    format: Option<OutputFormat>,
    error_on_cycles: Option<bool>,
    max_cycles: Option<usize>,
    show_warnings: Option<bool>,
}

impl CheckCyclesConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_error_on_cycles(mut self, error_on_cycles: bool) -> Self {
        self.error_on_cycles = Some(error_on_cycles);
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_show_warnings(mut self, show_warnings: bool) -> Self {
        self.show_warnings = Some(show_warnings);
        self
    }
}

impl crate::common::ConfigBuilder for CheckCyclesConfigBuilder {
    type Config = CheckCyclesConfig;

    fn build(self) -> Result<Self::Config, TangleError> {
        Ok(CheckCyclesConfig {
            analysis: self.analysis.ok_or_else(|| missing_field("analysis"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            error_on_cycles: self.error_on_cycles.unwrap_or(false),
            max_cycles: self.max_cycles,
            show_warnings: self.show_warnings.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::common::ConfigBuilder;

    #[test]
    fn test_missing_analysis_is_error() {
        let result = CheckCyclesConfig::builder()
            .with_format(OutputFormat::Json)
            .build();

        assert!(matches!(
            result,
            Err(TangleError::ConfigurationError { message }) if message.contains("analysis")
        ));
    }

    #[test]
    fn test_optional_fields_default() {
        let config = CheckCyclesConfig::builder()
            .with_analysis(AnalysisConfig::new(PathBuf::from("a.ts")))
            .with_format(OutputFormat::Human)
            .build()
            .unwrap();

        assert!(!config.error_on_cycles);
        assert!(!config.show_warnings);
        assert_eq!(config.max_cycles, None);
    }
}
