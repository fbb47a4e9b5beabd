//! Graph command configuration

use std::path::PathBuf;

use crate::cli::GraphFormat;
use crate::common::missing_field;
use crate::config::AnalysisConfig;
use crate::error::TangleError;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub analysis: AnalysisConfig,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
    pub highlight_cycles: bool,
    pub show_specifiers: bool,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    analysis: Option<AnalysisConfig>,
    format: Option<GraphFormat>,
    output: Option<PathBuf>,
    highlight_cycles: Option<bool>,
    show_specifiers: Option<bool>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_highlight_cycles(mut self, highlight_cycles: bool) -> Self {
        self.highlight_cycles = Some(highlight_cycles);
        self
    }

    pub fn with_show_specifiers(mut self, show_specifiers: bool) -> Self {
        self.show_specifiers = Some(show_specifiers);
        self
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, TangleError> {
        Ok(GraphOptions {
            analysis: self.analysis.ok_or_else(|| missing_field("analysis"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            output: self.output,
            highlight_cycles: self.highlight_cycles.unwrap_or(true),
            show_specifiers: self.show_specifiers.unwrap_or(false),
        })
    }
}
