//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{AnalysisConfig, GraphOptions};
use crate::error::TangleError;

impl FromCommand for GraphOptions {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        match command {
            Commands::Graph {
                common,
                format,
                output,
                highlight_cycles,
                show_specifiers,
            } => GraphOptions::builder()
                .with_analysis(AnalysisConfig::from(common))
                .with_format(format)
                .with_output(output)
                .with_highlight_cycles(highlight_cycles)
                .with_show_specifiers(show_specifiers)
                .build(),
            _ => Err(TangleError::ConfigurationError {
                message: "Invalid command type for GraphOptions".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GraphOptions);

/// Execute the graph command for rendering the import graph
pub fn execute_graph_command(command: Commands) -> Result<()> {
    let config = GraphOptions::from_command(command)
        .wrap_err("Failed to parse graph command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}
