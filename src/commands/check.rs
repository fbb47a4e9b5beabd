//! Check command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{AnalysisConfig, CheckCyclesConfig};
use crate::error::TangleError;

impl FromCommand for CheckCyclesConfig {
    fn from_command(command: Commands) -> Result<Self, TangleError> {
        match command {
            Commands::Check {
                common,
                format,
                cycle_display,
                error_on_cycles,
            } => CheckCyclesConfig::builder()
                .with_analysis(AnalysisConfig::from(common))
                .with_format(format.format)
                .with_error_on_cycles(error_on_cycles)
                .with_max_cycles(cycle_display.max_cycles)
                .with_show_warnings(cycle_display.show_warnings)
                .build(),
            _ => Err(TangleError::ConfigurationError {
                message: "Invalid command type for CheckCyclesConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(CheckCyclesConfig);

/// Execute the check command for detecting import cycles
pub fn execute_check_command(command: Commands) -> Result<()> {
    let config = CheckCyclesConfig::from_command(command)
        .wrap_err("Failed to parse check command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::check::CheckExecutor;
    CheckExecutor::execute(config)
}
