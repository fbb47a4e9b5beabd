//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::error::TangleError;

/// Analysis arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Entry file the import graph is followed from
    #[arg(value_name = "ENTRY", env = "TS_TANGLE_ENTRY")]
    pub entry: PathBuf,

    /// Ignore `import()` expressions
    #[arg(long, env = "TS_TANGLE_SKIP_DYNAMIC_IMPORTS")]
    pub skip_dynamic_imports: bool,

    /// Leave files matching this glob (relative to the workspace root) out
    /// of the graph
    #[arg(long, value_name = "GLOB", env = "TS_TANGLE_EXCLUDE", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Project config file names to discover, in priority order
    #[arg(
        long = "config-file",
        value_name = "NAME",
        env = "TS_TANGLE_CONFIG_FILES",
        value_delimiter = ','
    )]
    pub config_files: Vec<String>,

    /// Additional directory names to skip
    #[arg(
        long = "ignore-dir",
        value_name = "NAME",
        env = "TS_TANGLE_IGNORED_DIRS",
        value_delimiter = ','
    )]
    pub ignored_dirs: Vec<String>,

    /// Settings file to use instead of `.ts-tangle.toml` at the workspace root
    #[arg(long, value_name = "PATH", env = "TS_TANGLE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Hide progress output
    #[arg(short, long, env = "TS_TANGLE_QUIET")]
    pub quiet: bool,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "TS_TANGLE_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Common cycle display arguments
#[derive(Args, Debug, Clone)]
pub struct CycleDisplayArgs {
    /// Maximum number of cycles to display (shows all by default)
    #[arg(long, env = "TS_TANGLE_MAX_CYCLES")]
    pub max_cycles: Option<usize>,

    /// Print resolution and scan warnings
    #[arg(long, env = "TS_TANGLE_SHOW_WARNINGS")]
    pub show_warnings: bool,
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, TangleError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, TangleError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::TangleError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}

/// Error for a builder field that was never set
pub(crate) fn missing_field(field: &str) -> TangleError {
    TangleError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}
