//! # Configuration Module
//!
//! Configuration structures for the ts-tangle commands. Each command has its
//! own config with a builder; the analysis inputs both commands share live in
//! [`AnalysisConfig`], which merges command line flags with the settings
//! file.
//!
//! ## Command Configurations
//!
//! - **CheckCyclesConfig**: Configuration for the `check` command
//! - **GraphOptions**: Configuration for the `graph` command
//!
//! ## Example
//!
//! ```
//! use ts_tangle::cli::{GraphFormat, OutputFormat};
//! use ts_tangle::common::ConfigBuilder;
//! use ts_tangle::config::{AnalysisConfig, CheckCyclesConfig, GraphOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let check = CheckCyclesConfig::builder()
//!     .with_analysis(AnalysisConfig::new("src/index.ts".into()))
//!     .with_format(OutputFormat::Human)
//!     .with_error_on_cycles(true)
//!     .build()?;
//! assert!(check.error_on_cycles);
//!
//! let graph = GraphOptions::builder()
//!     .with_analysis(AnalysisConfig::new("src/index.ts".into()))
//!     .with_format(GraphFormat::Dot)
//!     .with_highlight_cycles(true)
//!     .build()?;
//! assert_eq!(graph.format, GraphFormat::Dot);
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod common;
pub mod graph;

pub use check::CheckCyclesConfig;
pub use common::AnalysisConfig;
pub use graph::GraphOptions;
