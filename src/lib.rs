//! # ts-tangle - Detect Import Cycles in TypeScript and JavaScript Monorepos
//!
//! ts-tangle follows the imports of a single entry file through a monorepo and
//! reports every import cycle it runs into. Import specifiers are resolved the
//! way the TypeScript compiler would: relative paths, `compilerOptions.paths`
//! aliases and `baseUrl` lookups from the nearest `tsconfig.json` or
//! `jsconfig.json`, and finally packages from `node_modules`.
//!
//! ## Main Components
//!
//! - **Scanner**: Extracts import statements from source text
//! - **Project**: Discovers and parses project config files
//! - **Resolver**: Maps import specifiers to files on disk
//! - **Graph**: Builds the import graph and finds cycles during traversal
//! - **Detector**: Locates the import statements that close each cycle
//! - **Reports**: Generates human-readable and machine-readable reports
//!
//! ## Usage
//!
//! ### Checking an Entry File
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ts_tangle::analyzer::{AnalysisOptions, ImportAnalyzer};
//! use ts_tangle::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! let mut analyzer = ImportAnalyzer::new(AnalysisOptions::default());
//! let report = analyzer.analyze(Path::new("apps/web/src/main.ts"), None)?;
//!
//! println!("Visited {} files", report.file_count());
//!
//! if report.has_cycles() {
//!     // Human-readable report for console output
//!     let human_report = HumanReportGenerator::new(Some(5), false);
//!     println!("{}", human_report.generate_report(&report)?);
//!
//!     // JSON report for programmatic processing
//!     let json_output = JsonReportGenerator::new().generate_report(&report)?;
//!     std::fs::write("cycles.json", json_output).into_diagnostic()?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Visualizing the Import Graph
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ts_tangle::analyzer::{AnalysisOptions, ImportAnalyzer};
//! use ts_tangle::graph::GraphRenderer;
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! let mut analyzer = ImportAnalyzer::new(AnalysisOptions {
//!     skip_dynamic_imports: true,
//!     ..AnalysisOptions::default()
//! });
//! let report = analyzer.analyze(Path::new("src/index.ts"), None)?;
//!
//! let renderer = GraphRenderer::new(true, false, report.root.clone());
//!
//! let mut mermaid_output = Vec::new();
//! renderer.render_mermaid(&report.tree, &report.raw_cycles(), &mut mermaid_output)?;
//!
//! std::fs::write("imports.mmd", mermaid_output).into_diagnostic()?;
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod dependency_filter;
mod manifest;
mod progress;
mod settings;
mod utils;
mod workspace_discovery;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod project;
pub mod reports;
pub mod resolver;
pub mod scanner;

pub use common::ConfigBuilder;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();

    execute_command(cli.command)
}
