//! # Import Analysis Module
//!
//! Ties the pieces together for one entry file: find the workspace root,
//! discover project configs under it, build the import graph and annotate
//! its cycles.
//!
//! ## Key Components
//!
//! - **ImportAnalyzer**: Analysis session owning the workspace root cache
//!   and one resolver registry per workspace root
//! - **AnalysisOptions**: Config file names, extensions, ignored directories,
//!   exclude globs and dynamic import handling
//! - **AnalysisReport**: Import tree, annotated cycles and warnings
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ts_tangle::analyzer::{AnalysisOptions, ImportAnalyzer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut analyzer = ImportAnalyzer::new(AnalysisOptions::default());
//! let report = analyzer.analyze(Path::new("src/index.ts"), None)?;
//!
//! for cycle in &report.cycles {
//!     println!("{} files in cycle", cycle.members().len());
//! }
//!
//! // Source files changed: start over
//! analyzer.reset();
//! # Ok(())
//! # }
//! ```

mod analyzer_impl;

pub use analyzer_impl::*;
