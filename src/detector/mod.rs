//! # Cycle Enhancement Module
//!
//! Cycles are found during graph traversal; this module turns each one into
//! something a developer can act on by locating the import statement behind
//! every edge.
//!
//! ## Key Components
//!
//! - **CycleEnhancer**: Re-reads the importing files and picks, for each
//!   edge, the first line that imports the recorded specifier at runtime
//! - **EnhancedCycle**: The closed file sequence plus its annotated edges
//! - **CycleEdge**: Importer, importee, specifier, line number, statement
//!   text and the surrounding lines
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ts_tangle::detector::CycleEnhancer;
//! use ts_tangle::graph::DependencyTree;
//! use ts_tangle::scanner::RegexImportScanner;
//!
//! let enhancer = CycleEnhancer::new(Arc::new(RegexImportScanner::new()));
//! let outcome = enhancer.enhance(&[], &DependencyTree::new());
//!
//! assert!(outcome.cycles.is_empty());
//! assert!(outcome.warnings.is_empty());
//! ```

mod enhancer;

pub use enhancer::*;
