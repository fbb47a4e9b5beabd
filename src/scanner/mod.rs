//! # Import Scanning Module
//!
//! Extracts the raw module specifiers a source file imports. The graph builder
//! only depends on the [`ImportScanner`] trait, so the module-syntax dialect
//! stays out of the traversal and enhancement logic.
//!
//! Type-only declarations (`import type`, `export type ... from`, and named
//! imports whose every binding is `type`-qualified) never appear in the scan
//! result: they are erased at compile time and cannot create a runtime cycle.
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//!
//! use ts_tangle::core::ImportKind;
//! use ts_tangle::scanner::{ImportScanner, RegexImportScanner};
//!
//! # fn main() -> miette::Result<()> {
//! let source = "import type { Props } from './types';\nimport { render } from './render';\n";
//! let imports = RegexImportScanner::new().scan(Path::new("view.ts"), source)?;
//!
//! assert_eq!(imports.len(), 1);
//! assert_eq!(imports[0].specifier, "./render");
//! assert_eq!(imports[0].kind, ImportKind::Named);
//! assert_eq!(imports[0].line, 2);
//! # Ok(())
//! # }
//! ```

mod mask;
mod patterns;
mod regex_scanner;

use std::path::Path;

pub(crate) use mask::mask_comments;
pub use regex_scanner::RegexImportScanner;
use serde::Serialize;

use crate::core::ImportKind;
use crate::error::TangleError;

/// One import declaration found in a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedImport {
    /// Specifier exactly as written between the quotes
    pub specifier: String,
    pub kind: ImportKind,
    /// Byte offset of the specifier within the source
    pub offset: usize,
    /// 1-based line of the specifier
    pub line: usize,
}

/// Source-scanning capability used by the graph builder and cycle enhancer
pub trait ImportScanner: Send + Sync {
    /// Return the runtime imports of `source`, in source order
    fn scan(&self, path: &Path, source: &str) -> Result<Vec<ScannedImport>, TangleError>;

    /// Whether `line` contains a runtime import or re-export of exactly
    /// `specifier`
    fn line_references(&self, line: &str, specifier: &str) -> bool;
}
