//! File and import filtering

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use crate::error::TangleError;
use crate::scanner::ScannedImport;

const EXCLUDE_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Decides which imports and which resolved files take part in the graph
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    skip_dynamic_imports: bool,
    extensions: Vec<String>,
    ignored_dirs: Vec<String>,
    exclude: Vec<Pattern>,
}

impl FileFilter {
    /// Create a new file filter
    ///
    /// `exclude` globs are matched against paths relative to the workspace
    /// root; an invalid glob is a configuration error.
    pub fn new(
        skip_dynamic_imports: bool,
        extensions: Vec<String>,
        ignored_dirs: Vec<String>,
        exclude: &[String],
    ) -> Result<Self, TangleError> {
        let exclude = exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| TangleError::ConfigurationError {
                    message: format!("Invalid exclude pattern '{pattern}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_dynamic_imports,
            extensions,
            ignored_dirs,
            exclude,
        })
    }

    /// Check if a scanned import should be resolved at all
    pub fn include_import(&self, import: &ScannedImport) -> bool {
        !(self.skip_dynamic_imports && import.kind.is_dynamic())
    }

    /// Check if a resolved file becomes a node of the graph
    pub fn include_file(&self, path: &Path, root: &Path) -> bool {
        self.has_source_extension(path) && !self.is_ignored(path) && !self.is_excluded(path, root)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => self
                .ignored_dirs
                .iter()
                .any(|ignored| name == ignored.as_str()),
            _ => false,
        })
    }

    fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let text = relative.to_string_lossy().replace('\\', "/");
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_with(&text, EXCLUDE_MATCH_OPTIONS))
    }
}
