use std::path::Path;

use miette::{IntoDiagnostic, NamedSource, Result, SourceSpan};
use serde::Deserialize;

use crate::constants::project::SETTINGS_FILE_NAME;
use crate::error::{SettingsParseError, TangleError};

/// Contents of a `.ts-tangle.toml` settings file
///
/// Every key is optional; command line flags take precedence over anything
/// set here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Config file names to discover, in registration priority
    pub config_files: Option<Vec<String>>,
    /// Source extensions that take part in the graph
    pub extensions: Option<Vec<String>>,
    /// Extra directory names skipped during config discovery and traversal
    #[serde(default)]
    pub ignored_dirs: Vec<String>,
    /// Glob patterns of files excluded from the graph
    #[serde(default)]
    pub exclude: Vec<String>,
    pub skip_dynamic_imports: Option<bool>,
}

impl Settings {
    pub fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TangleError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })
            .into_diagnostic()?;

        toml::from_str(&content)
            .map_err(|e| {
                let span = e
                    .span()
                    .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

                TangleError::SettingsParseError(Box::new(SettingsParseError {
                    file: path.display().to_string(),
                    source_code: NamedSource::new(path.display().to_string(), content.clone()),
                    span,
                    source: e,
                }))
            })
            .into_diagnostic()
    }

    /// Load the settings file at the workspace root, if there is one
    pub fn load_for_root(root: &Path) -> Result<Option<Self>> {
        let path = root.join(SETTINGS_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }

        Self::parse_file(&path).map(Some)
    }
}
