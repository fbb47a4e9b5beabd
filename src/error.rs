use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(ts_tangle::settings_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct SettingsParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid project configuration in '{file}'")]
#[diagnostic(
    code(ts_tangle::config_parse_error),
    help("tsconfig files may contain comments and trailing commas, but must otherwise be valid JSON")
)]
pub struct ConfigParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("parse error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: serde_json::Error,
}

impl ConfigParseError {
    /// Build a labelled parse error from the line/column reported by
    /// `serde_json`.
    pub fn new(file: impl Into<String>, content: String, source: serde_json::Error) -> Self {
        let file = file.into();
        let span = offset_of(&content, source.line(), source.column())
            .map(|offset| SourceSpan::new(offset.into(), 1));

        Self {
            source_code: NamedSource::new(file.clone(), content),
            file,
            span,
            source,
        }
    }
}

/// Convert a 1-based line and column into a byte offset within `content`.
fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let mut offset = 0;
    for (index, text) in content.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let column = column.saturating_sub(1).min(text.len().saturating_sub(1));
            return Some(offset + column);
        }
        offset += text.len();
    }

    None
}

#[derive(Error, Debug, Diagnostic)]
pub enum TangleError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(ts_tangle::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Entry file '{path}' does not exist or is not a file")]
    #[diagnostic(
        code(ts_tangle::entry_not_found),
        help("Pass the path of a single source file to start the traversal from")
    )]
    EntryNotFound { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParseError(Box<ConfigParseError>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    SettingsParseError(Box<SettingsParseError>),

    #[error("JSON serialization error")]
    #[diagnostic(
        code(ts_tangle::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(ts_tangle::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(ts_tangle::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(ts_tangle::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(ts_tangle::graph_error),
        help("This may be an internal error with graph processing")
    )]
    GraphError { message: String },
}

impl TangleError {
    /// The error message followed by every underlying cause, on one line
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
