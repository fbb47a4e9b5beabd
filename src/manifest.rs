use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigParseError, TangleError};

/// The parts of a `package.json` that matter for workspace detection and
/// package entry resolution
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    pub workspaces: Option<Workspaces>,
    pub exports: Option<Value>,
    pub module: Option<Value>,
    pub main: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    Patterns(Vec<String>),
    Detailed {
        #[serde(default)]
        packages: Vec<String>,
    },
}

/// Conditions honoured in `exports` maps, in priority order
const EXPORT_CONDITIONS: &[&str] = &["import", "require", "default"];

impl PackageManifest {
    pub fn parse_file(path: &Path) -> Result<Self, TangleError> {
        let content = std::fs::read_to_string(path).map_err(|e| TangleError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| {
            TangleError::ConfigParseError(Box::new(ConfigParseError::new(
                path.display().to_string(),
                content.clone(),
                e,
            )))
        })
    }

    pub fn declares_workspaces(&self) -> bool {
        self.workspaces.is_some()
    }

    /// Entry file for `subpath` (`"."` or `"./feature"`), relative to the
    /// package directory.
    ///
    /// `exports` wins when present; the legacy `module` and `main` fields are
    /// only consulted for the package root.
    pub fn entry_for(&self, subpath: &str) -> Option<String> {
        if let Some(exports) = &self.exports {
            return export_target(exports, subpath);
        }

        if subpath == "." {
            return self
                .module
                .as_ref()
                .and_then(Value::as_str)
                .or_else(|| self.main.as_ref().and_then(Value::as_str))
                .map(str::to_string);
        }

        None
    }
}

fn export_target(exports: &Value, subpath: &str) -> Option<String> {
    match exports {
        Value::Object(map) if map.keys().any(|key| key.starts_with('.')) => {
            if let Some(target) = map.get(subpath) {
                return condition_target(target);
            }

            // "./*": "./src/*.js"
            map.iter().find_map(|(key, target)| {
                let (prefix, suffix) = key.split_once('*')?;
                let captured = subpath.strip_prefix(prefix)?.strip_suffix(suffix)?;
                condition_target(target).map(|target| target.replace('*', captured))
            })
        }
        _ if subpath == "." => condition_target(exports),
        _ => None,
    }
}

fn condition_target(target: &Value) -> Option<String> {
    match target {
        Value::String(path) => Some(path.clone()),
        Value::Object(conditions) => EXPORT_CONDITIONS
            .iter()
            .find_map(|condition| conditions.get(*condition).and_then(condition_target)),
        Value::Array(alternatives) => alternatives.iter().find_map(condition_target),
        _ => None,
    }
}
