//! Analysis configuration shared by every command

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::analyzer::AnalysisOptions;
use crate::common::CommonArgs;
use crate::settings::Settings;
use crate::workspace_discovery::WorkspaceRootCache;

/// Analysis inputs as given on the command line
///
/// Turned into [`AnalysisOptions`] by [`AnalysisConfig::options`] once the
/// settings file has been merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Entry file the graph is followed from
    pub entry: PathBuf,
    /// Explicit settings file; its absence means the workspace root default
    pub settings: Option<PathBuf>,
    pub skip_dynamic_imports: bool,
    pub exclude: Vec<String>,
    pub config_files: Vec<String>,
    pub ignored_dirs: Vec<String>,
    /// Hide progress output
    pub quiet: bool,
}

impl From<CommonArgs> for AnalysisConfig {
    fn from(args: CommonArgs) -> Self {
        Self {
            entry: args.entry,
            settings: args.settings,
            skip_dynamic_imports: args.skip_dynamic_imports,
            exclude: args.exclude,
            config_files: args.config_files,
            ignored_dirs: args.ignored_dirs,
            quiet: args.quiet,
        }
    }
}

impl AnalysisConfig {
    pub fn new(entry: PathBuf) -> Self {
        Self {
            entry,
            settings: None,
            skip_dynamic_imports: false,
            exclude: Vec::new(),
            config_files: Vec::new(),
            ignored_dirs: Vec::new(),
            quiet: false,
        }
    }

    /// Load the applicable settings file
    ///
    /// An explicit `--settings` file must exist and parse. The implicit
    /// `.ts-tangle.toml` at the workspace root is ignored with a warning
    /// when it is broken.
    pub fn load_settings(&self) -> Result<Option<Settings>> {
        if let Some(path) = &self.settings {
            return Settings::parse_file(path).map(Some);
        }

        let start = self.entry.canonicalize().unwrap_or_else(|_| self.entry.clone());
        let root = WorkspaceRootCache::new().find(&start);

        match Settings::load_for_root(&root) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                eprintln!("{} Ignoring settings file: {:?}", style("⚠").yellow(), e);
                Ok(None)
            }
        }
    }

    /// Effective options: command line over settings file over defaults
    pub fn options(&self) -> Result<AnalysisOptions> {
        let settings = self.load_settings()?;
        Ok(self.merge(settings.unwrap_or_default()))
    }

    fn merge(&self, settings: Settings) -> AnalysisOptions {
        let defaults = AnalysisOptions::default();

        let config_files = if !self.config_files.is_empty() {
            self.config_files.clone()
        } else {
            settings.config_files.unwrap_or(defaults.config_files)
        };

        let mut ignored_dirs = defaults.ignored_dirs;
        for dir in settings.ignored_dirs.into_iter().chain(self.ignored_dirs.iter().cloned()) {
            if !ignored_dirs.contains(&dir) {
                ignored_dirs.push(dir);
            }
        }

        let mut exclude = settings.exclude;
        exclude.extend(self.exclude.iter().cloned());

        AnalysisOptions {
            config_files,
            extensions: settings.extensions.unwrap_or(defaults.extensions),
            ignored_dirs,
            exclude,
            skip_dynamic_imports: self.skip_dynamic_imports
                || settings.skip_dynamic_imports.unwrap_or(defaults.skip_dynamic_imports),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::constants::project::SETTINGS_FILE_NAME;

    #[test]
    fn test_cli_overrides_settings() {
        let mut config = AnalysisConfig::new(PathBuf::from("a.ts"));
        config.config_files = vec!["tsconfig.app.json".to_string()];
        config.exclude = vec!["cli/**".to_string()];
        config.ignored_dirs = vec!["dist".to_string()];

        let settings = Settings {
            config_files: Some(vec!["jsconfig.json".to_string()]),
            extensions: Some(vec!["ts".to_string()]),
            ignored_dirs: vec!["dist".to_string(), "build".to_string()],
            exclude: vec!["settings/**".to_string()],
            skip_dynamic_imports: Some(true),
        };

        let options = config.merge(settings);

        assert_eq!(options.config_files, vec!["tsconfig.app.json"]);
        assert_eq!(options.extensions, vec!["ts"]);
        assert_eq!(options.ignored_dirs, vec!["node_modules", ".git", "dist", "build"]);
        assert_eq!(options.exclude, vec!["settings/**", "cli/**"]);
        assert!(options.skip_dynamic_imports);
    }

    #[test]
    fn test_defaults_without_settings() {
        let config = AnalysisConfig::new(PathBuf::from("a.ts"));

        assert_eq!(config.merge(Settings::default()), AnalysisOptions::default());
    }

    #[test]
    fn test_settings_found_at_workspace_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "workspaces": ["apps/*"] }"#).unwrap();
        fs::write(dir.path().join(SETTINGS_FILE_NAME), "exclude = [\"legacy/**\"]\n").unwrap();
        fs::create_dir_all(dir.path().join("apps/web")).unwrap();
        let entry = dir.path().join("apps/web/main.ts");
        fs::write(&entry, "").unwrap();

        let options = AnalysisConfig::new(entry).options().unwrap();

        assert_eq!(options.exclude, vec!["legacy/**"]);
    }

    #[test]
    fn test_explicit_settings_must_parse() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("custom.toml");
        fs::write(&settings, "exclude = [").unwrap();

        let mut config = AnalysisConfig::new(dir.path().join("a.ts"));
        config.settings = Some(settings);

        assert!(config.options().is_err());

        config.settings = Some(dir.path().join("missing.toml"));
        assert!(config.options().is_err());
    }
}
