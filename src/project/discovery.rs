use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use walkdir::WalkDir;

use super::ProjectConfig;
use crate::core::Warning;
use crate::error::TangleError;
use crate::progress::ProgressReporter;
use crate::resolver::{ModuleResolver, PathsResolver, ResolverRegistry};

/// Result of scanning a workspace for project configs
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    pub registry: ResolverRegistry,
    /// Every config file found, including non-resolving ones
    pub configs: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
}

/// Finds project config files under a workspace root and turns each
/// resolving one into a [`PathsResolver`]
pub struct ProjectDiscovery {
    config_file_names: Vec<String>,
    ignored_dirs: Vec<String>,
    extensions: Vec<String>,
    default: Arc<dyn ModuleResolver>,
}

impl ProjectDiscovery {
    pub fn new(
        config_file_names: Vec<String>,
        ignored_dirs: Vec<String>,
        extensions: Vec<String>,
        default: Arc<dyn ModuleResolver>,
    ) -> Self {
        Self {
            config_file_names,
            ignored_dirs,
            extensions,
            default,
        }
    }

    pub fn discover(&self, root: &Path, progress: Option<&ProgressReporter>) -> DiscoveryOutcome {
        let mut config_paths: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir()
                    && e.depth() > 0
                    && self
                        .ignored_dirs
                        .iter()
                        .any(|ignored| e.file_name() == ignored.as_str()))
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.priority(e.path()).is_some())
            .map(|e| e.into_path())
            .collect();

        // Registration order within a directory follows config name priority
        config_paths.sort_by_key(|path| (path.parent().map(Path::to_path_buf), self.priority(path)));

        let loaded: Vec<(PathBuf, Result<(ProjectConfig, Vec<Warning>), TangleError>)> =
            config_paths
                .into_par_iter()
                .map(|path| {
                    if let Some(p) = progress {
                        p.checking_config(&path);
                    }
                    let result = ProjectConfig::load(&path);
                    (path, result)
                })
                .collect();

        let mut outcome = DiscoveryOutcome::default();

        for (path, result) in loaded {
            match result {
                Ok((config, warnings)) => {
                    outcome.warnings.extend(warnings);
                    outcome.configs.push(config.path.clone());

                    if config.is_resolving {
                        let dir = config.dir.clone();
                        let resolver = PathsResolver::new(
                            config,
                            self.extensions.clone(),
                            Arc::clone(&self.default),
                        );
                        outcome.registry.register(dir, Arc::new(resolver));
                    }
                }
                Err(e) => outcome.warnings.push(Warning::ConfigSkipped {
                    path,
                    reason: e.describe(),
                }),
            }
        }

        outcome
    }

    fn priority(&self, path: &Path) -> Option<usize> {
        let name = path.file_name()?.to_str()?;
        self.config_file_names
            .iter()
            .position(|candidate| candidate == name)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::constants::project::{CONFIG_FILE_NAMES, IGNORED_DIRS, SOURCE_EXTENSIONS};
    use crate::resolver::{NodeModuleResolver, Resolution, ResolvedModule};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn discovery() -> ProjectDiscovery {
        ProjectDiscovery::new(
            strings(CONFIG_FILE_NAMES),
            strings(IGNORED_DIRS),
            strings(SOURCE_EXTENSIONS),
            Arc::new(NodeModuleResolver::new(strings(SOURCE_EXTENSIONS))),
        )
    }

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_discovers_nested_configs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        write(&root, "tsconfig.json", r#"{ "compilerOptions": { "baseUrl": "." } }"#);
        write(&root, "packages/a/tsconfig.json", "{}");
        write(&root, "packages/b/jsconfig.json", "{}");
        write(&root, "node_modules/dep/tsconfig.json", "{}");
        write(&root, ".git/tsconfig.json", "{}");

        let outcome = discovery().discover(&root, None);

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.configs.len(), 3);
        assert_eq!(
            outcome.registry.directories().collect::<Vec<_>>(),
            vec![
                root.as_path(),
                root.join("packages/a").as_path(),
                root.join("packages/b").as_path()
            ]
        );
    }

    #[test]
    fn test_pass_through_config_gets_no_resolver() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        write(&root, "tsconfig.json", r#"{ "files": [], "include": [] }"#);
        write(&root, "app/tsconfig.json", r#"{ "extends": "../tsconfig.json", "include": ["src"] }"#);

        let outcome = discovery().discover(&root, None);

        assert_eq!(outcome.configs.len(), 2);
        assert_eq!(outcome.registry.len(), 1);
        assert!(outcome.registry.resolvers_at(&root).is_empty());
    }

    #[test]
    fn test_invalid_config_is_skipped_with_warning() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let broken = write(&root, "broken/tsconfig.json", "{ not json at all");
        write(&root, "ok/tsconfig.json", "{}");

        let outcome = discovery().discover(&root, None);

        assert_eq!(outcome.registry.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].path(), broken.as_path());
    }

    #[test]
    fn test_tsconfig_registered_before_jsconfig() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        write(
            &root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "lib": ["ts-lib.ts"] } } }"#,
        );
        write(
            &root,
            "jsconfig.json",
            r#"{ "compilerOptions": { "paths": { "lib": ["js-lib.js"] } } }"#,
        );
        let ts_lib = write(&root, "ts-lib.ts", "");
        write(&root, "js-lib.js", "");
        let importer = write(&root, "main.ts", "");

        let outcome = discovery().discover(&root, None);
        let resolvers = outcome.registry.resolvers_at(&root);

        assert_eq!(resolvers.len(), 2);
        assert_eq!(
            resolvers[0].resolve("lib", &importer),
            Resolution::Resolved(ResolvedModule::new(ts_lib, None))
        );
    }
}
