use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use path_clean::PathClean;

use super::{ModuleResolver, Resolution, ResolvedModule, SpecifierResolver, split_suffix};
use crate::project::{PathAlias, ProjectConfig};

/// Resolver backed by the `baseUrl` and `paths` of one project config
///
/// Aliases are tried longest literal prefix first, so `@app/core/*` wins
/// over `@app/*` regardless of declaration order. Successful resolutions
/// are cached per specifier.
pub struct PathsResolver {
    config: ProjectConfig,
    aliases: Vec<PathAlias>,
    extensions: Vec<String>,
    default: Arc<dyn ModuleResolver>,
    cache: Mutex<HashMap<String, PathBuf>>,
}

impl PathsResolver {
    pub fn new(
        config: ProjectConfig,
        extensions: Vec<String>,
        default: Arc<dyn ModuleResolver>,
    ) -> Self {
        let mut aliases = config.paths.clone();
        // Stable: equal prefixes keep declaration order
        aliases.sort_by(|a, b| b.prefix_len().cmp(&a.prefix_len()));

        Self {
            config,
            aliases,
            extensions,
            default,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn is_applicable(&self, importer: &Path) -> bool {
        let supported = importer
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext));

        supported && self.config.applies_to(importer)
    }

    fn resolve_cached(&self, specifier: &str) -> Option<PathBuf> {
        if let Ok(cache) = self.cache.lock()
            && let Some(cached) = cache.get(specifier)
        {
            return Some(cached.clone());
        }

        let resolved = self.resolve_uncached(specifier)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(specifier.to_string(), resolved.clone());
        }

        Some(resolved)
    }

    fn resolve_uncached(&self, specifier: &str) -> Option<PathBuf> {
        let base = &self.config.paths_base;

        for alias in &self.aliases {
            let Some(captured) = alias.capture(specifier) else {
                continue;
            };

            for target in &alias.targets {
                let candidate = base.join(target.replace('*', captured)).clean();
                if let Some(found) = self.resolve_candidate(&candidate) {
                    return Some(found);
                }
            }
        }

        let base_url = self.config.base_url.as_ref()?;
        self.resolve_candidate(&base_url.join(specifier).clean())
    }

    fn resolve_candidate(&self, candidate: &Path) -> Option<PathBuf> {
        self.default
            .resolve(&candidate.to_string_lossy(), &self.config.dir)
    }
}

impl SpecifierResolver for PathsResolver {
    fn resolve(&self, specifier: &str, importer: &Path) -> Resolution {
        if !self.is_applicable(importer) {
            return Resolution::NotApplicable;
        }

        let (bare, suffix) = split_suffix(specifier);
        match self.resolve_cached(bare) {
            Some(path) => Resolution::Resolved(ResolvedModule::new(path, suffix)),
            None => Resolution::Unresolved,
        }
    }
}
