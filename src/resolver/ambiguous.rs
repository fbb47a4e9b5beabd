use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Resolution, SpecifierResolver, is_ambiguous};

/// Config resolvers keyed by the directory of their config file
///
/// Within one directory, resolvers keep their registration order (config file
/// name priority). The registry is immutable once discovery has finished.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: BTreeMap<PathBuf, Vec<Arc<dyn SpecifierResolver>>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, dir: PathBuf, resolver: Arc<dyn SpecifierResolver>) {
        self.resolvers.entry(dir).or_default().push(resolver);
    }

    pub fn resolvers_at(&self, dir: &Path) -> &[Arc<dyn SpecifierResolver>] {
        self.resolvers.get(dir).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.resolvers.keys().map(PathBuf::as_path)
    }

    /// Number of registered resolvers
    pub fn len(&self) -> usize {
        self.resolvers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.resolvers
                    .iter()
                    .map(|(dir, resolvers)| (dir, resolvers.len())),
            )
            .finish()
    }
}

/// Resolves ambiguous specifiers through the nearest governing config
///
/// The lookup starts in the importer's directory and walks upward, at most to
/// the workspace root. The first directory with an applicable resolver
/// decides the outcome, even when that outcome is
/// [`Resolution::Unresolved`]: a config never hands a specifier it governs
/// over to an ancestor config.
#[derive(Debug, Clone)]
pub struct AmbiguousResolver {
    registry: Arc<ResolverRegistry>,
    root: PathBuf,
}

impl AmbiguousResolver {
    pub fn new(registry: Arc<ResolverRegistry>, root: PathBuf) -> Self {
        Self { registry, root }
    }

    pub fn resolve(&self, specifier: &str, importer: &Path) -> Resolution {
        if !is_ambiguous(specifier) {
            return Resolution::NotApplicable;
        }
        let Some(start) = importer.parent() else {
            return Resolution::NotApplicable;
        };

        for dir in start.ancestors() {
            let mut matched = false;

            for resolver in self.registry.resolvers_at(dir) {
                match resolver.resolve(specifier, importer) {
                    Resolution::NotApplicable => {}
                    Resolution::Unresolved => matched = true,
                    resolved @ Resolution::Resolved(_) => return resolved,
                }
            }

            if matched {
                return Resolution::Unresolved;
            }
            if dir == self.root {
                break;
            }
        }

        Resolution::NotApplicable
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::resolver::ResolvedModule;

    /// Scripted resolver that records every call
    struct Scripted {
        outcome: Resolution,
        calls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(outcome: Resolution) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl SpecifierResolver for Scripted {
        fn resolve(&self, specifier: &str, _importer: &Path) -> Resolution {
            self.calls.lock().unwrap().push(specifier.to_string());
            self.outcome.clone()
        }
    }

    fn resolved(path: &str) -> Resolution {
        Resolution::Resolved(ResolvedModule::new(PathBuf::from(path), None))
    }

    #[test]
    fn test_nearest_config_wins() {
        let root_resolver = Scripted::new(resolved("/repo/root-hit.ts"));
        let package_resolver = Scripted::new(resolved("/repo/packages/a/hit.ts"));

        let mut registry = ResolverRegistry::new();
        registry.register(PathBuf::from("/repo"), root_resolver.clone());
        registry.register(PathBuf::from("/repo/packages/a"), package_resolver.clone());

        let resolver = AmbiguousResolver::new(Arc::new(registry), PathBuf::from("/repo"));
        let outcome = resolver.resolve("@lib/x", Path::new("/repo/packages/a/src/deep/file.ts"));

        assert_eq!(outcome, resolved("/repo/packages/a/hit.ts"));
        assert_eq!(root_resolver.call_count(), 0);
    }

    #[test]
    fn test_matched_but_unresolved_stops_the_walk() {
        let root_resolver = Scripted::new(resolved("/repo/root-hit.ts"));
        let package_resolver = Scripted::new(Resolution::Unresolved);

        let mut registry = ResolverRegistry::new();
        registry.register(PathBuf::from("/repo"), root_resolver.clone());
        registry.register(PathBuf::from("/repo/packages/a"), package_resolver.clone());

        let resolver = AmbiguousResolver::new(Arc::new(registry), PathBuf::from("/repo"));
        let outcome = resolver.resolve("@lib/x", Path::new("/repo/packages/a/file.ts"));

        assert_eq!(outcome, Resolution::Unresolved);
        assert_eq!(package_resolver.call_count(), 1);
        assert_eq!(root_resolver.call_count(), 0);
    }

    #[test]
    fn test_not_applicable_falls_through_to_ancestor() {
        let root_resolver = Scripted::new(resolved("/repo/root-hit.ts"));
        let package_resolver = Scripted::new(Resolution::NotApplicable);

        let mut registry = ResolverRegistry::new();
        registry.register(PathBuf::from("/repo"), root_resolver.clone());
        registry.register(PathBuf::from("/repo/packages/a"), package_resolver);

        let resolver = AmbiguousResolver::new(Arc::new(registry), PathBuf::from("/repo"));

        assert_eq!(
            resolver.resolve("@lib/x", Path::new("/repo/packages/a/file.ts")),
            resolved("/repo/root-hit.ts")
        );
    }

    #[test]
    fn test_second_resolver_in_same_directory_is_tried() {
        let first = Scripted::new(Resolution::Unresolved);
        let second = Scripted::new(resolved("/repo/js-hit.js"));

        let mut registry = ResolverRegistry::new();
        registry.register(PathBuf::from("/repo"), first);
        registry.register(PathBuf::from("/repo"), second);

        let resolver = AmbiguousResolver::new(Arc::new(registry), PathBuf::from("/repo"));

        assert_eq!(
            resolver.resolve("lib", Path::new("/repo/a.js")),
            resolved("/repo/js-hit.js")
        );
    }

    #[test]
    fn test_walk_stops_at_workspace_root() {
        let outside = Scripted::new(resolved("/outside.ts"));

        let mut registry = ResolverRegistry::new();
        registry.register(PathBuf::from("/"), outside.clone());

        let resolver = AmbiguousResolver::new(Arc::new(registry), PathBuf::from("/repo"));

        assert_eq!(
            resolver.resolve("@lib/x", Path::new("/repo/src/a.ts")),
            Resolution::NotApplicable
        );
        assert_eq!(outside.call_count(), 0);
    }

    #[test]
    fn test_relative_specifiers_are_not_ambiguous() {
        let hit = Scripted::new(resolved("/repo/x.ts"));
        let mut registry = ResolverRegistry::new();
        registry.register(PathBuf::from("/repo"), hit.clone());

        let resolver = AmbiguousResolver::new(Arc::new(registry), PathBuf::from("/repo"));

        assert_eq!(
            resolver.resolve("./x", Path::new("/repo/a.ts")),
            Resolution::NotApplicable
        );
        assert_eq!(hit.call_count(), 0);
    }

    #[test]
    fn test_registry_counts() {
        let mut registry = ResolverRegistry::new();
        assert!(registry.is_empty());

        registry.register(PathBuf::from("/a"), Scripted::new(Resolution::NotApplicable));
        registry.register(PathBuf::from("/a"), Scripted::new(Resolution::NotApplicable));
        registry.register(PathBuf::from("/b"), Scripted::new(Resolution::NotApplicable));

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.directories().collect::<Vec<_>>(),
            vec![Path::new("/a"), Path::new("/b")]
        );
    }
}
