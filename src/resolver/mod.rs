//! # Specifier Resolution
//!
//! Turns the specifier of an import into the absolute path of the file it
//! refers to.
//!
//! - Relative (`./x`, `../x`) and absolute specifiers go straight to the
//!   [`ModuleResolver`].
//! - Every other specifier is *ambiguous*: it may be a path alias, a
//!   `baseUrl`-relative module or a package. It is first offered to the
//!   [`AmbiguousResolver`], which consults the nearest project config, and
//!   only then looked up as a package.
//!
//! Resolvers for individual configs implement [`SpecifierResolver`] and
//! report a three-way [`Resolution`], so "this config does not govern the
//! importer" can be told apart from "this config governs the importer but
//! the specifier does not exist".

pub mod ambiguous;
pub mod node;
pub mod paths;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use ambiguous::{AmbiguousResolver, ResolverRegistry};
pub use node::NodeModuleResolver;
pub use paths::PathsResolver;
use serde::Serialize;

use crate::constants::project::NODE_BUILTINS;

/// A resolved import target
///
/// `suffix` is a query or fragment (`?raw`, `#section`) that was split off
/// the specifier before resolution and is carried along unchanged. Graph
/// identity only uses `path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedModule {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl ResolvedModule {
    pub fn new(path: PathBuf, suffix: Option<&str>) -> Self {
        Self {
            path,
            suffix: suffix.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The resolver does not govern this importer or specifier
    NotApplicable,
    /// The resolver governs the importer but found no target
    Unresolved,
    Resolved(ResolvedModule),
}

/// Default file-system resolution of a specifier
pub trait ModuleResolver: Send + Sync {
    /// Resolve `specifier` relative to `base_dir` to a canonical file path
    ///
    /// Path-like specifiers (relative or absolute) are probed as files and
    /// directories; anything else is looked up as an installed package.
    fn resolve(&self, specifier: &str, base_dir: &Path) -> Option<PathBuf>;
}

/// One link of the directory-scoped resolver chain
pub trait SpecifierResolver: Send + Sync {
    fn resolve(&self, specifier: &str, importer: &Path) -> Resolution;
}

pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Neither relative nor absolute
pub fn is_ambiguous(specifier: &str) -> bool {
    !is_relative(specifier) && !Path::new(specifier).is_absolute()
}

pub fn is_builtin(specifier: &str) -> bool {
    if specifier.starts_with("node:") {
        return true;
    }

    let module = specifier.split('/').next().unwrap_or(specifier);
    NODE_BUILTINS.contains(&module)
}

/// Split a trailing `?query` or `#fragment` off a specifier
///
/// A leading `#` marks a package subpath import and is kept.
pub fn split_suffix(specifier: &str) -> (&str, Option<&str>) {
    match specifier
        .char_indices()
        .skip(1)
        .find(|(_, c)| matches!(c, '?' | '#'))
    {
        Some((index, _)) => (&specifier[..index], Some(&specifier[index..])),
        None => (specifier, None),
    }
}

/// Full resolution pipeline used by the graph builder
pub struct ImportResolver {
    ambiguous: AmbiguousResolver,
    default: Arc<dyn ModuleResolver>,
}

impl ImportResolver {
    pub fn new(ambiguous: AmbiguousResolver, default: Arc<dyn ModuleResolver>) -> Self {
        Self { ambiguous, default }
    }

    /// Resolve one specifier written in `importer`
    ///
    /// Built-in modules yield [`Resolution::NotApplicable`]: they are not
    /// files and are dropped without a warning.
    pub fn resolve(&self, specifier: &str, importer: &Path) -> Resolution {
        if specifier.starts_with("node:") {
            return Resolution::NotApplicable;
        }

        let base_dir = importer.parent().unwrap_or(importer);

        if !is_ambiguous(specifier) {
            let (bare, suffix) = split_suffix(specifier);
            return self.resolve_default(bare, suffix, base_dir);
        }

        match self.ambiguous.resolve(specifier, importer) {
            Resolution::Resolved(module) => Resolution::Resolved(module),
            _ if is_builtin(specifier) => Resolution::NotApplicable,
            // Workspace packages linked into node_modules still resolve when
            // no config maps them. Only the package lookup of the default
            // resolver runs here; an ancestor config is never consulted after
            // a nearer one matched.
            _ => {
                let (bare, suffix) = split_suffix(specifier);
                self.resolve_default(bare, suffix, base_dir)
            }
        }
    }

    fn resolve_default(&self, specifier: &str, suffix: Option<&str>, base_dir: &Path) -> Resolution {
        match self.default.resolve(specifier, base_dir) {
            Some(path) => Resolution::Resolved(ResolvedModule::new(path, suffix)),
            None => Resolution::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::constants::project::SOURCE_EXTENSIONS;

    fn extensions() -> Vec<String> {
        SOURCE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
    }

    #[test]
    fn test_specifier_classification() {
        assert!(is_relative("./a"));
        assert!(is_relative("../a"));
        assert!(is_relative("."));
        assert!(!is_relative(".hidden"));
        assert!(is_ambiguous("@app/utils"));
        assert!(is_ambiguous("lodash"));
        assert!(!is_ambiguous("/abs/path"));
        assert!(!is_ambiguous("./rel"));
    }

    #[test]
    fn test_builtins() {
        assert!(is_builtin("node:fs"));
        assert!(is_builtin("fs"));
        assert!(is_builtin("fs/promises"));
        assert!(!is_builtin("fsx"));
        assert!(!is_builtin("@app/fs"));
    }

    #[test]
    fn test_split_suffix() {
        assert_eq!(split_suffix("./style.css?inline"), ("./style.css", Some("?inline")));
        assert_eq!(split_suffix("@app/doc#intro"), ("@app/doc", Some("#intro")));
        assert_eq!(split_suffix("#internal/x"), ("#internal/x", None));
        assert_eq!(split_suffix("lodash"), ("lodash", None));
    }

    #[test]
    fn test_relative_resolution_keeps_suffix() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("a.ts"), "").unwrap();
        fs::write(root.join("b.ts"), "").unwrap();

        let default: Arc<dyn ModuleResolver> = Arc::new(NodeModuleResolver::new(extensions()));
        let resolver = ImportResolver::new(
            AmbiguousResolver::new(Arc::new(ResolverRegistry::new()), root.clone()),
            default,
        );

        assert_eq!(
            resolver.resolve("./b?worker", &root.join("a.ts")),
            Resolution::Resolved(ResolvedModule::new(root.join("b.ts"), Some("?worker")))
        );
        assert_eq!(
            resolver.resolve("./missing", &root.join("a.ts")),
            Resolution::Unresolved
        );
        assert_eq!(
            resolver.resolve("node:path", &root.join("a.ts")),
            Resolution::NotApplicable
        );
        assert_eq!(
            resolver.resolve("path", &root.join("a.ts")),
            Resolution::NotApplicable
        );
    }

    #[test]
    fn test_unmapped_package_falls_back_to_node_modules() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("node_modules/@acme/ui/src")).unwrap();
        fs::write(
            root.join("node_modules/@acme/ui/package.json"),
            r#"{ "main": "src/index.ts" }"#,
        )
        .unwrap();
        fs::write(root.join("node_modules/@acme/ui/src/index.ts"), "").unwrap();
        fs::write(root.join("app.ts"), "").unwrap();

        let resolver = ImportResolver::new(
            AmbiguousResolver::new(Arc::new(ResolverRegistry::new()), root.clone()),
            Arc::new(NodeModuleResolver::new(extensions())),
        );

        assert_eq!(
            resolver.resolve("@acme/ui", &root.join("app.ts")),
            Resolution::Resolved(ResolvedModule::new(
                root.join("node_modules/@acme/ui/src/index.ts"),
                None
            ))
        );
        assert_eq!(
            resolver.resolve("@acme/missing", &root.join("app.ts")),
            Resolution::Unresolved
        );
    }
}
