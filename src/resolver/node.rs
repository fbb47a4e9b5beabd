use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::{ModuleResolver, is_relative};
use crate::constants::project::{NODE_MODULES, PACKAGE_MANIFEST};
use crate::manifest::PackageManifest;

/// TypeScript sources that may stand behind an ESM-style import of the
/// compiled file
const SOURCE_SUBSTITUTES: &[(&str, &[&str])] = &[
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

/// Node-style resolution of files, directories and installed packages
#[derive(Debug, Clone)]
pub struct NodeModuleResolver {
    extensions: Vec<String>,
}

impl NodeModuleResolver {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    fn resolve_path(&self, candidate: &Path) -> Option<PathBuf> {
        self.resolve_file(candidate)
            .or_else(|| self.resolve_directory(candidate))
    }

    fn resolve_file(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }

        // Appended rather than replaced: `user.service` + `.ts`
        for ext in &self.extensions {
            let mut with_ext = candidate.as_os_str().to_os_string();
            with_ext.push(".");
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }

        let ext = candidate.extension().and_then(|ext| ext.to_str())?;
        SOURCE_SUBSTITUTES
            .iter()
            .filter(|(compiled, _)| *compiled == ext)
            .flat_map(|(_, sources)| sources.iter())
            .map(|source| candidate.with_extension(source))
            .find(|substitute| substitute.is_file())
    }

    fn resolve_directory(&self, dir: &Path) -> Option<PathBuf> {
        if !dir.is_dir() {
            return None;
        }

        let manifest_path = dir.join(PACKAGE_MANIFEST);
        if manifest_path.is_file()
            && let Ok(manifest) = PackageManifest::parse_file(&manifest_path)
            && let Some(found) = self.resolve_entry(dir, &manifest, ".")
        {
            return Some(found);
        }

        self.resolve_index(dir)
    }

    fn resolve_index(&self, dir: &Path) -> Option<PathBuf> {
        self.extensions
            .iter()
            .map(|ext| dir.join(format!("index.{ext}")))
            .find(|index| index.is_file())
    }

    fn resolve_entry(
        &self,
        package_dir: &Path,
        manifest: &PackageManifest,
        subpath: &str,
    ) -> Option<PathBuf> {
        let entry = manifest.entry_for(subpath)?;
        let target = package_dir.join(entry).clean();
        self.resolve_file(&target)
            .or_else(|| self.resolve_index(&target))
    }

    /// Walk up `node_modules` directories looking for the package
    ///
    /// The first directory that contains the package decides; Node never
    /// continues to an outer `node_modules` once the package is found.
    fn resolve_package(&self, specifier: &str, base_dir: &Path) -> Option<PathBuf> {
        let (name, subpath) = split_package(specifier)?;

        let package_dir = base_dir
            .ancestors()
            .map(|dir| dir.join(NODE_MODULES).join(name))
            .find(|candidate| candidate.is_dir())?;

        let manifest_path = package_dir.join(PACKAGE_MANIFEST);
        if manifest_path.is_file()
            && let Ok(manifest) = PackageManifest::parse_file(&manifest_path)
            && let Some(found) = self.resolve_entry(&package_dir, &manifest, &subpath)
        {
            return Some(found);
        }

        if subpath == "." {
            self.resolve_index(&package_dir)
        } else {
            self.resolve_path(&package_dir.join(&subpath[2..]))
        }
    }
}

impl ModuleResolver for NodeModuleResolver {
    fn resolve(&self, specifier: &str, base_dir: &Path) -> Option<PathBuf> {
        let found = if is_relative(specifier) || Path::new(specifier).is_absolute() {
            self.resolve_path(&base_dir.join(specifier).clean())
        } else {
            self.resolve_package(specifier, base_dir)
        }?;

        found.canonicalize().ok()
    }
}

/// `@scope/pkg/sub/path` → (`@scope/pkg`, `./sub/path`); the subpath is `.`
/// for the package root
fn split_package(specifier: &str) -> Option<(&str, String)> {
    let segments = if specifier.starts_with('@') { 2 } else { 1 };
    let mut split_at = None;
    let mut seen = 0;
    for (index, c) in specifier.char_indices() {
        if c == '/' {
            seen += 1;
            if seen == segments {
                split_at = Some(index);
                break;
            }
        }
    }

    match split_at {
        Some(index) => {
            let rest = &specifier[index + 1..];
            let subpath = if rest.is_empty() {
                ".".to_string()
            } else {
                format!("./{rest}")
            };
            Some((&specifier[..index], subpath))
        }
        None if segments == 2 && seen == 0 => None,
        None => Some((specifier, ".".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::constants::project::SOURCE_EXTENSIONS;

    fn resolver() -> NodeModuleResolver {
        NodeModuleResolver::new(SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn project() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    #[test]
    fn test_split_package() {
        assert_eq!(split_package("lodash"), Some(("lodash", ".".to_string())));
        assert_eq!(
            split_package("lodash/fp/map"),
            Some(("lodash", "./fp/map".to_string()))
        );
        assert_eq!(split_package("@acme/ui"), Some(("@acme/ui", ".".to_string())));
        assert_eq!(
            split_package("@acme/ui/button"),
            Some(("@acme/ui", "./button".to_string()))
        );
        assert_eq!(split_package("@acme"), None);
    }

    #[test]
    fn test_relative_file_probing() {
        let (_dir, root) = project();
        let exact = write(&root, "exact.ts", "");
        let appended = write(&root, "user.service.ts", "");
        let substituted = write(&root, "esm.ts", "");
        let module_ts = write(&root, "worker.mts", "");

        let resolver = resolver();

        assert_eq!(resolver.resolve("./exact.ts", &root), Some(exact));
        assert_eq!(resolver.resolve("./user.service", &root), Some(appended));
        assert_eq!(resolver.resolve("./esm.js", &root), Some(substituted));
        assert_eq!(resolver.resolve("./worker.mjs", &root), Some(module_ts));
        assert_eq!(resolver.resolve("./missing", &root), None);
    }

    #[test]
    fn test_extension_priority() {
        let (_dir, root) = project();
        let ts = write(&root, "both.ts", "");
        write(&root, "both.js", "");

        assert_eq!(resolver().resolve("./both", &root), Some(ts));
    }

    #[test]
    fn test_directory_index_and_manifest() {
        let (_dir, root) = project();
        let index = write(&root, "components/index.tsx", "");
        write(&root, "lib/package.json", r#"{ "main": "./dist/main.js" }"#);
        let main = write(&root, "lib/dist/main.ts", "");

        let resolver = resolver();

        assert_eq!(resolver.resolve("./components", &root), Some(index));
        assert_eq!(resolver.resolve("./lib", &root), Some(main));
        assert_eq!(resolver.resolve(".", &root.join("components")), resolver.resolve("./components", &root));
    }

    #[test]
    fn test_package_lookup_walks_up() {
        let (_dir, root) = project();
        write(
            &root,
            "node_modules/@acme/ui/package.json",
            r#"{ "exports": { ".": "./src/index.ts", "./button": { "import": "./src/button.ts" } } }"#,
        );
        let index = write(&root, "node_modules/@acme/ui/src/index.ts", "");
        let button = write(&root, "node_modules/@acme/ui/src/button.ts", "");
        let deep = root.join("apps/web/src");
        fs::create_dir_all(&deep).unwrap();

        let resolver = resolver();

        assert_eq!(resolver.resolve("@acme/ui", &deep), Some(index));
        assert_eq!(resolver.resolve("@acme/ui/button", &deep), Some(button));
        assert_eq!(resolver.resolve("@acme/other", &deep), None);
    }

    #[test]
    fn test_package_without_manifest_uses_index_and_subpaths() {
        let (_dir, root) = project();
        let index = write(&root, "node_modules/plain/index.js", "");
        let sub = write(&root, "node_modules/plain/lib/sub.js", "");

        let resolver = resolver();

        assert_eq!(resolver.resolve("plain", &root), Some(index));
        assert_eq!(resolver.resolve("plain/lib/sub", &root), Some(sub));
    }

    #[test]
    fn test_symlinked_workspace_package_is_canonicalized() {
        #[cfg(unix)]
        {
            let (_dir, root) = project();
            let source = write(&root, "packages/core/src/index.ts", "");
            write(&root, "packages/core/package.json", r#"{ "main": "src/index.ts" }"#);
            fs::create_dir_all(root.join("node_modules")).unwrap();
            std::os::unix::fs::symlink(root.join("packages/core"), root.join("node_modules/core"))
                .unwrap();

            assert_eq!(resolver().resolve("core", &root), Some(source));
        }
    }
}
