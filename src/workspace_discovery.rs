use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::project::{PACKAGE_MANIFEST, WORKSPACE_MARKERS};
use crate::manifest::PackageManifest;

/// Memoized workspace root lookup
///
/// The workspace root bounds the upward walk of the ambiguous specifier
/// resolver. It is the first ancestor that declares a multi-package
/// workspace (`package.json` with `workspaces`, `pnpm-workspace.yaml` or
/// `lerna.json`); failing that the nearest directory with a `package.json`;
/// failing that the directory of the starting file itself.
#[derive(Debug, Default)]
pub struct WorkspaceRootCache {
    roots: HashMap<PathBuf, PathBuf>,
}

impl WorkspaceRootCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&mut self, start: &Path) -> PathBuf {
        if let Some(root) = self.roots.get(start) {
            return root.clone();
        }

        let root = find_workspace_root(start);
        self.roots.insert(start.to_path_buf(), root.clone());
        root
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }
}

fn find_workspace_root(start: &Path) -> PathBuf {
    let start_dir = if start.is_dir() {
        start
    } else {
        start.parent().unwrap_or(start)
    };

    let mut nearest_package: Option<&Path> = None;

    for dir in start_dir.ancestors() {
        let manifest_path = dir.join(PACKAGE_MANIFEST);
        if manifest_path.is_file() {
            nearest_package.get_or_insert(dir);

            match PackageManifest::parse_file(&manifest_path) {
                Ok(manifest) if manifest.declares_workspaces() => return dir.to_path_buf(),
                Ok(_) => {}
                Err(e) => {
                    eprintln!(
                        "{} Failed to parse {}: {}",
                        console::style("⚠").yellow(),
                        manifest_path.display(),
                        e
                    );
                }
            }
        }

        if WORKSPACE_MARKERS
            .iter()
            .any(|marker| dir.join(marker).is_file())
        {
            return dir.to_path_buf();
        }
    }

    nearest_package.unwrap_or(start_dir).to_path_buf()
}
