use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use super::types::{Cycle, DependencyNode, DependencyTree, GraphOutcome, ImportInfo, NodeStatus};
use crate::core::Warning;
use crate::dependency_filter::FileFilter;
use crate::error::TangleError;
use crate::progress::ProgressReporter;
use crate::resolver::{ImportResolver, Resolution};
use crate::scanner::{ImportScanner, ScannedImport};

/// Builder for the import graph reachable from one entry file
///
/// Traversal is a three-colour depth-first search driven by an explicit
/// stack, so arbitrarily deep import chains never exhaust the call stack.
/// Meeting a `Visiting` node closes a cycle; meeting a `Visited` node is a
/// shared dependency (diamond) and is not a cycle.
pub struct DependencyGraphBuilder {
    resolver: Arc<ImportResolver>,
    scanner: Arc<dyn ImportScanner>,
    filter: FileFilter,
    root: PathBuf,
}

/// A file on the current traversal path and the index of its next edge
struct Frame {
    file: PathBuf,
    next: usize,
}

impl DependencyGraphBuilder {
    /// Create a new dependency graph builder
    ///
    /// # Arguments
    /// * `resolver` - Resolves the specifiers found in each file
    /// * `scanner` - Extracts the specifiers of a file
    /// * `filter` - Drops imports and target files that are not part of the
    ///   graph
    /// * `root` - Workspace root that exclude globs are relative to
    pub fn new(
        resolver: Arc<ImportResolver>,
        scanner: Arc<dyn ImportScanner>,
        filter: FileFilter,
        root: PathBuf,
    ) -> Self {
        Self {
            resolver,
            scanner,
            filter,
            root,
        }
    }

    pub fn build(
        &self,
        entry: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<GraphOutcome, TangleError> {
        let entry = entry
            .canonicalize()
            .ok()
            .filter(|path| path.is_file())
            .ok_or_else(|| TangleError::EntryNotFound {
                path: entry.to_path_buf(),
            })?;

        let mut outcome = GraphOutcome::default();
        let mut stack: Vec<Frame> = Vec::new();

        self.enter(&entry, &mut outcome, &mut stack, progress);

        while let Some(top) = stack.last_mut() {
            let index = top.next;
            let file = top.file.clone();

            let Some(target) = outcome
                .tree
                .get(&file)
                .and_then(|node| node.imports.get(index))
                .map(|import| import.resolved.clone())
            else {
                if let Some(node) = outcome.tree.get_mut(&file) {
                    node.advance(NodeStatus::Visited);
                }
                stack.pop();
                continue;
            };
            top.next += 1;

            match outcome.tree.get(&target).map(|node| node.status) {
                None | Some(NodeStatus::Unvisited) => {
                    self.enter(&target, &mut outcome, &mut stack, progress);
                }
                Some(NodeStatus::Visiting) => {
                    let start = stack
                        .iter()
                        .position(|frame| frame.file == target)
                        .ok_or_else(|| TangleError::GraphError {
                            message: format!(
                                "'{}' is being visited but is not on the traversal path",
                                target.display()
                            ),
                        })?;

                    let path = stack[start..].iter().map(|frame| frame.file.clone()).collect();
                    outcome.cycles.push(Cycle::close(path));
                }
                Some(NodeStatus::Visited) => {}
            }
        }

        Ok(outcome)
    }

    /// Load `file` (if needed), mark it `Visiting` and push it
    fn enter(
        &self,
        file: &Path,
        outcome: &mut GraphOutcome,
        stack: &mut Vec<Frame>,
        progress: Option<&ProgressReporter>,
    ) {
        if !outcome.tree.contains_key(file) {
            if let Some(p) = progress {
                p.visiting_file(file, outcome.tree.len() + 1);
            }
            let node = self.load_node(file, &mut outcome.warnings);
            outcome.tree.insert(file.to_path_buf(), node);
        }

        if let Some(node) = outcome.tree.get_mut(file) {
            node.advance(NodeStatus::Visiting);
        }
        stack.push(Frame {
            file: file.to_path_buf(),
            next: 0,
        });
    }

    /// Read, scan and resolve one file; failures yield a node without edges
    fn load_node(&self, file: &Path, warnings: &mut Vec<Warning>) -> DependencyNode {
        let mut node = DependencyNode::new(file.to_path_buf());

        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                warnings.push(Warning::ScanFailed {
                    path: file.to_path_buf(),
                    reason: e.to_string(),
                });
                return node;
            }
        };

        let scanned = match self.scanner.scan(file, &source) {
            Ok(scanned) => scanned,
            Err(e) => {
                warnings.push(Warning::ScanFailed {
                    path: file.to_path_buf(),
                    reason: e.describe(),
                });
                return node;
            }
        };

        // Resolution of one file's specifiers fans out; `collect` keeps scan
        // order, so traversal stays deterministic.
        let resolved: Vec<(ScannedImport, Resolution)> = scanned
            .into_par_iter()
            .filter(|import| self.filter.include_import(import))
            .map(|import| {
                let resolution = self.resolver.resolve(&import.specifier, file);
                (import, resolution)
            })
            .collect();

        for (import, resolution) in resolved {
            match resolution {
                Resolution::Resolved(module) => {
                    if self.filter.include_file(&module.path, &self.root) {
                        node.imports.push(ImportInfo {
                            specifier: import.specifier,
                            resolved: module.path,
                            suffix: module.suffix,
                            kind: import.kind,
                            line: import.line,
                        });
                    }
                }
                Resolution::Unresolved => warnings.push(Warning::Unresolved {
                    importer: file.to_path_buf(),
                    specifier: import.specifier,
                    line: import.line,
                }),
                Resolution::NotApplicable => {}
            }
        }

        node
    }
}

/// Files of `tree` in traversal-independent (path) order
pub fn sorted_files(tree: &DependencyTree) -> Vec<&Path> {
    tree.keys().map(PathBuf::as_path).collect()
}
