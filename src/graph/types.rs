//! Core graph types
//!
//! This module contains the fundamental data structures of the import graph.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{ImportKind, Warning};

/// One resolved import edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportInfo {
    /// Specifier exactly as written in the importing file
    pub specifier: String,
    /// Canonical path of the imported file
    pub resolved: PathBuf,
    /// Query or fragment split off the specifier, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub kind: ImportKind,
    pub line: usize,
}

/// Traversal state of a node
///
/// Status only ever moves forward: `Unvisited` → `Visiting` → `Visited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Unvisited,
    Visiting,
    Visited,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyNode {
    pub path: PathBuf,
    /// Edges in scan order; duplicates to the same target are kept
    pub imports: Vec<ImportInfo>,
    pub status: NodeStatus,
}

impl DependencyNode {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            imports: Vec::new(),
            status: NodeStatus::Unvisited,
        }
    }

    /// Move the node to `status`; moving backwards is ignored
    pub fn advance(&mut self, status: NodeStatus) {
        if status > self.status {
            self.status = status;
        }
    }

    /// First edge pointing at `target`
    pub fn import_of(&self, target: &Path) -> Option<&ImportInfo> {
        self.imports.iter().find(|import| import.resolved == target)
    }
}

/// Every reached file, keyed by canonical path
pub type DependencyTree = BTreeMap<PathBuf, DependencyNode>;

/// A closed import cycle, e.g. `[a, b, c, a]`
///
/// The first file is repeated at the end so that consecutive pairs are
/// exactly the edges of the cycle; a file importing itself is `[a, a]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    files: Vec<PathBuf>,
}

impl Cycle {
    /// Close `path` by appending its first file again
    pub fn close(mut path: Vec<PathBuf>) -> Self {
        if let Some(first) = path.first().cloned() {
            path.push(first);
        }
        Self { files: path }
    }

    /// The closed file sequence
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Distinct files in traversal order (closing file removed)
    pub fn members(&self) -> &[PathBuf] {
        let end = self.files.len().saturating_sub(1);
        &self.files[..end]
    }

    /// Number of distinct files
    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.members().iter().any(|member| member == file)
    }

    /// `(importer, importee)` pairs along the cycle
    pub fn edges(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.files
            .windows(2)
            .map(|pair| (pair[0].as_path(), pair[1].as_path()))
    }
}

/// Result of one graph traversal
#[derive(Debug, Default, Serialize)]
pub struct GraphOutcome {
    pub tree: DependencyTree,
    pub cycles: Vec<Cycle>,
    pub warnings: Vec<Warning>,
}
