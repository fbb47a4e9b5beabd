//! Core type definitions
//!
//! This module contains the basic data structures shared between the scanner,
//! the resolvers and the graph builder, with minimal logic - focusing on data
//! representation.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Syntactic form an import was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import './polyfill'`
    SideEffect,
    /// `import React from 'react'`
    Default,
    /// `import * as path from 'path'`
    Namespace,
    /// `import { a, b as c } from './x'`
    Named,
    /// `import React, { useState } from 'react'`
    Mixed,
    /// `import('./lazy')`
    Dynamic,
    /// `export { a } from './x'`, `export * as ns from './x'`
    ReExport,
    /// `export * from './x'`
    ReExportAll,
    /// `require('./x')`, `import x = require('./x')`
    Require,
}

impl ImportKind {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ImportKind::Dynamic)
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportKind::SideEffect => "side-effect",
            ImportKind::Default => "default",
            ImportKind::Namespace => "namespace",
            ImportKind::Named => "named",
            ImportKind::Mixed => "mixed",
            ImportKind::Dynamic => "dynamic",
            ImportKind::ReExport => "re-export",
            ImportKind::ReExportAll => "re-export-all",
            ImportKind::Require => "require",
        };
        f.write_str(name)
    }
}

/// A non-fatal problem encountered during an analysis run
///
/// Warnings are collected rather than raised so a single unreadable file or
/// unresolvable specifier never aborts the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A specifier could not be resolved and its edge was dropped
    Unresolved {
        importer: PathBuf,
        specifier: String,
        line: usize,
    },
    /// A file could not be read or scanned; it became a node without edges
    ScanFailed { path: PathBuf, reason: String },
    /// A cycle edge could not be annotated with its import statement
    MissingContext {
        importer: PathBuf,
        importee: PathBuf,
        reason: String,
    },
    /// A project config could not be loaded and contributes no resolver
    ConfigSkipped { path: PathBuf, reason: String },
}

impl Warning {
    /// File the warning is attributed to
    pub fn path(&self) -> &Path {
        match self {
            Warning::Unresolved { importer, .. } => importer,
            Warning::ScanFailed { path, .. } => path,
            Warning::MissingContext { importer, .. } => importer,
            Warning::ConfigSkipped { path, .. } => path,
        }
    }

    /// One-line description without the attributed path
    pub fn message(&self) -> String {
        match self {
            Warning::Unresolved {
                specifier, line, ..
            } => format!("cannot resolve '{specifier}' (line {line})"),
            Warning::ScanFailed { reason, .. } => format!("cannot scan imports: {reason}"),
            Warning::MissingContext {
                importee, reason, ..
            } => format!(
                "no import statement found for '{}': {reason}",
                importee.display()
            ),
            Warning::ConfigSkipped { reason, .. } => format!("config ignored: {reason}"),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path().display(), self.message())
    }
}
