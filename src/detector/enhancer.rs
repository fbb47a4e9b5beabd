use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::core::Warning;
use crate::graph::{Cycle, DependencyTree};
use crate::scanner::{ImportScanner, mask_comments};

/// One annotated edge of a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleEdge {
    pub importer: PathBuf,
    pub importee: PathBuf,
    /// Specifier as written in the importer
    pub specifier: String,
    /// 1-based line of the import statement
    pub line: usize,
    /// The import statement line, trimmed
    pub text: String,
    /// Line preceding the statement, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Line following the statement, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// A cycle together with the statements that form it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancedCycle {
    /// Closed file sequence, first file repeated at the end
    pub files: Cycle,
    /// Annotated edges; pairs without context are missing
    pub edges: Vec<CycleEdge>,
}

impl EnhancedCycle {
    /// Distinct files in traversal order
    pub fn members(&self) -> &[PathBuf] {
        self.files.members()
    }

    /// Edges between `importer` and `importee` in this cycle
    pub fn edges_between<'a>(
        &'a self,
        importer: &'a Path,
        importee: &'a Path,
    ) -> impl Iterator<Item = &'a CycleEdge> {
        self.edges
            .iter()
            .filter(move |edge| edge.importer == importer && edge.importee == importee)
    }
}

#[derive(Debug, Default)]
pub struct EnhancementOutcome {
    pub cycles: Vec<EnhancedCycle>,
    pub warnings: Vec<Warning>,
}

/// Annotates detected cycles with the import statements that close them
///
/// Files are re-read from disk; a pair whose edge or statement line cannot
/// be found is skipped with a warning and the cycle is still reported.
pub struct CycleEnhancer {
    scanner: Arc<dyn ImportScanner>,
}

impl CycleEnhancer {
    pub fn new(scanner: Arc<dyn ImportScanner>) -> Self {
        Self { scanner }
    }

    pub fn enhance(&self, cycles: &[Cycle], tree: &DependencyTree) -> EnhancementOutcome {
        let enhanced: Vec<(EnhancedCycle, Vec<Warning>)> = cycles
            .par_iter()
            .map(|cycle| self.enhance_cycle(cycle, tree))
            .collect();

        let mut outcome = EnhancementOutcome::default();
        for (cycle, warnings) in enhanced {
            outcome.cycles.push(cycle);
            outcome.warnings.extend(warnings);
        }
        outcome
    }

    fn enhance_cycle(&self, cycle: &Cycle, tree: &DependencyTree) -> (EnhancedCycle, Vec<Warning>) {
        let mut edges = Vec::new();
        let mut warnings = Vec::new();

        for (importer, importee) in cycle.edges() {
            match self.locate_edge(importer, importee, tree) {
                Ok(edge) => edges.push(edge),
                Err(reason) => warnings.push(Warning::MissingContext {
                    importer: importer.to_path_buf(),
                    importee: importee.to_path_buf(),
                    reason,
                }),
            }
        }

        (
            EnhancedCycle {
                files: cycle.clone(),
                edges,
            },
            warnings,
        )
    }

    fn locate_edge(
        &self,
        importer: &Path,
        importee: &Path,
        tree: &DependencyTree,
    ) -> Result<CycleEdge, String> {
        let import = tree
            .get(importer)
            .and_then(|node| node.import_of(importee))
            .ok_or_else(|| "importer has no edge to this file".to_string())?;

        let source = std::fs::read_to_string(importer).map_err(|e| e.to_string())?;
        let lines: Vec<&str> = source.lines().collect();

        // Masking keeps line breaks, so indices match `lines`
        let masked = mask_comments(&source);
        let index = masked
            .lines()
            .position(|line| self.scanner.line_references(line, &import.specifier))
            .ok_or_else(|| format!("no line imports '{}'", import.specifier))?;

        let context = |i: Option<usize>| {
            i.and_then(|i| lines.get(i))
                .map(|line| line.trim_end().to_string())
        };

        Ok(CycleEdge {
            importer: importer.to_path_buf(),
            importee: importee.to_path_buf(),
            specifier: import.specifier.clone(),
            line: index + 1,
            text: lines[index].trim().to_string(),
            before: context(index.checked_sub(1)),
            after: context(Some(index + 1)),
        })
    }
}
