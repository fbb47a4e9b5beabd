use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::constants::project::{CONFIG_FILE_NAMES, IGNORED_DIRS, SOURCE_EXTENSIONS};
use crate::core::Warning;
use crate::dependency_filter::FileFilter;
use crate::detector::{CycleEnhancer, EnhancedCycle};
use crate::error::TangleError;
use crate::graph::{Cycle, DependencyGraphBuilder, DependencyTree};
use crate::progress::ProgressReporter;
use crate::project::ProjectDiscovery;
use crate::resolver::{
    AmbiguousResolver, ImportResolver, ModuleResolver, NodeModuleResolver, ResolverRegistry,
};
use crate::scanner::{ImportScanner, RegexImportScanner};
use crate::workspace_discovery::WorkspaceRootCache;

/// Knobs of one analysis session
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Project config file names, in registration priority
    pub config_files: Vec<String>,
    /// Source extensions, in probe order
    pub extensions: Vec<String>,
    /// Directory names never descended into and never part of the graph
    pub ignored_dirs: Vec<String>,
    /// Workspace-root-relative globs of files left out of the graph
    pub exclude: Vec<String>,
    pub skip_dynamic_imports: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        let owned = |values: &[&str]| -> Vec<String> {
            values.iter().map(|value| value.to_string()).collect()
        };
        Self {
            config_files: owned(CONFIG_FILE_NAMES),
            extensions: owned(SOURCE_EXTENSIONS),
            ignored_dirs: owned(IGNORED_DIRS),
            exclude: Vec::new(),
            skip_dynamic_imports: false,
        }
    }
}

/// Everything one analysis produced
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub entry: PathBuf,
    pub root: PathBuf,
    /// Project configs found under the root
    pub configs: Vec<PathBuf>,
    #[serde(skip)]
    pub tree: DependencyTree,
    pub cycles: Vec<EnhancedCycle>,
    pub warnings: Vec<Warning>,
}

impl AnalysisReport {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Number of files reached from the entry
    pub fn file_count(&self) -> usize {
        self.tree.len()
    }

    /// The plain closed cycles, without annotations
    pub fn raw_cycles(&self) -> Vec<Cycle> {
        self.cycles.iter().map(|cycle| cycle.files.clone()).collect()
    }
}

/// Config discovery result for one workspace root
#[derive(Debug)]
struct DiscoveredRoot {
    registry: Arc<ResolverRegistry>,
    configs: Vec<PathBuf>,
    warnings: Vec<Warning>,
}

/// Analysis session
///
/// Owns every cache used while analyzing: workspace roots per entry and one
/// resolver registry (with its resolution caches) per workspace root.
/// Repeated analyses reuse them until [`ImportAnalyzer::reset`].
pub struct ImportAnalyzer {
    options: AnalysisOptions,
    scanner: Arc<dyn ImportScanner>,
    default: Arc<dyn ModuleResolver>,
    roots: WorkspaceRootCache,
    discovered: HashMap<PathBuf, DiscoveredRoot>,
}

impl ImportAnalyzer {
    /// Create an analyzer with the regex scanner and Node-style resolution
    pub fn new(options: AnalysisOptions) -> Self {
        let scanner = Arc::new(RegexImportScanner::new());
        let default = Arc::new(NodeModuleResolver::new(options.extensions.clone()));
        Self::with_collaborators(options, scanner, default)
    }

    /// Create an analyzer with a custom scanner and default resolver
    pub fn with_collaborators(
        options: AnalysisOptions,
        scanner: Arc<dyn ImportScanner>,
        default: Arc<dyn ModuleResolver>,
    ) -> Self {
        Self {
            options,
            scanner,
            default,
            roots: WorkspaceRootCache::new(),
            discovered: HashMap::new(),
        }
    }

    /// Drop every cached workspace root, registry and resolution
    pub fn reset(&mut self) {
        self.roots.clear();
        self.discovered.clear();
    }

    pub fn analyze(
        &mut self,
        entry: &Path,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<AnalysisReport, TangleError> {
        let entry = entry
            .canonicalize()
            .ok()
            .filter(|path| path.is_file())
            .ok_or_else(|| TangleError::EntryNotFound {
                path: entry.to_path_buf(),
            })?;

        let root = self.roots.find(&entry);
        let filter = FileFilter::new(
            self.options.skip_dynamic_imports,
            self.options.extensions.clone(),
            self.options.ignored_dirs.clone(),
            &self.options.exclude,
        )?;

        if !self.discovered.contains_key(&root) {
            let discovered = self.discover(&root, progress.as_deref_mut());
            self.discovered.insert(root.clone(), discovered);
        }
        let discovered = self
            .discovered
            .get(&root)
            .ok_or_else(|| TangleError::GraphError {
                message: format!("no resolver registry for '{}'", root.display()),
            })?;

        let resolver = ImportResolver::new(
            AmbiguousResolver::new(Arc::clone(&discovered.registry), root.clone()),
            Arc::clone(&self.default),
        );
        let builder = DependencyGraphBuilder::new(
            Arc::new(resolver),
            Arc::clone(&self.scanner),
            filter,
            root.clone(),
        );

        if let Some(p) = progress.as_mut() {
            p.start_traversal(&entry);
        }
        let graph = builder.build(&entry, progress.as_deref())?;
        if let Some(p) = progress.as_mut() {
            p.finish_traversal(graph.tree.len());
            p.start_cycle_detection();
        }

        let enhancer = CycleEnhancer::new(Arc::clone(&self.scanner));
        let enhancement = enhancer.enhance(&graph.cycles, &graph.tree);
        if let Some(p) = progress.as_ref() {
            p.finish_cycle_detection(enhancement.cycles.len());
        }

        let mut warnings = discovered.warnings.clone();
        warnings.extend(graph.warnings);
        warnings.extend(enhancement.warnings);

        Ok(AnalysisReport {
            entry,
            root,
            configs: discovered.configs.clone(),
            tree: graph.tree,
            cycles: enhancement.cycles,
            warnings,
        })
    }

    fn discover(&self, root: &Path, mut progress: Option<&mut ProgressReporter>) -> DiscoveredRoot {
        if let Some(p) = progress.as_mut() {
            p.start_discovery(root);
        }

        let discovery = ProjectDiscovery::new(
            self.options.config_files.clone(),
            self.options.ignored_dirs.clone(),
            self.options.extensions.clone(),
            Arc::clone(&self.default),
        );
        let outcome = discovery.discover(root, progress.as_deref());

        if let Some(p) = progress.as_mut() {
            p.finish_discovery(outcome.configs.len(), outcome.registry.len());
        }

        DiscoveredRoot {
            registry: Arc::new(outcome.registry),
            configs: outcome.configs,
            warnings: outcome.warnings,
        }
    }
}
