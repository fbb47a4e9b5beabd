use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use miette::Result;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::TangleError;
use crate::graph::{Cycle, DependencyTree, ImportInfo};
use crate::utils::string::display_path;

mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const CYCLE_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const NORMAL_EDGE: &str = "#64B5F6"; // Soft blue
    pub const DYNAMIC_EDGE: &str = "#90A4AE"; // Blue-grey
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(TangleError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(TangleError::from)
    };
}

/// File graph with one edge per distinct importer/importee pair
pub type FileGraph<'a> = DiGraph<&'a Path, Vec<&'a ImportInfo>>;

/// Collapse a dependency tree into a petgraph graph
///
/// Nodes are added in path order and edges in scan order, so indices are
/// stable between runs.
pub fn file_graph(tree: &DependencyTree) -> FileGraph<'_> {
    let mut graph = FileGraph::new();
    let indices: BTreeMap<&Path, NodeIndex> = tree
        .keys()
        .map(|path| (path.as_path(), graph.add_node(path.as_path())))
        .collect();

    for (path, node) in tree {
        let source = indices[path.as_path()];
        for import in &node.imports {
            let Some(&target) = indices.get(import.resolved.as_path()) else {
                continue;
            };
            match graph.find_edge(source, target) {
                Some(edge) => graph[edge].push(import),
                None => {
                    graph.add_edge(source, target, vec![import]);
                }
            }
        }
    }

    graph
}

/// Renders the import graph as text, Mermaid or Graphviz DOT
pub struct GraphRenderer {
    highlight_cycles: bool,
    show_specifiers: bool,
    root: PathBuf,
}

impl GraphRenderer {
    /// Create a renderer; file names are shown relative to `root`
    pub fn new(highlight_cycles: bool, show_specifiers: bool, root: PathBuf) -> Self {
        Self {
            highlight_cycles,
            show_specifiers,
            root,
        }
    }

    fn label(&self, path: &Path) -> String {
        display_path(path, &self.root)
    }

    fn cycle_members(cycles: &[Cycle]) -> HashSet<&Path> {
        cycles
            .iter()
            .flat_map(|cycle| cycle.members().iter().map(PathBuf::as_path))
            .collect()
    }

    fn cycle_edges(cycles: &[Cycle]) -> HashSet<(&Path, &Path)> {
        cycles.iter().flat_map(|cycle| cycle.edges()).collect()
    }

    fn edge_summary(&self, imports: &[&ImportInfo]) -> String {
        if self.show_specifiers {
            imports
                .iter()
                .map(|import| format!("{}:{}", import.specifier, import.line))
                .collect::<Vec<_>>()
                .join(", ")
        } else if imports.len() > 1 {
            format!("{} imports", imports.len())
        } else {
            imports
                .first()
                .map(|import| import.kind.to_string())
                .unwrap_or_default()
        }
    }

    pub fn render_ascii(
        &self,
        tree: &DependencyTree,
        cycles: &[Cycle],
        output: &mut dyn Write,
    ) -> Result<()> {
        if tree.is_empty() {
            writeln_out!(output, "No files found to visualize")?;
            return Ok(());
        }

        writeln_out!(output, "\n📊 Import Graph\n")?;

        let graph = file_graph(tree);
        let members = Self::cycle_members(cycles);
        let cycle_edges = Self::cycle_edges(cycles);

        for node_idx in graph.node_indices() {
            let path = graph[node_idx];
            let name = self.label(path);

            if members.contains(path) && self.highlight_cycles {
                writeln_out!(output, "┌─────────────────────────────────────┐")?;
                writeln_out!(output, "│ {} ⚠️  IN CYCLE", name)?;
                writeln_out!(output, "└─────────────────────────────────────┘")?;
            } else {
                writeln_out!(output, "{}", name)?;
            }

            let edges: Vec<_> = graph.edges(node_idx).collect();
            if edges.is_empty() {
                writeln_out!(output, "  └── (no local imports)")?;
            } else {
                // petgraph yields outgoing edges newest first
                for (i, edge) in edges.iter().rev().enumerate() {
                    let target = graph[edge.target()];
                    let prefix = if i == edges.len() - 1 { "└──" } else { "├──" };
                    let marker = if self.highlight_cycles && cycle_edges.contains(&(path, target))
                    {
                        " ⚠️  [CYCLE]"
                    } else {
                        ""
                    };

                    writeln_out!(
                        output,
                        "  {} → {} ({}){}",
                        prefix,
                        self.label(target),
                        self.edge_summary(edge.weight()),
                        marker
                    )?;
                }
            }

            writeln_out!(output)?;
        }

        if !cycles.is_empty() && self.highlight_cycles {
            writeln_out!(output, "⚠️  = Part of an import cycle")?;
        }

        Ok(())
    }

    pub fn render_mermaid(
        &self,
        tree: &DependencyTree,
        cycles: &[Cycle],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "graph TD")?;

        let graph = file_graph(tree);
        let members = Self::cycle_members(cycles);
        let cycle_edges = Self::cycle_edges(cycles);

        for node_idx in graph.node_indices() {
            let path = graph[node_idx];
            let node_id = mermaid_id(node_idx);
            let in_cycle = members.contains(path) && self.highlight_cycles;

            if in_cycle {
                writeln_out!(output, "    {}((\"{}\"))", node_id, self.label(path))?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:3px",
                    node_id,
                    colors::CYCLE_NODE_FILL,
                    colors::CYCLE_NODE_STROKE
                )?;
            } else {
                writeln_out!(output, "    {}[\"{}\"]", node_id, self.label(path))?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:2px",
                    node_id,
                    colors::NORMAL_NODE_FILL,
                    colors::NORMAL_NODE_STROKE
                )?;
            }
        }

        writeln_out!(output)?;

        for (link_style_index, edge) in graph.edge_references().enumerate() {
            let source = graph[edge.source()];
            let target = graph[edge.target()];
            let dynamic = edge.weight().iter().all(|import| import.kind.is_dynamic());
            let arrow = if dynamic { "-.->" } else { "-->" };

            writeln_out!(
                output,
                "    {} {}|{}| {}",
                mermaid_id(edge.source()),
                arrow,
                self.edge_summary(edge.weight()).replace('"', "'"),
                mermaid_id(edge.target())
            )?;

            let (color, width) = if self.highlight_cycles && cycle_edges.contains(&(source, target))
            {
                (colors::CYCLE_EDGE, 3)
            } else if dynamic {
                (colors::DYNAMIC_EDGE, 2)
            } else {
                (colors::NORMAL_EDGE, 2)
            };
            writeln_out!(
                output,
                "    linkStyle {} stroke:{},stroke-width:{}px",
                link_style_index,
                color,
                width
            )?;
        }

        Ok(())
    }

    pub fn render_dot(
        &self,
        tree: &DependencyTree,
        cycles: &[Cycle],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph imports {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        let graph = file_graph(tree);
        let members = Self::cycle_members(cycles);
        let cycle_edges = Self::cycle_edges(cycles);

        for node_idx in graph.node_indices() {
            let path = graph[node_idx];
            let (fill_color, stroke_color) = if members.contains(path) && self.highlight_cycles {
                (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
            } else {
                (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
            };

            writeln_out!(
                output,
                r#"    "{}" [style=filled, fillcolor="{}", color="{}", penwidth=2];"#,
                self.label(path),
                fill_color,
                stroke_color
            )?;
        }

        writeln_out!(output)?;

        for edge in graph.edge_references() {
            let source = graph[edge.source()];
            let target = graph[edge.target()];
            let label = self.edge_summary(edge.weight()).replace('"', "\\\"");

            if self.highlight_cycles && cycle_edges.contains(&(source, target)) {
                writeln_out!(
                    output,
                    r#"    "{}" -> "{}" [label="{}", color="{}", penwidth=3];"#,
                    self.label(source),
                    self.label(target),
                    label,
                    colors::CYCLE_EDGE
                )?;
            } else {
                let style = if edge.weight().iter().all(|import| import.kind.is_dynamic()) {
                    "dashed"
                } else {
                    "solid"
                };
                writeln_out!(
                    output,
                    r#"    "{}" -> "{}" [label="{}", style={}];"#,
                    self.label(source),
                    self.label(target),
                    label,
                    style
                )?;
            }
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }
}

fn mermaid_id(index: NodeIndex) -> String {
    format!("f{}", index.index())
}
