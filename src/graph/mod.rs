//! # Import Graph Module
//!
//! Builds the file-level import graph reachable from an entry file and
//! renders it.
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: Iterative three-colour depth-first traversal
//!   that scans, filters and resolves each reached file exactly once and
//!   records every cycle closed by a back edge
//! - **DependencyNode** / **ImportInfo**: A reached file and its resolved
//!   import edges
//! - **Cycle**: A closed file sequence such as `[a, b, c, a]`
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Renders the graph as ASCII, Mermaid or DOT with cycle
//!   highlighting
//!
//! ## Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use ts_tangle::core::ImportKind;
//! use ts_tangle::graph::{Cycle, DependencyNode, DependencyTree, GraphRenderer, ImportInfo};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = DependencyTree::new();
//! let mut a = DependencyNode::new(PathBuf::from("/repo/a.ts"));
//! a.imports.push(ImportInfo {
//!     specifier: "./b".to_string(),
//!     resolved: PathBuf::from("/repo/b.ts"),
//!     suffix: None,
//!     kind: ImportKind::Named,
//!     line: 1,
//! });
//! tree.insert(a.path.clone(), a);
//! tree.insert(PathBuf::from("/repo/b.ts"), DependencyNode::new(PathBuf::from("/repo/b.ts")));
//!
//! let renderer = GraphRenderer::new(true, false, PathBuf::from("/repo"));
//! let mut output = Vec::new();
//! renderer.render_dot(&tree, &[] as &[Cycle], &mut output)?;
//!
//! let dot_output = String::from_utf8(output)?;
//! assert!(dot_output.contains("digraph"));
//! assert!(dot_output.contains(r#""a.ts" -> "b.ts""#));
//! # Ok(())
//! # }
//! ```

mod builder;
mod renderer;
mod types;

pub use builder::{DependencyGraphBuilder, sorted_files};
pub use renderer::{FileGraph, GraphRenderer, file_graph};
pub use types::{Cycle, DependencyNode, DependencyTree, GraphOutcome, ImportInfo, NodeStatus};
