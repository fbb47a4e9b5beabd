//! Command implementations for the ts-tangle CLI
//!
//! This module contains the implementations for each CLI command:
//! - check: Find import cycles reachable from an entry file
//! - graph: Draw the import graph reachable from an entry file

pub mod check;
pub mod graph;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Check { .. } => check::execute_check_command(command),
        Commands::Graph { .. } => graph::execute_graph_command(command),
    }
}
