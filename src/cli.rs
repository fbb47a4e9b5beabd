use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{CommonArgs, CycleDisplayArgs, FormatArgs};

#[derive(Parser)]
#[command(
    name = "ts-tangle",
    about = "🧶 Detect import cycles in TypeScript and JavaScript monorepos",
    long_about = "ts-tangle follows the imports of one entry file through your project, resolving \
                  path aliases from every tsconfig.json and jsconfig.json in the workspace, and \
                  reports each import cycle together with the statements that form it.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find import cycles reachable from an entry file
    ///
    /// Builds the import graph of the entry file and reports every cycle
    /// with the file, line and statement of each import that closes it.
    #[command(
        long_about = "Follow the imports of ENTRY, resolving relative paths, path aliases, \
                      baseUrl-relative modules and packages, and report every import cycle. \
                      Type-only imports are ignored because they are erased at compile time. Use \
                      --error-on-cycles in CI to fail the build when a cycle is present."
    )]
    Check {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cycle_display: CycleDisplayArgs,

        /// Exit with error code if cycles found
        #[arg(long, env = "TS_TANGLE_ERROR_ON_CYCLES")]
        error_on_cycles: bool,
    },

    /// Draw the import graph reachable from an entry file
    ///
    /// Renders the files reached from the entry and their imports, with
    /// cycles highlighted.
    #[command(
        long_about = "Generate the import graph of ENTRY as ASCII text, a Mermaid diagram or a \
                      Graphviz DOT file. Files and edges that take part in an import cycle are \
                      highlighted."
    )]
    Graph {
        #[command(flatten)]
        common: CommonArgs,

        /// Graph format
        #[arg(
            short,
            long,
            value_enum,
            default_value = crate::constants::output::DEFAULT_GRAPH_FORMAT,
            env = "TS_TANGLE_GRAPH_FORMAT"
        )]
        format: GraphFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "TS_TANGLE_OUTPUT")]
        output: Option<PathBuf>,

        /// Highlight cycles in the graph
        #[arg(
            long,
            default_value = "true",
            action = clap::ArgAction::Set,
            env = "TS_TANGLE_HIGHLIGHT_CYCLES"
        )]
        highlight_cycles: bool,

        /// Label edges with their specifiers and lines
        #[arg(long, env = "TS_TANGLE_SHOW_SPECIFIERS")]
        show_specifiers: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "github")]
    GitHub,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum GraphFormat {
    Ascii,
    Mermaid,
    Dot,
}
