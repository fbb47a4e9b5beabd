//! Graph command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::GraphFormat;
use crate::config::GraphOptions;
use crate::executors::{CommandExecutor, run_analysis};
use crate::graph::GraphRenderer;

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        if !config.analysis.quiet {
            eprintln!(
                "{} Generating {} import graph...",
                style("📊").cyan(),
                format!("{:?}", config.format).to_lowercase()
            );
        }

        let report = run_analysis(&config.analysis)?;

        let cycles = if config.highlight_cycles {
            report.raw_cycles()
        } else {
            Vec::new()
        };

        let renderer = GraphRenderer::new(
            config.highlight_cycles,
            config.show_specifiers,
            report.root.clone(),
        );

        // Determine output destination
        let mut output_writer: Box<dyn io::Write> =
            if let Some(output_path) = config.output.as_ref() {
                Box::new(BufWriter::new(
                    File::create(output_path)
                        .into_diagnostic()
                        .wrap_err_with(|| {
                            format!("Failed to create output file '{}'", output_path.display())
                        })?,
                ))
            } else {
                Box::new(io::stdout())
            };

        // Render based on format
        match config.format {
            GraphFormat::Ascii => {
                renderer
                    .render_ascii(&report.tree, &cycles, output_writer.as_mut())
                    .wrap_err("Failed to render ASCII graph")?;
            }
            GraphFormat::Mermaid => {
                renderer
                    .render_mermaid(&report.tree, &cycles, output_writer.as_mut())
                    .wrap_err("Failed to render Mermaid graph")?;
            }
            GraphFormat::Dot => {
                renderer
                    .render_dot(&report.tree, &cycles, output_writer.as_mut())
                    .wrap_err("Failed to render DOT graph")?;
            }
        }

        output_writer
            .flush()
            .into_diagnostic()
            .wrap_err("Failed to write graph output")?;

        if let Some(output_path) = config.output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}
