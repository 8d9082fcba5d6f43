//! Shared input handling for the graph commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::output::Output;
use crate::domain::{DependencyGraph, Diagnostic};
use crate::storage::{load_document, Config, DocumentFormat};

/// The declaration file a command reads
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Declaration file (.tf, .tf.json, .yaml)
    pub file: PathBuf,

    /// Input syntax, instead of guessing from the file name
    #[arg(long, value_enum)]
    pub input_format: Option<DocumentFormat>,
}

/// Parses the input and builds its graph
///
/// A parse failure aborts; everything else ends up in the graph's diagnostics.
pub fn build_graph(output: &Output, config: &Config, input: &InputArgs) -> Result<DependencyGraph> {
    let format = input
        .input_format
        .unwrap_or_else(|| DocumentFormat::from_path(&input.file));
    output.verbose_ctx(
        "parse",
        &format!("Reading {} as {}", input.file.display(), format),
    );

    let document = load_document(&input.file, Some(format))?;

    let registry = config.registry();
    output.verbose_ctx(
        "graph",
        &format!(
            "Using {} category mappings, dependency field '{}'",
            registry.len(),
            config.depends_on_field
        ),
    );

    let graph = DependencyGraph::build(&document, &registry, &config.graph_options());
    output.verbose_ctx(
        "graph",
        &format!(
            "Built graph: {} resources, {} clusters, {} edges, {} diagnostics",
            graph.len(),
            graph.clusters.len(),
            graph.edges.len(),
            graph.diagnostics.len()
        ),
    );

    Ok(graph)
}

/// Prints every diagnostic as a warning on stderr
pub fn report_diagnostics(output: &Output, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        output.warning(diagnostic);
    }
}
