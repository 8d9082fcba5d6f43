//! Diagram rendering command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use super::pipeline::{build_graph, report_diagnostics, InputArgs};
use crate::render::{render_graph, RendererKind};
use crate::storage::Config;

/// Renders the input's graph to stdout or a file
pub fn run(
    output: &Output,
    config: &Config,
    input: &InputArgs,
    renderer: Option<RendererKind>,
    title: Option<&str>,
    destination: Option<&Path>,
) -> Result<()> {
    let graph = build_graph(output, config, input)?;
    report_diagnostics(output, &graph.diagnostics);

    let kind = renderer.unwrap_or(config.default_renderer);
    let title = title.unwrap_or(config.title.as_str());
    output.verbose_ctx(
        "render",
        &format!("Using {} renderer, title '{}'", kind.as_str(), title),
    );

    let artifact = render_graph(&graph, title, kind);

    match destination {
        Some(path) => {
            fs::write(path, &artifact)
                .with_context(|| format!("Failed to write diagram: {}", path.display()))?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "success": true,
                    "output": path.display().to_string(),
                    "renderer": kind.as_str(),
                    "resources": graph.len(),
                    "edges": graph.edges.len(),
                    "diagnostics": graph.diagnostics.len(),
                }));
            } else {
                output.success(&format!("Diagram generated: {}", path.display()));
            }
        }
        None => print!("{}", artifact),
    }

    Ok(())
}
