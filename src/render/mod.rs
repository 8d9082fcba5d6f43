//! # Renderers
//!
//! A renderer turns a finished graph into a textual artifact. It receives
//! one call with the title, the clusters (with a display label and an icon
//! key for each member) and the edges; layout and styling are its own
//! business.
//!
//! | Renderer | Output |
//! |----------|--------|
//! | [`DotRenderer`] | Graphviz `digraph` with one `cluster_*` subgraph per category |
//! | [`MermaidRenderer`] | Mermaid `flowchart` with `subgraph` blocks |
//! | [`JsonRenderer`] | Title, clusters and edges as JSON |

mod dot;
mod mermaid;
mod json;

pub use dot::DotRenderer;
pub use mermaid::MermaidRenderer;
pub use json::JsonRenderer;

use serde::{Deserialize, Serialize};

use crate::domain::{DependencyGraph, Edge};

/// A resource as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderNode {
    /// Resource id (`type.name`)
    pub id: String,

    /// Display label (the declared name)
    pub label: String,

    /// Key for icon selection (the resource type)
    pub icon_key: String,
}

/// A category and its members, in cluster order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderCluster {
    pub category: String,
    pub nodes: Vec<RenderNode>,
}

/// Produces a diagram from a graph view
pub trait Renderer {
    fn render(&self, title: &str, clusters: &[RenderCluster], edges: &[Edge]) -> String;
}

/// Available renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    #[default]
    Dot,
    Mermaid,
    Json,
}

impl RendererKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::Dot => "dot",
            RendererKind::Mermaid => "mermaid",
            RendererKind::Json => "json",
        }
    }

    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            RendererKind::Dot => Box::new(DotRenderer),
            RendererKind::Mermaid => Box::new(MermaidRenderer),
            RendererKind::Json => Box::new(JsonRenderer),
        }
    }
}

/// Builds the renderer's view of a graph's clusters
pub fn view(graph: &DependencyGraph) -> Vec<RenderCluster> {
    graph
        .clusters
        .iter()
        .map(|cluster| RenderCluster {
            category: cluster.category.clone(),
            nodes: cluster
                .members
                .iter()
                .filter_map(|id| graph.resource(id))
                .map(|record| RenderNode {
                    id: record.id.clone(),
                    label: record.name.clone(),
                    icon_key: record.resource_type.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Renders a graph with the chosen renderer
pub fn render_graph(graph: &DependencyGraph, title: &str, kind: RendererKind) -> String {
    kind.renderer().render(title, &view(graph), &graph.edges)
}
