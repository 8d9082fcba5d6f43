//! Mermaid flowchart output

use std::collections::HashMap;
use std::fmt::Write;

use super::{RenderCluster, Renderer};
use crate::domain::Edge;

/// Mermaid labels are double-quoted; quotes inside use the entity form
fn escape_label(input: &str) -> String {
    input.replace('"', "#quot;").replace('\n', " ")
}

/// Renders clusters as `subgraph` blocks in a left-to-right flowchart
///
/// Resource ids contain characters Mermaid does not allow in node ids, so
/// nodes are numbered `n0, n1, ...` in cluster order and labeled with their
/// name.
pub struct MermaidRenderer;

impl Renderer for MermaidRenderer {
    fn render(&self, title: &str, clusters: &[RenderCluster], edges: &[Edge]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "---\ntitle: {}\n---", escape_label(title));
        out.push_str("flowchart LR\n");

        let mut node_ids: HashMap<&str, String> = HashMap::new();
        for (index, cluster) in clusters.iter().enumerate() {
            let _ = writeln!(out, "    subgraph c{}[\"{}\"]", index, escape_label(&cluster.category));
            for node in &cluster.nodes {
                let node_id = format!("n{}", node_ids.len());
                let _ = writeln!(out, "        {}[\"{}\"]", node_id, escape_label(&node.label));
                node_ids.insert(node.id.as_str(), node_id);
            }
            out.push_str("    end\n");
        }

        for edge in edges {
            if let (Some(from), Some(to)) = (node_ids.get(edge.from.as_str()), node_ids.get(edge.to.as_str())) {
                let _ = writeln!(out, "    {} --> {}", from, to);
            }
        }

        out
    }
}
