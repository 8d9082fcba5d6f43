//! Graphviz DOT output

use std::fmt::Write;

use super::{RenderCluster, Renderer};
use crate::domain::Edge;

/// Escape special characters for DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Quote a resource id; ids contain dots and dashes so they are never bare.
fn quote_id(id: &str) -> String {
    format!("\"{}\"", escape_label(id))
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// A DOT graph builder for constructing valid DOT output.
struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self { output, indent: 1 }
    }

    fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    fn node_style(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str("node ");
        self.write_attrs(attrs);
        self.output.push_str(";\n");
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    fn node(&mut self, id: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str(&quote_id(id));
        self.write_attrs(attrs);
        self.output.push_str(";\n");
        self
    }

    fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{} -> {};", quote_id(from), quote_id(to));
        self
    }

    fn start_cluster(&mut self, index: usize, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph cluster_{} {{", index);
        self.indent += 1;
        self.attr("label", label)
    }

    fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    fn write_attrs(&mut self, attrs: &[(&str, &str)]) {
        self.output.push('[');
        for (i, (key, value)) in attrs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            let _ = write!(self.output, "{}=\"{}\"", key, escape_label(value));
        }
        self.output.push(']');
    }

    fn finish(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

/// Renders clusters as `cluster_N` subgraphs, in cluster order
pub struct DotRenderer;

impl Renderer for DotRenderer {
    fn render(&self, title: &str, clusters: &[RenderCluster], edges: &[Edge]) -> String {
        let mut dot = DotBuilder::new("infragraph");
        dot.attr("label", title)
            .attr("labelloc", "t")
            .attr("rankdir", "LR")
            .node_style(&[("shape", "box"), ("style", "rounded")])
            .blank();

        for (index, cluster) in clusters.iter().enumerate() {
            dot.start_cluster(index, &cluster.category);
            for node in &cluster.nodes {
                dot.node(
                    &node.id,
                    &[("label", node.label.as_str()), ("tooltip", node.icon_key.as_str())],
                );
            }
            dot.end_cluster().blank();
        }

        for edge in edges {
            dot.edge(&edge.from, &edge.to);
        }

        dot.finish()
    }
}
