//! JSON output for tools that do their own drawing
//!
//! The document is assembled as a `serde_json::Value` out of plain strings,
//! so writing it out cannot fail.

use serde_json::{Map, Value};

use super::{RenderCluster, RenderNode, Renderer};
use crate::domain::Edge;

/// Pretty-printed `{title, clusters, edges}`
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, title: &str, clusters: &[RenderCluster], edges: &[Edge]) -> String {
        let mut diagram = Map::new();
        diagram.insert("title".to_string(), Value::from(title));
        diagram.insert(
            "clusters".to_string(),
            clusters.iter().map(cluster_value).collect(),
        );
        diagram.insert("edges".to_string(), edges.iter().map(edge_value).collect());

        format!("{:#}\n", Value::Object(diagram))
    }
}

fn cluster_value(cluster: &RenderCluster) -> Value {
    let mut object = Map::new();
    object.insert("category".to_string(), Value::from(cluster.category.as_str()));
    object.insert("nodes".to_string(), cluster.nodes.iter().map(node_value).collect());
    Value::Object(object)
}

fn node_value(node: &RenderNode) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), Value::from(node.id.as_str()));
    object.insert("label".to_string(), Value::from(node.label.as_str()));
    object.insert("icon_key".to_string(), Value::from(node.icon_key.as_str()));
    Value::Object(object)
}

fn edge_value(edge: &Edge) -> Value {
    let mut object = Map::new();
    object.insert("from".to_string(), Value::from(edge.from.as_str()));
    object.insert("to".to_string(), Value::from(edge.to.as_str()));
    Value::Object(object)
}
