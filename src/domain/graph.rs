//! Dependency graph for declared resources
//!
//! Ties the pipeline together (extract, group, resolve) and answers
//! ordering questions about the result. Uses petgraph for graph operations.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use thiserror::Error;

use super::cluster::{group_clusters, Cluster};
use super::diagnostic::Diagnostic;
use super::extract::extract_resources;
use super::registry::CategoryRegistry;
use super::resolve::{resolve_dependencies, Edge, DEFAULT_DEPENDS_ON_FIELD};
use super::resource::{ResourceRecord, ResourceSet};
use super::value::DeclValue;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Dependency cycle detected between: {}", .0.join(", "))]
    CycleDetected(Vec<String>),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
}

/// Knobs for graph construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Attribute holding dependency references
    pub depends_on_field: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            depends_on_field: DEFAULT_DEPENDS_ON_FIELD.to_string(),
        }
    }
}

/// Categorized resources with their dependency edges
///
/// Built fresh from one document; nothing is cached between runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    pub resources: ResourceSet,
    pub clusters: Vec<Cluster>,
    pub edges: Vec<Edge>,

    /// Everything that was skipped along the way, in pipeline order
    pub diagnostics: Vec<Diagnostic>,
}

impl DependencyGraph {
    /// Runs the full pipeline over a parsed document
    pub fn build(document: &DeclValue, registry: &CategoryRegistry, options: &GraphOptions) -> Self {
        let extraction = extract_resources(document, registry);
        let mut graph = Self::from_resources(extraction.resources, options);

        let mut diagnostics = extraction.diagnostics;
        diagnostics.append(&mut graph.diagnostics);
        graph.diagnostics = diagnostics;
        graph
    }

    /// Builds clusters and edges for an already extracted resource set
    pub fn from_resources(resources: ResourceSet, options: &GraphOptions) -> Self {
        let clusters = group_clusters(&resources);
        let resolution = resolve_dependencies(&resources, &options.depends_on_field);

        Self {
            resources,
            clusters,
            edges: resolution.edges,
            diagnostics: resolution.diagnostics,
        }
    }

    pub fn resource(&self, id: &str) -> Option<&ResourceRecord> {
        self.resources.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains(id)
    }

    /// Returns the number of resources in the graph
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn resource_ids(&self) -> impl Iterator<Item = &str> {
        self.resources.ids()
    }

    /// Direct dependencies of a resource (what it waits for)
    pub fn dependencies(&self, id: &str) -> Result<Vec<&str>, GraphError> {
        self.require(id)?;
        Ok(self
            .edges
            .iter()
            .filter(|e| e.to == id)
            .map(|e| e.from.as_str())
            .collect())
    }

    /// Direct dependents of a resource (what waits for it)
    pub fn dependents(&self, id: &str) -> Result<Vec<&str>, GraphError> {
        self.require(id)?;
        Ok(self
            .edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| e.to.as_str())
            .collect())
    }

    /// Returns true if the dependency edges form a cycle
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.to_digraph())
    }

    /// Returns resource ids with every dependency before its dependents
    ///
    /// Among resources that are ready at the same time, declaration order
    /// decides, so the result is stable for identical input.
    pub fn provisioning_order(&self) -> Result<Vec<String>, GraphError> {
        let graph = self.to_digraph();

        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(pos, _)| Reverse(pos))
            .collect();

        let mut order = Vec::with_capacity(graph.node_count());
        while let Some(Reverse(pos)) = ready.pop() {
            let idx = NodeIndex::new(pos);
            order.push(graph[idx].to_string());

            for next in graph.neighbors_directed(idx, Direction::Outgoing) {
                let degree = &mut in_degree[next.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(next.index()));
                }
            }
        }

        if order.len() < graph.node_count() {
            return Err(GraphError::CycleDetected(self.cycle_members(&graph)));
        }

        Ok(order)
    }

    /// Resources that sit on a cycle, in declaration order
    fn cycle_members(&self, graph: &DiGraph<&str, ()>) -> Vec<String> {
        let mut members: Vec<NodeIndex> = tarjan_scc(graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .flatten()
            .collect();
        members.sort();
        members.into_iter().map(|idx| graph[idx].to_string()).collect()
    }

    /// Node indices match resource-set positions
    fn to_digraph(&self) -> DiGraph<&str, ()> {
        let mut graph = DiGraph::with_capacity(self.resources.len(), self.edges.len());
        for id in self.resources.ids() {
            graph.add_node(id);
        }

        for edge in &self.edges {
            if let (Some(from), Some(to)) = (
                self.resources.position(&edge.from),
                self.resources.position(&edge.to),
            ) {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }

        graph
    }

    fn require(&self, id: &str) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::ResourceNotFound(id.to_string()))
        }
    }
}
