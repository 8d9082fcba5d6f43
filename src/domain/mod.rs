//! Domain models for infragraph
//!
//! Contains the graph-building logic without any I/O concerns.

mod value;
mod diagnostic;
mod registry;
mod resource;
mod extract;
mod cluster;
mod resolve;
mod graph;

pub use value::{DeclValue, Scalar};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use registry::CategoryRegistry;
pub use resource::{ResourceRecord, ResourceSet};
pub use extract::{extract_resources, Extraction, RESOURCE_KEY};
pub use cluster::{group_clusters, Cluster};
pub use resolve::{normalize_reference, resolve_dependencies, Edge, Resolution, DEFAULT_DEPENDS_ON_FIELD};
pub use graph::{DependencyGraph, GraphError, GraphOptions};
