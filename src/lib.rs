//! infragraph - Turn Terraform resource declarations into dependency diagrams
//!
//! Declarations are parsed into a loosely-typed document, resources are
//! extracted and grouped into categories, and `depends_on` references
//! become edges. Anything malformed is reported as a diagnostic instead of
//! aborting the run; only unparseable input is fatal.

pub mod domain;
pub mod storage;
pub mod render;
pub mod cli;

pub use domain::{Cluster, DeclValue, DependencyGraph, Diagnostic, DiagnosticKind, Edge, ResourceRecord};
