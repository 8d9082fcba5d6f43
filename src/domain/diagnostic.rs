//! Structured, non-fatal reports about skipped or malformed input
//!
//! Infrastructure declarations are often partially invalid while they are
//! being written. Instead of aborting, every stage records a [`Diagnostic`]
//! for the fragment it had to drop and carries on with the rest.

use std::fmt;

use serde::Serialize;

/// What went wrong with an input fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The document has no usable `resource` block
    MissingResourceBlock,
    /// A nested block had the wrong shape and was skipped
    UnexpectedShape,
    /// The resource type has no category and was filtered out
    UnknownResourceType,
    /// The same `type.name` was declared again; the later declaration replaced it
    DuplicateResource,
    /// A dependency reference names no extracted resource
    DependencyNotFound,
    /// The dependency field, or one of its entries, is malformed
    InvalidDependsOn,
}

impl DiagnosticKind {
    /// Short label for terminal output
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingResourceBlock => "missing-resources",
            DiagnosticKind::UnexpectedShape => "shape",
            DiagnosticKind::UnknownResourceType => "unknown-type",
            DiagnosticKind::DuplicateResource => "duplicate",
            DiagnosticKind::DependencyNotFound => "missing-dependency",
            DiagnosticKind::InvalidDependsOn => "invalid-depends-on",
        }
    }
}

/// A single non-fatal report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Resource id or document path the report is about, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    pub message: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, subject: Option<String>, message: String) -> Self {
        Self {
            kind,
            subject,
            message,
        }
    }

    /// `found` is the shape of the `resource` value, or `None` when the key is absent
    pub fn missing_resource_block(found: Option<&str>) -> Self {
        let message = match found {
            Some(shape) => format!("unexpected structure for 'resource': {}", shape),
            None => "document declares no 'resource' block".to_string(),
        };
        Self::new(DiagnosticKind::MissingResourceBlock, None, message)
    }

    pub fn unexpected_shape(path: &str, expected: &str, found: &str) -> Self {
        Self::new(
            DiagnosticKind::UnexpectedShape,
            Some(path.to_string()),
            format!("expected {} at '{}', got {}", expected, path, found),
        )
    }

    pub fn unknown_resource_type(resource_type: &str, resource_id: &str) -> Self {
        Self::new(
            DiagnosticKind::UnknownResourceType,
            Some(resource_id.to_string()),
            format!(
                "no category mapping for resource type '{}' (resource: {}), skipping",
                resource_type, resource_id
            ),
        )
    }

    pub fn duplicate_resource(resource_id: &str) -> Self {
        Self::new(
            DiagnosticKind::DuplicateResource,
            Some(resource_id.to_string()),
            format!(
                "resource '{}' is declared more than once, keeping the last declaration",
                resource_id
            ),
        )
    }

    pub fn dependency_not_found(dependency: &str, resource_id: &str) -> Self {
        Self::new(
            DiagnosticKind::DependencyNotFound,
            Some(resource_id.to_string()),
            format!(
                "dependency '{}' not found for resource '{}'",
                dependency, resource_id
            ),
        )
    }

    pub fn depends_on_not_a_list(field: &str, resource_id: &str, found: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidDependsOn,
            Some(resource_id.to_string()),
            format!(
                "'{}' for {} is not a list (got {}), skipping dependency edges",
                field, resource_id, found
            ),
        )
    }

    pub fn depends_on_entry_not_a_string(field: &str, resource_id: &str, found: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidDependsOn,
            Some(resource_id.to_string()),
            format!(
                "'{}' entry for {} is not a reference string (got {}), skipping it",
                field, resource_id, found
            ),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.message)
    }
}
