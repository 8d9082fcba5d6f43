//! Dependency resolution
//!
//! Turns each resource's `depends_on` list into edges. The edge direction is
//! `dependency -> dependent`: "from must exist before to".

use std::collections::HashSet;

use serde::Serialize;

use super::diagnostic::Diagnostic;
use super::resource::ResourceSet;
use super::value::DeclValue;

/// Attribute holding dependency references
pub const DEFAULT_DEPENDS_ON_FIELD: &str = "depends_on";

/// A dependency edge: `to` depends on `from`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Result of a resolution pass
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Strips whitespace and a `${...}` interpolation wrapper from a reference
///
/// HCL parsers stringify bare traversals such as `aws_s3_bucket.assets`
/// as `"${aws_s3_bucket.assets}"`.
pub fn normalize_reference(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Resolves dependency references for every resource
///
/// Edges come out in resource order, then in list order within a resource.
/// Unknown references and malformed fields drop only the offending piece.
pub fn resolve_dependencies(resources: &ResourceSet, field: &str) -> Resolution {
    let mut out = Resolution::default();

    for record in resources {
        let Some(depends_on) = record.raw_config.get(field) else {
            continue;
        };

        let refs = match depends_on {
            DeclValue::Sequence(refs) => refs,
            // `depends_on = null` declares nothing
            value if value.is_null() => continue,
            other => {
                out.diagnostics.push(Diagnostic::depends_on_not_a_list(
                    field,
                    &record.id,
                    other.shape(),
                ));
                continue;
            }
        };

        let mut seen: HashSet<&str> = HashSet::new();
        for entry in refs {
            let Some(raw) = entry.as_str() else {
                out.diagnostics.push(Diagnostic::depends_on_entry_not_a_string(
                    field,
                    &record.id,
                    entry.shape(),
                ));
                continue;
            };

            let reference = normalize_reference(raw);
            if !resources.contains(reference) {
                out.diagnostics
                    .push(Diagnostic::dependency_not_found(reference, &record.id));
                continue;
            }

            if seen.insert(reference) {
                out.edges.push(Edge::new(reference, record.id.as_str()));
            }
        }
    }

    out
}
