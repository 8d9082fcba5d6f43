//! Resource extraction
//!
//! Walks a parsed declaration document and produces the flat set of
//! categorized resources. Accepted layouts for the `resource` key:
//!
//! ```text
//! resource: [ { <type>: { <name>: <config> } }, ... ]   # repeated blocks
//! resource:   { <type>: { <name>: <config> } }          # merged mapping
//! ```
//!
//! A type entry may also be a list of `{ <name>: <config> }` mappings, which
//! is how some parsers represent repeated blocks of the same type. Likewise a
//! name mapped to a list of bodies is one declaration per body, in order.
//! Anything else is skipped with a diagnostic; extraction never fails.

use super::diagnostic::Diagnostic;
use super::registry::CategoryRegistry;
use super::resource::{ResourceRecord, ResourceSet};
use super::value::DeclValue;

/// Top-level key holding resource declarations
pub const RESOURCE_KEY: &str = "resource";

/// Result of an extraction pass
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub resources: ResourceSet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extracts every categorized resource from a document
pub fn extract_resources(document: &DeclValue, registry: &CategoryRegistry) -> Extraction {
    let mut extractor = Extractor {
        registry,
        out: Extraction::default(),
    };
    extractor.visit_document(document);
    extractor.out
}

struct Extractor<'a> {
    registry: &'a CategoryRegistry,
    out: Extraction,
}

impl Extractor<'_> {
    fn visit_document(&mut self, document: &DeclValue) {
        let Some(entries) = document.as_mapping() else {
            self.warn(Diagnostic::unexpected_shape(
                "<document>",
                "mapping",
                document.shape(),
            ));
            return;
        };

        let mut found = false;
        for (key, value) in entries {
            if key != RESOURCE_KEY {
                continue;
            }
            found = true;

            match value {
                DeclValue::Sequence(blocks) => {
                    for (i, block) in blocks.iter().enumerate() {
                        let path = format!("{}[{}]", RESOURCE_KEY, i);
                        match block {
                            DeclValue::Mapping(types) => self.visit_types(&path, types),
                            other => self.warn(Diagnostic::unexpected_shape(
                                &path,
                                "mapping of resource types",
                                other.shape(),
                            )),
                        }
                    }
                }
                DeclValue::Mapping(types) => self.visit_types(RESOURCE_KEY, types),
                other => self.warn(Diagnostic::missing_resource_block(Some(other.shape()))),
            }
        }

        if !found {
            self.warn(Diagnostic::missing_resource_block(None));
        }
    }

    fn visit_types(&mut self, path: &str, types: &[(String, DeclValue)]) {
        for (resource_type, instances) in types {
            let path = format!("{}.{}", path, resource_type);
            match instances {
                DeclValue::Mapping(named) => self.visit_instances(resource_type, named),
                DeclValue::Sequence(items) => {
                    for (i, item) in items.iter().enumerate() {
                        match item {
                            DeclValue::Mapping(named) => self.visit_instances(resource_type, named),
                            other => self.warn(Diagnostic::unexpected_shape(
                                &format!("{}[{}]", path, i),
                                "mapping of resource names",
                                other.shape(),
                            )),
                        }
                    }
                }
                other => self.warn(Diagnostic::unexpected_shape(
                    &path,
                    "mapping of resource names",
                    other.shape(),
                )),
            }
        }
    }

    fn visit_instances(&mut self, resource_type: &str, named: &[(String, DeclValue)]) {
        for (name, config) in named {
            match config {
                // Repeated blocks under one name arrive as a list of bodies
                DeclValue::Sequence(bodies)
                    if !bodies.is_empty() && bodies.iter().all(|b| b.as_mapping().is_some()) =>
                {
                    for body in bodies {
                        self.declare(resource_type, name, body);
                    }
                }
                _ => self.declare(resource_type, name, config),
            }
        }
    }

    fn declare(&mut self, resource_type: &str, name: &str, config: &DeclValue) {
        let Some(category) = self.registry.lookup(resource_type) else {
            let id = ResourceRecord::compose_id(resource_type, name);
            self.warn(Diagnostic::unknown_resource_type(resource_type, &id));
            return;
        };

        let record = ResourceRecord::new(resource_type, name, category, config.clone());
        let id = record.id.clone();
        if self.out.resources.insert(record).is_some() {
            self.warn(Diagnostic::duplicate_resource(&id));
        }
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        self.out.diagnostics.push(diagnostic);
    }
}
