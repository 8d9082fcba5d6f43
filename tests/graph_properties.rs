//! Property tests for graph construction
//!
//! Documents are generated from a small alphabet of types and names so that
//! duplicates, unknown types and dangling references all show up often.

use std::collections::{HashMap, HashSet};

use infragraph::domain::{
    CategoryRegistry, DeclValue, DependencyGraph, DiagnosticKind, GraphOptions,
};
use proptest::prelude::*;

const TYPES: &[&str] = &["compute-instance", "storage-bucket", "network-vpc", "unknown-widget"];
const NAMES: &[&str] = &["web", "api", "assets", "logs", "main"];

fn registry() -> CategoryRegistry {
    CategoryRegistry::from_pairs([
        ("compute-instance", "compute"),
        ("storage-bucket", "storage"),
        ("network-vpc", "network"),
    ])
}

/// One declaration: type index, name index, dependency references
#[derive(Debug, Clone)]
struct Decl {
    resource_type: usize,
    name: usize,
    depends_on: Vec<(usize, usize)>,
}

fn decl_strategy() -> impl Strategy<Value = Decl> {
    (
        0..TYPES.len(),
        0..NAMES.len(),
        prop::collection::vec((0..TYPES.len(), 0..NAMES.len()), 0..4),
    )
        .prop_map(|(resource_type, name, depends_on)| Decl {
            resource_type,
            name,
            depends_on,
        })
}

fn id(resource_type: usize, name: usize) -> String {
    format!("{}.{}", TYPES[resource_type], NAMES[name])
}

/// Builds a repeated-block document; each config carries its position as `seq`
fn document(decls: &[Decl]) -> DeclValue {
    let blocks = decls.iter().enumerate().map(|(seq, decl)| {
        let deps = DeclValue::sequence(
            decl.depends_on
                .iter()
                .map(|(t, n)| DeclValue::string(id(*t, *n))),
        );
        let config = DeclValue::mapping([
            ("seq", DeclValue::from(seq as i64)),
            ("depends_on", deps),
        ]);
        DeclValue::mapping([(
            TYPES[decl.resource_type],
            DeclValue::mapping([(NAMES[decl.name], config)]),
        )])
    });

    DeclValue::mapping([("resource", DeclValue::sequence(blocks))])
}

fn build(decls: &[Decl]) -> DependencyGraph {
    DependencyGraph::build(&document(decls), &registry(), &GraphOptions::default())
}

proptest! {
    #[test]
    fn ids_are_unique_and_declared(decls in prop::collection::vec(decl_strategy(), 0..16)) {
        let graph = build(&decls);

        let declared: HashSet<String> = decls
            .iter()
            .filter(|d| registry().contains(TYPES[d.resource_type]))
            .map(|d| id(d.resource_type, d.name))
            .collect();

        let ids: Vec<&str> = graph.resource_ids().collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), unique.len());
        prop_assert_eq!(unique.len(), declared.len());
        for record in &graph.resources {
            prop_assert_eq!(&record.id, &format!("{}.{}", record.resource_type, record.name));
            prop_assert!(declared.contains(&record.id));
        }
    }

    #[test]
    fn unknown_types_are_filtered_and_reported(decls in prop::collection::vec(decl_strategy(), 0..16)) {
        let graph = build(&decls);

        let unknown = decls
            .iter()
            .filter(|d| !registry().contains(TYPES[d.resource_type]))
            .count();
        let reported = graph
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::UnknownResourceType)
            .count();

        prop_assert_eq!(unknown, reported);
        prop_assert!(graph.resources.iter().all(|r| registry().contains(&r.resource_type)));
    }

    #[test]
    fn last_declaration_wins(decls in prop::collection::vec(decl_strategy(), 0..16)) {
        let graph = build(&decls);

        let mut last: HashMap<String, i64> = HashMap::new();
        for (seq, decl) in decls.iter().enumerate() {
            if registry().contains(TYPES[decl.resource_type]) {
                last.insert(id(decl.resource_type, decl.name), seq as i64);
            }
        }

        for record in &graph.resources {
            prop_assert_eq!(
                record.raw_config.get("seq"),
                Some(&DeclValue::from(last[&record.id]))
            );
        }
    }

    #[test]
    fn clusters_partition_resources(decls in prop::collection::vec(decl_strategy(), 0..16)) {
        let graph = build(&decls);

        let mut members: Vec<&str> = graph
            .clusters
            .iter()
            .flat_map(|c| c.members.iter().map(String::as_str))
            .collect();
        members.sort_unstable();

        let mut ids: Vec<&str> = graph.resource_ids().collect();
        ids.sort_unstable();
        prop_assert_eq!(members, ids);

        let categories: HashSet<&str> = graph.clusters.iter().map(|c| c.category.as_str()).collect();
        prop_assert_eq!(categories.len(), graph.clusters.len());

        for cluster in &graph.clusters {
            for member in &cluster.members {
                prop_assert_eq!(&graph.resource(member).unwrap().category, &cluster.category);
            }
        }
    }

    #[test]
    fn edges_never_dangle(decls in prop::collection::vec(decl_strategy(), 0..16)) {
        let graph = build(&decls);

        for edge in &graph.edges {
            prop_assert!(graph.contains(&edge.from));
            prop_assert!(graph.contains(&edge.to));
        }
    }

    #[test]
    fn build_is_deterministic(decls in prop::collection::vec(decl_strategy(), 0..16)) {
        let first = serde_json::to_string(&build(&decls)).unwrap();
        let second = serde_json::to_string(&build(&decls)).unwrap();
        prop_assert_eq!(first, second);
    }
}
