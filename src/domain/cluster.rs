//! Category clusters

use std::collections::HashMap;

use serde::Serialize;

use super::resource::ResourceSet;

/// Resources sharing a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    pub category: String,

    /// Member resource ids, in resource-set order
    pub members: Vec<String>,
}

/// Partitions resources by category
///
/// Clusters appear in the order their category is first seen while walking
/// the resource set, so identical input always yields identical output.
pub fn group_clusters(resources: &ResourceSet) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut by_category: HashMap<&str, usize> = HashMap::new();

    for record in resources {
        match by_category.get(record.category.as_str()) {
            Some(&idx) => clusters[idx].members.push(record.id.clone()),
            None => {
                by_category.insert(record.category.as_str(), clusters.len());
                clusters.push(Cluster {
                    category: record.category.clone(),
                    members: vec![record.id.clone()],
                });
            }
        }
    }

    clusters
}
