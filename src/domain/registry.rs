//! Resource type to category lookup
//!
//! The registry is plain configuration data: a `{type: category}` table.
//! Types that are not in the table are filtered out of the graph, so a miss
//! from [`CategoryRegistry::lookup`] is a normal signal, not an error.

use std::collections::BTreeMap;

/// Categories for the AWS resource types the diagrams are drawn for
const BUILTIN_CATEGORIES: &[(&str, &str)] = &[
    // Compute / Containers
    ("aws_instance", "Compute"),
    ("aws_lambda_function", "Compute"),
    ("aws_ecs_cluster", "Compute"),
    ("aws_autoscaling_group", "Compute"),
    ("aws_ecr_repository", "Containers"),
    // Databases
    ("aws_db_instance", "Database"),
    ("aws_dynamodb_table", "Database"),
    ("aws_redshift_cluster", "Database"),
    ("aws_elasticache_cluster", "Database"),
    // Network & Content Delivery
    ("aws_elb", "Network"),
    ("aws_alb", "Network"),
    ("aws_vpc", "Network"),
    ("aws_cloudfront_distribution", "Content Delivery"),
    ("aws_route53_zone", "Network"),
    // Storage
    ("aws_s3_bucket", "Storage"),
    ("aws_efs_file_system", "Storage"),
    // Integration / Messaging
    ("aws_sqs_queue", "Integration"),
    ("aws_sns_topic", "Integration"),
    // Security
    ("aws_iam_role", "Security"),
    // DevOps
    ("aws_codebuild_project", "DevOps"),
    // Management
    ("aws_cloudformation_stack", "Management"),
];

/// Read-only map from resource type to category label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    table: BTreeMap<String, String>,
}

impl CategoryRegistry {
    /// The built-in AWS table
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_CATEGORIES.iter().copied())
    }

    /// Builds a registry from `(type, category)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns a registry with extra entries layered on top; later entries replace earlier ones
    pub fn with_overrides<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (resource_type, category) in pairs {
            self.table.insert(resource_type.into(), category.into());
        }
        self
    }

    /// Returns the category for a resource type, or `None` if it is not mapped
    pub fn lookup(&self, resource_type: &str) -> Option<&str> {
        self.table.get(resource_type).map(String::as_str)
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.table.contains_key(resource_type)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// All `(type, category)` entries, sorted by type
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_common_types() {
        let registry = CategoryRegistry::builtin();
        assert_eq!(registry.lookup("aws_instance"), Some("Compute"));
        assert_eq!(registry.lookup("aws_s3_bucket"), Some("Storage"));
        assert_eq!(registry.lookup("aws_cloudfront_distribution"), Some("Content Delivery"));
        assert_eq!(registry.len(), BUILTIN_CATEGORIES.len());
    }

    #[test]
    fn unknown_type_is_not_found() {
        let registry = CategoryRegistry::builtin();
        assert_eq!(registry.lookup("unknown-widget"), None);
        assert!(!registry.contains("unknown-widget"));
    }

    #[test]
    fn overrides_add_and_replace() {
        let registry = CategoryRegistry::builtin().with_overrides([
            ("google_compute_instance", "Compute"),
            ("aws_iam_role", "Identity"),
        ]);

        assert_eq!(registry.lookup("google_compute_instance"), Some("Compute"));
        assert_eq!(registry.lookup("aws_iam_role"), Some("Identity"));
    }

    #[test]
    fn entries_are_sorted() {
        let registry = CategoryRegistry::from_pairs([("b", "Two"), ("a", "One")]);
        let entries: Vec<_> = registry.entries().collect();
        assert_eq!(entries, vec![("a", "One"), ("b", "Two")]);
    }
}
