//! Resource records and the ordered resource set

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::DeclValue;

/// One extracted resource declaration
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResourceRecord {
    /// `type.name`, unique within a run
    pub id: String,

    #[serde(rename = "type")]
    pub resource_type: String,

    pub name: String,

    pub category: String,

    /// The declared attributes, untouched
    #[serde(rename = "config")]
    pub raw_config: DeclValue,
}

impl ResourceRecord {
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        raw_config: DeclValue,
    ) -> Self {
        let resource_type = resource_type.into();
        let name = name.into();
        Self {
            id: Self::compose_id(&resource_type, &name),
            resource_type,
            name,
            category: category.into(),
            raw_config,
        }
    }

    /// Builds the canonical id for a declaration
    pub fn compose_id(resource_type: &str, name: &str) -> String {
        format!("{}.{}", resource_type, name)
    }
}

/// Resources keyed by id, iterated in first-declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSet {
    records: Vec<ResourceRecord>,

    /// Map from id to position in `records`
    index: HashMap<String, usize>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any record with the same id
    ///
    /// A replaced record keeps its original position so iteration order
    /// stays tied to where the id was first declared. Returns the record
    /// that was replaced, if any.
    pub fn insert(&mut self, record: ResourceRecord) -> Option<ResourceRecord> {
        match self.index.get(&record.id) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ResourceRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of a resource in iteration order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a ResourceRecord;
    type IntoIter = std::slice::Iter<'a, ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ResourceRecord> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = ResourceRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

/// Serializes as a mapping of id to record
impl Serialize for ResourceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.id, record)?;
        }
        map.end()
    }
}
