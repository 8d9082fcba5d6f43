//! Declaration value model
//!
//! Parsed declaration documents are loosely structured: the same logical
//! block may arrive as a mapping, a list of mappings, or a bare scalar
//! depending on the source format and the author. [`DeclValue`] captures
//! that as a small tagged union so traversal code can check shapes
//! explicitly instead of assuming them.
//!
//! Mappings keep document order and keep duplicate keys, so a resource
//! declared twice in the same block is still visible to the extractor.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

/// A leaf value in a declaration document
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// A node in a parsed declaration document
#[derive(Debug, Clone, PartialEq)]
pub enum DeclValue {
    /// Ordered key/value pairs; duplicate keys are preserved
    Mapping(Vec<(String, DeclValue)>),
    Sequence(Vec<DeclValue>),
    Scalar(Scalar),
}

impl DeclValue {
    /// The null value
    pub fn null() -> Self {
        DeclValue::Scalar(Scalar::Null)
    }

    /// Creates a string scalar
    pub fn string(value: impl Into<String>) -> Self {
        DeclValue::Scalar(Scalar::String(value.into()))
    }

    /// Creates a mapping from key/value pairs, keeping their order
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DeclValue)>,
    {
        DeclValue::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a sequence
    pub fn sequence(items: impl IntoIterator<Item = DeclValue>) -> Self {
        DeclValue::Sequence(items.into_iter().collect())
    }

    /// Returns the entries if this is a mapping
    pub fn as_mapping(&self) -> Option<&[(String, DeclValue)]> {
        match self {
            DeclValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the items if this is a sequence
    pub fn as_sequence(&self) -> Option<&[DeclValue]> {
        match self {
            DeclValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DeclValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DeclValue::Scalar(Scalar::Null))
    }

    /// Looks up a key in a mapping
    ///
    /// When the key appears more than once the last occurrence wins,
    /// matching how the declaration formats merge repeated attributes.
    pub fn get(&self, key: &str) -> Option<&DeclValue> {
        self.as_mapping()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Human-readable name of the value's shape, used in diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            DeclValue::Mapping(_) => "mapping",
            DeclValue::Sequence(_) => "sequence",
            DeclValue::Scalar(Scalar::Null) => "null",
            DeclValue::Scalar(Scalar::Bool(_)) => "bool",
            DeclValue::Scalar(Scalar::Number(_)) => "number",
            DeclValue::Scalar(Scalar::String(_)) => "string",
        }
    }

    /// Renders a scalar as a mapping key; containers cannot be keys
    fn into_key(self) -> Option<String> {
        match self {
            DeclValue::Scalar(Scalar::String(s)) => Some(s),
            DeclValue::Scalar(Scalar::Number(n)) => Some(n.to_string()),
            DeclValue::Scalar(Scalar::Bool(b)) => Some(b.to_string()),
            DeclValue::Scalar(Scalar::Null) => Some("null".to_string()),
            DeclValue::Mapping(_) | DeclValue::Sequence(_) => None,
        }
    }
}

impl From<&str> for DeclValue {
    fn from(value: &str) -> Self {
        DeclValue::string(value)
    }
}

impl From<String> for DeclValue {
    fn from(value: String) -> Self {
        DeclValue::string(value)
    }
}

impl From<bool> for DeclValue {
    fn from(value: bool) -> Self {
        DeclValue::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for DeclValue {
    fn from(value: i64) -> Self {
        DeclValue::Scalar(Scalar::Number(Number::from(value)))
    }
}

impl Serialize for DeclValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DeclValue::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            DeclValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DeclValue::Scalar(Scalar::Null) => serializer.serialize_unit(),
            DeclValue::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            DeclValue::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            DeclValue::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for DeclValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DeclValueVisitor)
    }
}

struct DeclValueVisitor;

impl<'de> Visitor<'de> for DeclValueVisitor {
    type Value = DeclValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping, sequence or scalar value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<DeclValue, E> {
        Ok(DeclValue::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DeclValue, E> {
        Ok(DeclValue::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DeclValue, E> {
        Ok(DeclValue::Scalar(Scalar::Number(Number::from(v))))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<DeclValue, E> {
        // NaN and infinities have no JSON number form
        Ok(Number::from_f64(v)
            .map(|n| DeclValue::Scalar(Scalar::Number(n)))
            .unwrap_or_else(|| DeclValue::string(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DeclValue, E> {
        Ok(DeclValue::string(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<DeclValue, E> {
        Ok(DeclValue::string(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<DeclValue, E> {
        Ok(DeclValue::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<DeclValue, E> {
        Ok(DeclValue::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<DeclValue, D::Error> {
        DeclValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DeclValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<DeclValue>()? {
            items.push(item);
        }
        Ok(DeclValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DeclValue, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<DeclValue, DeclValue>()? {
            let shape = key.shape();
            let key = key
                .into_key()
                .ok_or_else(|| de::Error::custom(format!("{shape} is not a valid mapping key")))?;
            entries.push((key, value));
        }
        Ok(DeclValue::Mapping(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_keeps_order_and_duplicates() {
        let value: DeclValue =
            serde_json::from_str(r#"{"b": 1, "a": {"x": "y"}, "b": 2}"#).unwrap();

        let entries = value.as_mapping().unwrap();
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "b"]);

        // Last occurrence wins on lookup
        assert_eq!(value.get("b"), Some(&DeclValue::from(2)));
    }

    #[test]
    fn deserialize_scalars() {
        let value: DeclValue =
            serde_json::from_str(r#"[null, true, 3, -4, 1.5, "s"]"#).unwrap();
        let shapes: Vec<_> = value.as_sequence().unwrap().iter().map(|v| v.shape()).collect();
        assert_eq!(
            shapes,
            vec!["null", "bool", "number", "number", "number", "string"]
        );
    }

    #[test]
    fn yaml_non_string_keys_become_strings() {
        let value: DeclValue = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        assert_eq!(value.get("1").and_then(|v| v.as_str()), Some("one"));
        assert!(value.get("true").is_some());
    }

    #[test]
    fn container_keys_are_rejected() {
        let result: Result<DeclValue, _> = serde_yaml::from_str("? [a, b]\n: value\n");
        assert!(result.is_err());
    }

    #[test]
    fn accessors_check_shape() {
        let value = DeclValue::mapping([("name", DeclValue::from("web"))]);
        assert!(value.as_sequence().is_none());
        assert!(value.as_str().is_none());
        assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("web"));
        assert!(value.get("missing").is_none());

        let scalar = DeclValue::from("web");
        assert!(scalar.get("name").is_none());
        assert!(DeclValue::null().is_null());
    }

    #[test]
    fn serialize_round_trips_through_json() {
        let value = DeclValue::mapping([
            ("tags", DeclValue::sequence([DeclValue::from("a"), DeclValue::from(true)])),
            ("count", DeclValue::from(2)),
            ("extra", DeclValue::null()),
        ]);

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tags": ["a", true], "count": 2, "extra": null})
        );
    }
}
