// lib/crates/fleet-common/src/inventory.rs

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Inventory policy document (`{"InventoryPolicy": {...}}`).
///
/// Gatherers keep the order in which the policy declares them; the
/// orchestrator runs them in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryPolicy {
    #[serde(rename = "InventoryPolicy", default)]
    pub gatherers: GathererPolicies,
}

/// Ordered `gatherer name -> opaque sub-policy` entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GathererPolicies(Vec<(String, Value)>);

impl GathererPolicies {
    #[must_use]
    pub fn new(entries: Vec<(String, Value)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, policy)| (name.as_str(), policy))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for GathererPolicies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, policy) in &self.0 {
            map.serialize_entry(name, policy)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GathererPolicies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = GathererPolicies;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of gatherer name to gatherer policy")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Value)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, policy)) = access.next_entry::<String, Value>()? {
                    if entries.iter().any(|(existing, _)| *existing == name) {
                        return Err(de::Error::custom(format!(
                            "gatherer '{name}' declared more than once"
                        )));
                    }
                    entries.push((name, policy));
                }
                Ok(GathererPolicies(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Result of one gatherer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Inventory type, equal to the gatherer name (e.g. `AWS:Application`).
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SchemaVersion")]
    pub schema_version: String,
    #[serde(rename = "CaptureTime")]
    pub capture_time: String,
    /// Gatherer payload; opaque to the orchestrator.
    #[serde(rename = "Content")]
    pub content: Value,
}

/// Item shape expected by the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireInventoryItem {
    #[serde(rename = "TypeName")]
    pub type_name: String,
    #[serde(rename = "SchemaVersion")]
    pub schema_version: String,
    #[serde(rename = "CaptureTime")]
    pub capture_time: String,
    #[serde(rename = "Content")]
    pub content: Vec<Map<String, Value>>,
    /// Lowercase hex SHA-256 of the serialized content.
    #[serde(rename = "ContentHash")]
    pub content_hash: String,
}
