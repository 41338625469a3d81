// crates/storefront-core/src/model.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of the search dropdown, as returned by `tw/index?tw-nazwa=...`.
///
/// Only the display name is required. Every other field the catalog sends is
/// kept untouched in `extra`, so serializing a result gives back the object
/// that was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "nazwa")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A product as shown on the product detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The catalog sends ids both as strings and as numbers.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "nazwa")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
