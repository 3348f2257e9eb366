//! Projection of documents into application values.
//!
//! Consumers usually want the record itself rather than the document
//! wrapper, optionally with the document id merged into the record under a
//! caller-chosen field name.

use crate::document::Document;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Records that can carry their document id under a named field.
pub trait WithIdField {
    /// Stores `id` under `field`, overwriting any existing value.
    fn set_id_field(&mut self, field: &str, id: &str);
}

impl WithIdField for BTreeMap<String, String> {
    fn set_id_field(&mut self, field: &str, id: &str) {
        self.insert(field.to_string(), id.to_string());
    }
}

#[cfg(feature = "json")]
impl WithIdField for serde_json::Value {
    /// Only objects receive the field; other JSON values are left untouched.
    fn set_id_field(&mut self, field: &str, id: &str) {
        if let serde_json::Value::Object(map) = self {
            map.insert(field.to_string(), serde_json::Value::String(id.to_string()));
        }
    }
}

impl<T: Clone + WithIdField> Document<T> {
    /// Projects the document into its record.
    ///
    /// Returns `None` for a document that no longer exists.
    pub fn to_data(&self, id_field: Option<&str>) -> Option<T> {
        let mut data = self.data()?.clone();
        if let Some(field) = id_field {
            data.set_id_field(field, self.id());
        }
        Some(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), name.to_string());
        map
    }

    #[test]
    fn test_to_data_without_id_field() {
        let doc = Document::new("users/alice", record("Alice"));
        let data = doc.to_data(None).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("name").map(String::as_str), Some("Alice"));
    }

    #[test]
    fn test_to_data_merges_id() {
        let doc = Document::new("users/alice", record("Alice"));
        let data = doc.to_data(Some("uid")).unwrap();
        assert_eq!(data.get("uid").map(String::as_str), Some("alice"));
    }

    #[test]
    fn test_to_data_missing_document() {
        let doc: Document<BTreeMap<String, String>> = Document::missing("users/ghost");
        assert!(doc.to_data(Some("uid")).is_none());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_projection() {
        let doc = Document::new("users/alice", serde_json::json!({ "name": "Alice" }));
        let data = doc.to_data(Some("id")).unwrap();
        assert_eq!(data["id"], "alice");
        assert_eq!(data["name"], "Alice");
    }
}
