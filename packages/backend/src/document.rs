use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The unit of persistence: a named document owning one nested data map.
///
/// The id doubles as the document's primary key in the backend; the wire
/// field is named `_id` to match the stored JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,

    /// The nested mapping this document persists. Always present, initialized
    /// empty on creation.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Document {
    /// A fresh document with an empty data map.
    pub fn new(id: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            data: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_document_has_empty_data() {
        let doc = Document::new("DEFAULT");
        assert_eq!(doc.id, "DEFAULT");
        assert!(doc.data.is_empty());
    }

    #[test]
    fn serializes_with_underscore_id() {
        let doc = Document::new("players");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json, json!({"_id": "players", "data": {}}));
    }

    #[test]
    fn deserializes_missing_data_as_empty() {
        let doc: Document = serde_json::from_value(json!({"_id": "x"})).unwrap();
        assert!(doc.data.is_empty());
    }
}
