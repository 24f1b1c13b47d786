//! JSON-Schema description of the sale resource.

use serde_json::{Value, json};

/// Returns the advisory draft-04 schema served on `OPTIONS`.
#[must_use]
pub fn item_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "title": "sale",
        "type": "object",
        "properties": {
            "id": {
                "description": "Unique identifier for the resource.",
                "type": "integer",
                "context": ["embed", "view", "edit"],
                "readonly": true
            },
            "type": {
                "description": "Type for the resource.",
                "type": "string",
                "context": ["edit"]
            },
            "status": {
                "description": "Status for the resource.",
                "type": "string",
                "context": ["edit"]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_shape() {
        let schema = item_schema();

        assert_eq!(schema["title"], "sale");
        assert_eq!(schema["properties"]["id"]["readonly"], true);
        assert_eq!(schema["properties"]["status"]["type"], "string");
    }
}
