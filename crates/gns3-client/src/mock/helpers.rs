//! Response builders and node merge logic for the mock controller

use crate::models::ApiResponse;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};

/// Error body in the shape the controller uses
pub fn error(status: StatusCode, message: impl Into<String>) -> ApiResponse {
    ApiResponse::json(
        status,
        json!({
            "message": message.into(),
            "status": status.as_u16(),
        }),
    )
}

pub fn not_found(what: &str, id: &str) -> ApiResponse {
    error(StatusCode::NOT_FOUND, format!("{} ID {} doesn't exist", what, id))
}

pub fn version() -> ApiResponse {
    ApiResponse::json(StatusCode::OK, json!({"version": "2.2.44", "local": true}))
}

/// Apply an update body onto a stored node.
///
/// Top-level keys replace; the `properties` object merges key by key.
pub fn merge_node(node: &mut Value, update: &Value) {
    let (Some(node), Some(update)) = (node.as_object_mut(), update.as_object()) else {
        return;
    };

    for (key, value) in update {
        if key == "properties" {
            let props = node
                .entry("properties")
                .or_insert_with(|| Value::Object(Map::new()));
            match (props.as_object_mut(), value.as_object()) {
                (Some(existing), Some(incoming)) => {
                    for (k, v) in incoming {
                        existing.insert(k.clone(), v.clone());
                    }
                }
                _ => *props = value.clone(),
            }
        } else {
            node.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_node_keeps_untouched_properties() {
        let mut node = json!({"name": "a", "properties": {"image": "alpine", "environment": "A=1"}});
        merge_node(&mut node, &json!({"name": "b", "properties": {"environment": "A=2"}}));
        assert_eq!(node["name"], "b");
        assert_eq!(node["properties"]["image"], "alpine");
        assert_eq!(node["properties"]["environment"], "A=2");
    }
}
