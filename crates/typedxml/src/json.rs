//! Thin wrappers around `serde_json` for parsing and rendering the JSON
//! side of a conversion.

use crate::error::Result;
use crate::node::JsonNode;

/// Parses a JSON string into a [`JsonNode`] tree.
///
/// # Examples
///
/// ```
/// use typedxml::{JsonNode, from_json_str};
///
/// let node = from_json_str(r#"{"id": 3}"#).unwrap();
/// assert!(node.is_object());
/// ```
pub fn from_json_str(s: &str) -> Result<JsonNode> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    Ok(JsonNode::from(value))
}

/// Parses a JSON byte slice into a [`JsonNode`] tree.
pub fn from_json_slice(v: &[u8]) -> Result<JsonNode> {
    let value: serde_json::Value = serde_json::from_slice(v)?;
    Ok(JsonNode::from(value))
}

/// Converts a `serde_json::Value` into a [`JsonNode`] tree.
pub fn from_json_value(value: serde_json::Value) -> JsonNode {
    JsonNode::from(value)
}

/// Renders a [`JsonNode`] tree as a compact JSON string.
///
/// Binary scalars render as base64 text and the missing sentinel as
/// `null`, since plain JSON has no spelling for either.
pub fn to_json_string(node: &JsonNode) -> Result<String> {
    Ok(serde_json::to_string(&serde_json::Value::from(node))?)
}

/// Renders a [`JsonNode`] tree as a pretty-printed JSON string.
pub fn to_json_string_pretty(node: &JsonNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(&serde_json::Value::from(node))?)
}

/// Converts a [`JsonNode`] tree into a `serde_json::Value`.
pub fn to_json_value(node: &JsonNode) -> serde_json::Value {
    serde_json::Value::from(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let node = from_json_str(r#"{"b":1,"a":[true,null]}"#).unwrap();
        assert_eq!(to_json_string(&node).unwrap(), r#"{"b":1,"a":[true,null]}"#);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(from_json_str("{not json").is_err());
    }
}
