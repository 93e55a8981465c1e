//! The JSON tree model consumed and produced by the converters.
//!
//! Object field order and array element order are significant and are
//! preserved through conversion, which is why object fields are an ordered
//! sequence of pairs rather than a map. The model carries two kinds a plain
//! `serde_json::Value` cannot express: a distinct `Binary` scalar and a
//! `Missing` sentinel that conversion treats as absent.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::types::JsonPrimitiveType;

/// A polymorphic JSON node.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    /// Sentinel for an absent node; silently skipped during conversion.
    Missing,
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// Integral number; wide enough to hold both `i64` and `u64` exactly
    Int(i128),
    /// Floating point number
    Float(f64),
    /// JSON string
    Text(String),
    /// Binary payload
    Binary(Vec<u8>),
    /// Ordered sequence of nodes
    Array(Vec<JsonNode>),
    /// Ordered mapping of field name to node
    Object(Vec<(String, JsonNode)>),
}

impl JsonNode {
    /// Whether this is the missing-node sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, JsonNode::Missing)
    }

    /// Whether this node is a scalar (including null and binary).
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            JsonNode::Null
                | JsonNode::Bool(_)
                | JsonNode::Int(_)
                | JsonNode::Float(_)
                | JsonNode::Text(_)
                | JsonNode::Binary(_)
        )
    }

    /// Whether this node is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonNode::Object(_))
    }

    /// Whether this node is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonNode::Array(_))
    }

    /// The taxonomy member for a scalar node, `None` for compounds and
    /// the missing sentinel.
    pub fn primitive_type(&self) -> Option<JsonPrimitiveType> {
        match self {
            JsonNode::Null => Some(JsonPrimitiveType::Null),
            JsonNode::Bool(_) => Some(JsonPrimitiveType::Boolean),
            JsonNode::Int(_) => Some(JsonPrimitiveType::Int),
            JsonNode::Float(_) => Some(JsonPrimitiveType::Float),
            JsonNode::Text(_) => Some(JsonPrimitiveType::Text),
            JsonNode::Binary(_) => Some(JsonPrimitiveType::Binary),
            _ => None,
        }
    }

    /// Stringifies a scalar for element text or attribute values.
    ///
    /// Integers render as exact integer text, floats via the canonical
    /// `f64` display, booleans as `true`/`false`, binary as standard
    /// base64, null as empty text. Compounds render as empty text; callers
    /// dispatch on kind before asking for the text form.
    pub fn value_text(&self) -> String {
        match self {
            JsonNode::Null | JsonNode::Missing => String::new(),
            JsonNode::Bool(b) => b.to_string(),
            JsonNode::Int(i) => i.to_string(),
            JsonNode::Float(f) => f.to_string(),
            JsonNode::Text(s) => s.clone(),
            JsonNode::Binary(bytes) => BASE64.encode(bytes),
            JsonNode::Array(_) | JsonNode::Object(_) => String::new(),
        }
    }
}

impl From<serde_json::Value> for JsonNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonNode::Null,
            serde_json::Value::Bool(b) => JsonNode::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    JsonNode::Int(i as i128)
                } else if let Some(u) = n.as_u64() {
                    JsonNode::Int(u as i128)
                } else {
                    JsonNode::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => JsonNode::Text(s),
            serde_json::Value::Array(items) => {
                JsonNode::Array(items.into_iter().map(JsonNode::from).collect())
            }
            serde_json::Value::Object(fields) => {
                JsonNode::Object(fields.into_iter().map(|(k, v)| (k, JsonNode::from(v))).collect())
            }
        }
    }
}

impl From<&JsonNode> for serde_json::Value {
    fn from(node: &JsonNode) -> Self {
        match node {
            // The sentinel has no JSON spelling; null is the closest.
            JsonNode::Missing | JsonNode::Null => serde_json::Value::Null,
            JsonNode::Bool(b) => serde_json::Value::Bool(*b),
            JsonNode::Int(i) => {
                if let Ok(v) = i64::try_from(*i) {
                    serde_json::Value::Number(v.into())
                } else if let Ok(v) = u64::try_from(*i) {
                    serde_json::Value::Number(v.into())
                } else {
                    serde_json::Value::String(i.to_string())
                }
            }
            JsonNode::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            JsonNode::Text(s) => serde_json::Value::String(s.clone()),
            JsonNode::Binary(bytes) => serde_json::Value::String(BASE64.encode(bytes)),
            JsonNode::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            JsonNode::Object(fields) => {
                let mut map = serde_json::Map::new();
                for (k, v) in fields {
                    map.insert(k.clone(), serde_json::Value::from(v));
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
