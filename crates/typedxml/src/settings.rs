//! Configuration bundles for both conversion directions.
//!
//! A settings value is constructed once per conversion (or shared
//! read-only across conversions) and never mutated mid-traversal. All
//! fields have defaults, and the structs deserialize from a partial JSON
//! settings file with missing fields filled in.

use serde::{Deserialize, Serialize};

use crate::types::JsonPrimitiveType;

/// Settings for [`Json2Xml`](crate::Json2Xml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Json2XmlSettings {
    /// Name of the document root element.
    pub root_name: String,
    /// Local name used for synthetic array item elements.
    pub primitive_array_item: String,
    /// Default namespace of the output document, unqualified if `None`.
    pub namespace: Option<String>,
    /// Prefix bound to the list namespace on a degenerate empty-array root.
    pub array_prefix: String,
    /// Prefix for null-typed values.
    pub null_prefix: String,
    /// Prefix for binary-typed values.
    pub binary_prefix: String,
    /// Prefix for text-typed values.
    pub text_prefix: String,
    /// Prefix for floating point values.
    pub real_prefix: String,
    /// Prefix for integral values.
    pub int_prefix: String,
    /// Prefix for boolean values.
    pub bool_prefix: String,
    /// Reserved object field name whose value becomes element text content
    /// instead of an attribute.
    pub text_key: String,
}

impl Default for Json2XmlSettings {
    fn default() -> Self {
        Json2XmlSettings {
            root_name: "root".to_string(),
            primitive_array_item: "item".to_string(),
            namespace: None,
            array_prefix: "Array".to_string(),
            null_prefix: "null".to_string(),
            binary_prefix: "Binary".to_string(),
            text_prefix: "Text".to_string(),
            real_prefix: "Real".to_string(),
            int_prefix: "Int".to_string(),
            bool_prefix: "Bool".to_string(),
            text_key: "#text".to_string(),
        }
    }
}

impl Json2XmlSettings {
    /// The configured prefix name for a taxonomy member.
    pub fn prefix(&self, ty: JsonPrimitiveType) -> &str {
        match ty {
            JsonPrimitiveType::Null => &self.null_prefix,
            JsonPrimitiveType::Boolean => &self.bool_prefix,
            JsonPrimitiveType::Int => &self.int_prefix,
            JsonPrimitiveType::Float => &self.real_prefix,
            JsonPrimitiveType::Text => &self.text_prefix,
            JsonPrimitiveType::Binary => &self.binary_prefix,
        }
    }

    /// The namespace URI declared for a taxonomy member. Only the prefix
    /// names are configurable; the URIs are fixed.
    pub fn namespace_of(&self, ty: JsonPrimitiveType) -> &'static str {
        ty.default_namespace()
    }
}

/// Traversal rule for array-valued object fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParentKeyPolicy {
    /// Attribute-compatible object siblings collapse under a shared
    /// wrapper with synthetic item elements; divergent arrays fork into
    /// one element per item.
    #[default]
    ItemElements,
    /// Every array element gets its own element named after the
    /// originating field key, preserving ordering without synthetic item
    /// levels.
    PreserveParentKey,
}

/// Settings for [`Xml2Json`](crate::Xml2Json).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Xml2JsonSettings {
    /// Object field name that receives element text content.
    pub text_key: String,
    /// Object field name that receives translated comments.
    pub comment_key: String,
    /// Local name recognized as a synthetic array item element.
    pub primitive_array_item: String,
    /// Whether XML comments are translated into comment-key fields.
    pub translate_comments: bool,
    /// When true, attribute names map to object field names as-is; when
    /// false they are marked with a leading `@`.
    pub simple_attributes: bool,
}

impl Default for Xml2JsonSettings {
    fn default() -> Self {
        Xml2JsonSettings {
            text_key: "#text".to_string(),
            comment_key: "#comment".to_string(),
            primitive_array_item: "item".to_string(),
            translate_comments: false,
            simple_attributes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Json2XmlSettings::default();
        assert_eq!(s.root_name, "root");
        assert_eq!(s.primitive_array_item, "item");
        assert_eq!(s.namespace, None);
        assert_eq!(s.array_prefix, "Array");
        assert_eq!(s.text_key, "#text");
        assert_eq!(s.prefix(JsonPrimitiveType::Int), "Int");
        assert_eq!(s.prefix(JsonPrimitiveType::Float), "Real");
        assert_eq!(s.prefix(JsonPrimitiveType::Null), "null");
    }

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let s: Json2XmlSettings = serde_json::from_str(r#"{"root_name": "data"}"#).unwrap();
        assert_eq!(s.root_name, "data");
        assert_eq!(s.int_prefix, "Int");
        assert_eq!(s.text_key, "#text");
    }

    #[test]
    fn test_xml2json_defaults() {
        let s = Xml2JsonSettings::default();
        assert_eq!(s.text_key, "#text");
        assert_eq!(s.comment_key, "#comment");
        assert!(!s.translate_comments);
        assert!(s.simple_attributes);
    }
}
