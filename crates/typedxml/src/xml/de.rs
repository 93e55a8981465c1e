//! XML to JSON conversion, the structural inverse of [`ser`](super::ser).
//!
//! Element and attribute namespace prefixes are resolved back to primitive
//! types through the fixed namespace URIs declared on the root. Elements
//! whose only content is a single type-tagged text node become scalars,
//! attribute-bearing elements become objects, and both repeated same-tag
//! siblings and item-element content become arrays.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{ConvertError, Result};
use crate::node::JsonNode;
use crate::settings::Xml2JsonSettings;
use crate::types::{JsonPrimitiveType, LIST_NAMESPACE};
use crate::xml::tree::{XmlContent, XmlDocument, XmlElement};
use crate::xml::utils;

/// The XML to JSON converter.
#[derive(Debug, Clone, Default)]
pub struct Xml2Json {
    settings: Xml2JsonSettings,
}

/// Prefix resolution scoped to one document.
struct PrefixContext {
    types: HashMap<String, JsonPrimitiveType>,
    list_prefixes: Vec<String>,
}

impl PrefixContext {
    fn from_document(doc: &XmlDocument) -> Self {
        let mut types = HashMap::new();
        let mut list_prefixes = Vec::new();
        for (prefix, uri) in &doc.bindings {
            if uri == LIST_NAMESPACE {
                list_prefixes.push(prefix.clone());
            } else if let Some(ty) = JsonPrimitiveType::from_namespace(uri) {
                types.insert(prefix.clone(), ty);
            }
        }
        PrefixContext {
            types,
            list_prefixes,
        }
    }

    fn type_of(&self, prefix: &str) -> Option<JsonPrimitiveType> {
        self.types.get(prefix).copied()
    }

    fn is_list(&self, prefix: &str) -> bool {
        self.list_prefixes.iter().any(|p| p == prefix)
    }
}

impl Xml2Json {
    /// Creates a converter with the given settings.
    pub fn new(settings: Xml2JsonSettings) -> Self {
        Xml2Json { settings }
    }

    /// Whether XML comments are translated into comment-key fields.
    pub fn with_translate_comments(mut self, translate: bool) -> Self {
        self.settings.translate_comments = translate;
        self
    }

    /// Whether attribute names map to object field names as-is (`true`)
    /// or carry a leading `@` marker (`false`).
    pub fn with_simple_attributes(mut self, simple: bool) -> Self {
        self.settings.simple_attributes = simple;
        self
    }

    /// The converter's settings.
    pub fn settings(&self) -> &Xml2JsonSettings {
        &self.settings
    }

    /// Reconstructs a JSON tree from a document tree.
    pub fn to_json(&self, doc: &XmlDocument) -> Result<JsonNode> {
        let ctx = PrefixContext::from_document(doc);

        // The degenerate empty-array document: a root tagged with a list
        // prefix and no content.
        if let Some(prefix) = &doc.root.name.prefix {
            if ctx.is_list(prefix)
                && doc.root.children.is_empty()
                && doc.root.attributes.is_empty()
            {
                return Ok(JsonNode::Array(Vec::new()));
            }
        }

        self.element_to_node(&doc.root, &ctx)
    }

    /// Parses an XML string and reconstructs a JSON tree.
    pub fn to_json_str(&self, xml: &str) -> Result<JsonNode> {
        let doc = XmlDocument::parse_str(xml)?;
        self.to_json(&doc)
    }

    /// Reconstructs a JSON tree and renders it as a `serde_json::Value`.
    pub fn to_json_value(&self, doc: &XmlDocument) -> Result<serde_json::Value> {
        Ok(serde_json::Value::from(&self.to_json(doc)?))
    }

    fn element_to_node(&self, element: &XmlElement, ctx: &PrefixContext) -> Result<JsonNode> {
        let text = element.text();
        let has_text = !utils::is_whitespace(&text);
        let element_type = element
            .name
            .prefix
            .as_deref()
            .and_then(|p| ctx.type_of(p));

        // A leaf with a type tag is a scalar; an untyped leaf with text is
        // plain text (the loose-mode form).
        if element.attributes.is_empty() && !element.has_child_elements() {
            if let Some(ty) = element_type {
                return self.parse_scalar(ty, &text);
            }
            if has_text {
                return Ok(JsonNode::Text(text));
            }
            return Ok(JsonNode::Object(Vec::new()));
        }

        // An element whose content is exclusively item elements is an
        // array wrapper.
        if element.attributes.is_empty() && !has_text && self.is_item_only(element) {
            let mut items = Vec::new();
            for child in element.child_elements() {
                items.push(self.element_to_node(child, ctx)?);
            }
            return Ok(JsonNode::Array(items));
        }

        let mut fields: Vec<(String, JsonNode)> = Vec::new();

        for attr in &element.attributes {
            let value = match attr.name.prefix.as_deref().and_then(|p| ctx.type_of(p)) {
                Some(ty) => self.parse_scalar(ty, &attr.value)?,
                None => JsonNode::Text(attr.value.clone()),
            };
            let key = if self.settings.simple_attributes {
                attr.name.local.clone()
            } else {
                format!("@{}", attr.name.local)
            };
            insert_field(&mut fields, key, value);
        }

        if has_text {
            let value = match element_type {
                Some(ty) => self.parse_scalar(ty, &text)?,
                None => JsonNode::Text(text),
            };
            insert_field(&mut fields, self.settings.text_key.clone(), value);
        }

        for child in &element.children {
            match child {
                XmlContent::Element(child) => {
                    let value = self.element_to_node(child, ctx)?;
                    insert_field(&mut fields, child.name.local.clone(), value);
                }
                XmlContent::Comment(comment) if self.settings.translate_comments => {
                    insert_field(
                        &mut fields,
                        self.settings.comment_key.clone(),
                        JsonNode::Text(comment.clone()),
                    );
                }
                _ => {}
            }
        }

        Ok(JsonNode::Object(fields))
    }

    fn is_item_only(&self, element: &XmlElement) -> bool {
        element
            .child_elements()
            .all(|c| c.name.local == self.settings.primitive_array_item)
    }

    fn parse_scalar(&self, ty: JsonPrimitiveType, text: &str) -> Result<JsonNode> {
        match ty {
            JsonPrimitiveType::Null => Ok(JsonNode::Null),
            JsonPrimitiveType::Boolean => text
                .trim()
                .parse::<bool>()
                .map(JsonNode::Bool)
                .map_err(|_| ConvertError::Custom(format!("invalid boolean value {:?}", text))),
            JsonPrimitiveType::Int => text
                .trim()
                .parse::<i128>()
                .map(JsonNode::Int)
                .map_err(|_| ConvertError::Custom(format!("invalid integer value {:?}", text))),
            JsonPrimitiveType::Float => text
                .trim()
                .parse::<f64>()
                .map(JsonNode::Float)
                .map_err(|_| ConvertError::Custom(format!("invalid decimal value {:?}", text))),
            JsonPrimitiveType::Text => Ok(JsonNode::Text(text.to_string())),
            JsonPrimitiveType::Binary => Ok(JsonNode::Binary(BASE64.decode(text.trim())?)),
        }
    }
}

/// Inserts a field, folding repeated sibling keys into an array.
fn insert_field(fields: &mut Vec<(String, JsonNode)>, key: String, value: JsonNode) {
    if let Some((_, existing)) = fields.iter_mut().find(|(k, _)| *k == key) {
        if let JsonNode::Array(items) = existing {
            items.push(value);
        } else {
            let previous = std::mem::replace(existing, JsonNode::Missing);
            *existing = JsonNode::Array(vec![previous, value]);
        }
    } else {
        fields.push((key, value));
    }
}
