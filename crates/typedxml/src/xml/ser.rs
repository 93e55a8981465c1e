//! JSON to XML conversion.
//!
//! A recursive descent walks the [`JsonNode`] tree and builds an
//! [`XmlDocument`], threading a [`TypeSet`] accumulator through every call
//! so the root declares exactly the primitive-type namespaces the document
//! uses. The converter never mutates its input and holds no state across
//! calls, so a single instance can be reused sequentially.

use crate::error::{ConvertError, Result};
use crate::node::JsonNode;
use crate::settings::{Json2XmlSettings, ParentKeyPolicy};
use crate::types::{LIST_NAMESPACE, TypeSet};
use crate::xml::tree::{XmlDocument, XmlElement, XmlName};
use crate::xml::utils;

/// Converts a JSON tree to an XML string using default settings.
///
/// # Examples
///
/// ```
/// use typedxml::{from_json_str, to_xml_string};
///
/// let node = from_json_str(r#"{"id": 3}"#).unwrap();
/// let xml = to_xml_string(&node).unwrap();
/// assert!(xml.contains(r#"Int:id="3""#));
/// ```
pub fn to_xml_string(node: &JsonNode) -> Result<String> {
    Json2Xml::default().to_xml(node)?.to_xml()
}

/// The JSON to XML converter.
#[derive(Debug, Clone, Default)]
pub struct Json2Xml {
    settings: Json2XmlSettings,
    loose_type_info: bool,
    parent_key_policy: ParentKeyPolicy,
}

impl Json2Xml {
    /// Creates a converter with the given settings.
    pub fn new(settings: Json2XmlSettings) -> Self {
        Json2Xml {
            settings,
            loose_type_info: false,
            parent_key_policy: ParentKeyPolicy::default(),
        }
    }

    /// Drops all type tagging: no prefixed namespaces are declared and
    /// every scalar survives only as text.
    pub fn with_loose_type_info(mut self, loose: bool) -> Self {
        self.loose_type_info = loose;
        self
    }

    /// Selects the traversal rule for array-valued object fields.
    pub fn with_parent_key_policy(mut self, policy: ParentKeyPolicy) -> Self {
        self.parent_key_policy = policy;
        self
    }

    /// The converter's settings.
    pub fn settings(&self) -> &Json2XmlSettings {
        &self.settings
    }

    /// Whether loose-type mode is active.
    pub fn is_loose_type_info(&self) -> bool {
        self.loose_type_info
    }

    /// Converts a JSON tree to an XML document.
    ///
    /// The input is never mutated. A missing sentinel at the root yields
    /// an empty root element; kind/dispatch inconsistencies surface as
    /// [`ConvertError::Structural`].
    pub fn to_xml(&self, node: &JsonNode) -> Result<XmlDocument> {
        let s = &self.settings;

        // Degenerate document for an empty top-level array: the root is
        // tagged with the array prefix and carries no children.
        if let JsonNode::Array(items) = node {
            if items.is_empty() && !self.loose_type_info {
                let root = XmlElement::new(XmlName::prefixed(&s.array_prefix, &s.root_name));
                return Ok(XmlDocument {
                    root,
                    default_namespace: s.namespace.clone(),
                    bindings: vec![(s.array_prefix.clone(), LIST_NAMESPACE.to_string())],
                });
            }
        }

        let mut root = XmlElement::new(XmlName::local(&s.root_name));
        let mut used = TypeSet::new();
        match node {
            JsonNode::Missing => {}
            JsonNode::Object(fields) => self.fill_object(fields, &mut root, &mut used)?,
            JsonNode::Array(items) => self.array_items(items, &mut root, &mut used)?,
            scalar => {
                let item = self.scalar_item(scalar, &mut used)?;
                root.push_element(item);
            }
        }

        // Declare exactly the set of prefixes the walk recorded.
        let bindings = used
            .iter()
            .map(|ty| (s.prefix(ty).to_string(), ty.default_namespace().to_string()))
            .collect();
        Ok(XmlDocument {
            root,
            default_namespace: s.namespace.clone(),
            bindings,
        })
    }

    /// Serializes an object's fields onto `target`: scalars become
    /// attributes, the text-key field becomes the element's own text
    /// content, compounds become child elements.
    fn fill_object(
        &self,
        fields: &[(String, JsonNode)],
        target: &mut XmlElement,
        used: &mut TypeSet,
    ) -> Result<()> {
        for (key, value) in fields {
            match value {
                JsonNode::Missing => {}
                JsonNode::Null
                | JsonNode::Bool(_)
                | JsonNode::Int(_)
                | JsonNode::Float(_)
                | JsonNode::Text(_)
                | JsonNode::Binary(_) => {
                    if key == &self.settings.text_key {
                        self.set_text_content(value, target, used)?;
                    } else {
                        self.add_attribute(key, value, target, used)?;
                    }
                }
                JsonNode::Object(_) | JsonNode::Array(_) if key == &self.settings.text_key => {
                    return Err(ConvertError::Custom(format!(
                        "field {:?} is reserved for element text content and cannot hold an object or array",
                        key
                    )));
                }
                JsonNode::Object(inner) => {
                    let mut child = self.element(key)?;
                    self.fill_object(inner, &mut child, used)?;
                    target.push_element(child);
                }
                JsonNode::Array(items) => {
                    self.keyed_array(key, items, target, used)?;
                }
            }
        }
        Ok(())
    }

    /// Serializes an array that has no originating field key: scalars
    /// become typed item elements directly under `target`, compounds get
    /// a wrapping item element each.
    fn array_items(
        &self,
        items: &[JsonNode],
        target: &mut XmlElement,
        used: &mut TypeSet,
    ) -> Result<()> {
        for child in items {
            match child {
                JsonNode::Missing => {}
                JsonNode::Object(fields) => {
                    let mut wrapper = self.item_element();
                    self.fill_object(fields, &mut wrapper, used)?;
                    target.push_element(wrapper);
                }
                JsonNode::Array(inner) => {
                    let mut wrapper = self.item_element();
                    self.array_items(inner, &mut wrapper, used)?;
                    target.push_element(wrapper);
                }
                scalar => {
                    let item = self.scalar_item(scalar, used)?;
                    target.push_element(item);
                }
            }
        }
        Ok(())
    }

    /// Serializes an array-valued object field.
    ///
    /// Under the default policy, arrays whose items are all objects with
    /// an attribute shape matching their first sibling collapse under a
    /// single wrapper named after the field, with each item nested one
    /// level deeper; any divergence (or a non-object item) forces the
    /// conservative per-item fork so no item's data is lost. The
    /// parent-key policy always forks.
    fn keyed_array(
        &self,
        key: &str,
        items: &[JsonNode],
        target: &mut XmlElement,
        used: &mut TypeSet,
    ) -> Result<()> {
        if items.is_empty() {
            // A nested empty array is still an element with no children.
            target.push_element(self.element(key)?);
            return Ok(());
        }

        let collapse = self.parent_key_policy == ParentKeyPolicy::ItemElements
            && items.iter().all(JsonNode::is_object)
            && !conflict_in_attributes(items);

        if collapse {
            let mut wrapper = self.element(key)?;
            for item in items {
                let JsonNode::Object(fields) = item else {
                    return Err(ConvertError::Structural(format!(
                        "collapse requires object items, got {:?}",
                        item
                    )));
                };
                let mut element = self.item_element();
                self.fill_object(fields, &mut element, used)?;
                wrapper.push_element(element);
            }
            target.push_element(wrapper);
        } else {
            for item in items {
                match item {
                    JsonNode::Missing => {}
                    JsonNode::Object(fields) => {
                        let mut element = self.element(key)?;
                        self.fill_object(fields, &mut element, used)?;
                        target.push_element(element);
                    }
                    JsonNode::Array(inner) => {
                        let mut element = self.element(key)?;
                        self.array_items(inner, &mut element, used)?;
                        target.push_element(element);
                    }
                    scalar => {
                        let mut element = self.element(key)?;
                        self.fix_scalar(scalar, &mut element, used)?;
                        target.push_element(element);
                    }
                }
            }
        }
        Ok(())
    }

    /// A typed item element carrying one scalar value.
    fn scalar_item(&self, node: &JsonNode, used: &mut TypeSet) -> Result<XmlElement> {
        let ty = node.primitive_type().ok_or_else(|| {
            ConvertError::Structural(format!("expected a scalar node, got {:?}", node))
        })?;
        let name = if self.loose_type_info {
            XmlName::local(&self.settings.primitive_array_item)
        } else {
            used.insert(ty);
            XmlName::prefixed(self.settings.prefix(ty), &self.settings.primitive_array_item)
        };
        let mut element = XmlElement::new(name);
        let content = node.value_text();
        if !content.is_empty() {
            element.push_text(content);
        }
        Ok(element)
    }

    /// Writes a scalar as the text content of an existing element,
    /// moving the type prefix onto the element tag.
    fn fix_scalar(
        &self,
        node: &JsonNode,
        element: &mut XmlElement,
        used: &mut TypeSet,
    ) -> Result<()> {
        let ty = node.primitive_type().ok_or_else(|| {
            ConvertError::Structural(format!("expected a scalar node, got {:?}", node))
        })?;
        let content = node.value_text();
        if !content.is_empty() {
            element.push_text(content);
        }
        if !self.loose_type_info {
            used.insert(ty);
            element.name = XmlName::prefixed(self.settings.prefix(ty), &element.name.local);
        }
        Ok(())
    }

    /// The text-key field becomes the element's own text node and the
    /// element tag takes the value's type prefix.
    fn set_text_content(
        &self,
        node: &JsonNode,
        element: &mut XmlElement,
        used: &mut TypeSet,
    ) -> Result<()> {
        self.fix_scalar(node, element, used)
    }

    /// Adds a scalar field as a namespaced attribute. Invalid name
    /// characters are stripped; a field whose name sanitizes away
    /// entirely is skipped.
    fn add_attribute(
        &self,
        key: &str,
        node: &JsonNode,
        element: &mut XmlElement,
        used: &mut TypeSet,
    ) -> Result<()> {
        let ty = node.primitive_type().ok_or_else(|| {
            ConvertError::Structural(format!("expected a scalar node, got {:?}", node))
        })?;
        let name = utils::sanitize_attribute_name(key);
        if name.is_empty() {
            return Ok(());
        }
        let value = node.value_text();
        if self.loose_type_info {
            element.set_attribute(XmlName::local(name), value);
        } else {
            used.insert(ty);
            element.set_attribute(XmlName::prefixed(self.settings.prefix(ty), name), value);
        }
        Ok(())
    }

    /// An element named after a field key.
    fn element(&self, key: &str) -> Result<XmlElement> {
        if !utils::is_valid_element_name(key) {
            return Err(ConvertError::Custom(format!(
                "field key {:?} is not usable as an XML element name",
                key
            )));
        }
        Ok(XmlElement::new(XmlName::local(key)))
    }

    fn item_element(&self) -> XmlElement {
        XmlElement::new(XmlName::local(&self.settings.primitive_array_item))
    }
}

/// Order-sensitive sibling-shape comparison.
///
/// Computes the ordered attribute-eligible field mapping (scalar-valued
/// fields only) of the first sibling and compares every other sibling
/// key-by-key in iteration order. Any mismatch in key name, value, or
/// mapping length declares a conflict, as does a non-object sibling.
/// Semantically equal but reordered shapes deliberately count as a
/// conflict.
fn conflict_in_attributes(items: &[JsonNode]) -> bool {
    let mut iter = items.iter();
    let first = match iter.next() {
        None => return false,
        Some(node) => node,
    };
    let reference = match first {
        JsonNode::Object(fields) => scalar_fields(fields),
        _ => return true,
    };
    for item in iter {
        let JsonNode::Object(fields) = item else {
            return true;
        };
        let candidate = scalar_fields(fields);
        if candidate.len() != reference.len() {
            return true;
        }
        for ((k1, v1), (k2, v2)) in reference.iter().zip(candidate.iter()) {
            if k1 != k2 || v1 != v2 {
                return true;
            }
        }
    }
    false
}

/// The attribute-eligible fields of an object, in field order.
fn scalar_fields(fields: &[(String, JsonNode)]) -> Vec<(&str, &JsonNode)> {
    fields
        .iter()
        .filter(|(_, v)| v.is_value())
        .map(|(k, v)| (k.as_str(), v))
        .collect()
}
