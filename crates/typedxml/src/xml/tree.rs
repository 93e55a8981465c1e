//! Owned XML document model built incrementally by the converter.
//!
//! The model keeps exactly what the mapping needs: namespace-qualified
//! tags, ordered attributes, ordered children and the namespace-prefix
//! bindings declared on the root. Serialization and parsing go through
//! `quick_xml` events.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{ConvertError, Result};

/// A possibly prefix-qualified XML name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlName {
    /// Namespace prefix, `None` for unqualified names.
    pub prefix: Option<String>,
    /// Local part of the name.
    pub local: String,
}

impl XmlName {
    /// An unqualified name.
    pub fn local(name: impl Into<String>) -> Self {
        XmlName {
            prefix: None,
            local: name.into(),
        }
    }

    /// A prefix-qualified name. An empty prefix yields an unqualified name.
    pub fn prefixed(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        let prefix = prefix.into();
        XmlName {
            prefix: (!prefix.is_empty()).then_some(prefix),
            local: name.into(),
        }
    }

    /// Splits a raw `prefix:local` tag name.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                XmlName::prefixed(prefix, local)
            }
            _ => XmlName::local(raw),
        }
    }

    /// The serialized `prefix:local` form.
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute with a possibly qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: XmlName,
    pub value: String,
}

/// Ordered element content.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlContent {
    Element(XmlElement),
    Text(String),
    Comment(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: XmlName,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlContent>,
}

impl XmlElement {
    /// Creates an empty element.
    pub fn new(name: XmlName) -> Self {
        XmlElement {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an existing one with the same
    /// qualified name.
    pub fn set_attribute(&mut self, name: XmlName, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.name == name) {
            existing.value = value;
        } else {
            self.attributes.push(XmlAttribute { name, value });
        }
    }

    /// Appends a child element.
    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlContent::Element(element));
    }

    /// Appends a text child.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlContent::Text(text.into()));
    }

    /// Concatenated text content of the direct children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let XmlContent::Text(t) = child {
                out.push_str(t);
            }
        }
        out
    }

    /// Iterates the direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlContent::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Whether the element has any child elements.
    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }
}

/// An XML document: a root element plus the namespace bindings declared
/// on it.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElement,
    /// Default (unprefixed) namespace of the document, if configured.
    pub default_namespace: Option<String>,
    /// `xmlns:` prefix bindings declared on the root, in declaration order.
    pub bindings: Vec<(String, String)>,
}

impl XmlDocument {
    /// Looks up the namespace URI bound to a prefix.
    pub fn namespace_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Serializes the document compactly, without an XML declaration.
    pub fn to_xml(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ConvertError::Custom(e.to_string()))
    }

    /// Serializes the document with two-space indentation.
    pub fn to_xml_pretty(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);
        self.write_events(&mut writer)?;
        String::from_utf8(buffer).map_err(|e| ConvertError::Custom(e.to_string()))
    }

    /// Writes the document to an arbitrary writer.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::new(writer);
        self.write_events(&mut writer)
    }

    fn write_events<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let qualified = self.root.name.qualified();
        let mut start = BytesStart::new(qualified.clone());
        if let Some(ns) = &self.default_namespace {
            start.push_attribute(("xmlns", ns.as_str()));
        }
        for (prefix, uri) in &self.bindings {
            let name = format!("xmlns:{}", prefix);
            start.push_attribute((name.as_str(), uri.as_str()));
        }
        push_attributes(&mut start, &self.root);

        if self.root.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            write_children(writer, &self.root)?;
            writer.write_event(Event::End(BytesEnd::new(qualified)))?;
        }
        Ok(())
    }

    /// Parses an XML string into a document tree.
    ///
    /// Namespace declarations found anywhere in the input are hoisted to
    /// the document's binding table; documents produced by this crate only
    /// ever declare them on the root.
    pub fn parse_str(xml: &str) -> Result<XmlDocument> {
        let mut reader = Reader::from_str(xml);

        let mut default_namespace = None;
        let mut bindings = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let element =
                        element_from_start(&start, &mut default_namespace, &mut bindings)?;
                    stack.push(element);
                }
                Ok(Event::Empty(start)) => {
                    let element =
                        element_from_start(&start, &mut default_namespace, &mut bindings)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ConvertError::Custom("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text
                        .xml_content()
                        .map_err(|e| ConvertError::Custom(format!("XML text error: {}", e)))?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::CData(data)) => {
                    append_text(&mut stack, &String::from_utf8_lossy(data.as_ref()));
                }
                // Entity and character references arrive as their own
                // events, not inside the surrounding text.
                Ok(Event::GeneralRef(reference)) => {
                    let resolved = resolve_reference(&reference)?;
                    append_text(&mut stack, &resolved);
                }
                Ok(Event::Comment(comment)) => {
                    let text = String::from_utf8_lossy(comment.as_ref()).into_owned();
                    if let Some(top) = stack.last_mut() {
                        top.children.push(XmlContent::Comment(text));
                    }
                }
                Ok(Event::Eof) => break,
                // Declarations, processing instructions, doctypes
                Ok(_) => {}
                Err(e) => {
                    return Err(ConvertError::Custom(format!("XML parse error: {}", e)));
                }
            }
        }

        let root =
            root.ok_or_else(|| ConvertError::Custom("document has no root element".to_string()))?;
        Ok(XmlDocument {
            root,
            default_namespace,
            bindings,
        })
    }
}

fn push_attributes(start: &mut BytesStart<'_>, element: &XmlElement) {
    for attr in &element.attributes {
        let name = attr.name.qualified();
        start.push_attribute((name.as_str(), attr.value.as_str()));
    }
}

fn write_children<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    for child in &element.children {
        match child {
            XmlContent::Element(e) => write_element(writer, e)?,
            XmlContent::Text(t) => {
                writer.write_event(Event::Text(BytesText::new(t)))?;
            }
            XmlContent::Comment(t) => {
                writer.write_event(Event::Comment(BytesText::new(t)))?;
            }
        }
    }
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let qualified = element.name.qualified();
    let mut start = BytesStart::new(qualified.clone());
    push_attributes(&mut start, element);

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        write_children(writer, element)?;
        writer.write_event(Event::End(BytesEnd::new(qualified)))?;
    }
    Ok(())
}

fn element_from_start(
    start: &BytesStart<'_>,
    default_namespace: &mut Option<String>,
    bindings: &mut Vec<(String, String)>,
) -> Result<XmlElement> {
    let raw_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(XmlName::parse(&raw_name));

    for attr in start.attributes() {
        let attr = attr.map_err(|e| ConvertError::Custom(format!("XML attribute error: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ConvertError::Custom(format!("XML attribute error: {}", e)))?
            .into_owned();

        if key == "xmlns" {
            *default_namespace = Some(value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            bindings.push((prefix.to_string(), value));
        } else {
            element.attributes.push(XmlAttribute {
                name: XmlName::parse(&key),
                value,
            });
        }
    }
    Ok(element)
}

/// Appends text to the innermost open element, merging with a preceding
/// text child so resolved references do not fragment the content.
fn append_text(stack: &mut Vec<XmlElement>, text: &str) {
    if let Some(top) = stack.last_mut() {
        if let Some(XmlContent::Text(existing)) = top.children.last_mut() {
            existing.push_str(text);
        } else {
            top.push_text(text);
        }
    }
}

/// Resolves a character or predefined entity reference to its text form.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| ConvertError::Custom(format!("XML reference error: {}", e)))?
    {
        return Ok(ch.to_string());
    }
    let name = reference
        .decode()
        .map_err(|e| ConvertError::Custom(format!("XML reference error: {}", e)))?;
    let text = match name.as_ref() {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        other => {
            return Err(ConvertError::Custom(format!(
                "unresolvable entity reference &{};",
                other
            )));
        }
    };
    Ok(text.to_string())
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_element(element);
        Ok(())
    } else if root.is_some() {
        Err(ConvertError::Custom(
            "document has more than one root element".to_string(),
        ))
    } else {
        *root = Some(element);
        Ok(())
    }
}
