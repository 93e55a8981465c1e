//! # typedxml
//!
//! Bidirectional, type-preserving conversion between JSON trees and XML
//! documents.
//!
//! XML has no native notion of arrays, typed scalars, or repeated unkeyed
//! values, so a JSON document cannot be mapped onto XML without a
//! disambiguation scheme. This crate annotates every scalar-bearing element
//! and attribute with a namespace prefix drawn from a closed primitive type
//! taxonomy, which lets the inverse conversion reconstruct the original
//! scalar kinds.
//!
//! ## JSON ↔ XML Mapping
//!
//! | JSON | XML |
//! |------|-----|
//! | `{"id": 3}` | `<root Int:id="3"/>` |
//! | `{"ok": true}` | `<root Bool:ok="true"/>` |
//! | `{"#text": "hi", "id": 3}` | `<Text:root Int:id="3">hi</Text:root>` |
//! | `[1, 2]` | `<root><Int:item>1</Int:item><Int:item>2</Int:item></root>` |
//! | `{"k": [1, 2]}` | `<root><Int:k>1</Int:k><Int:k>2</Int:k></root>` |
//! | `{"k": {"a": 1}}` | `<root><k Int:a="1"/></root>` |
//! | `[]` | `<Array:root/>` |
//!
//! Each primitive type prefix is bound on the root element to a fixed
//! namespace URI, and only the prefixes actually used somewhere in the
//! document are declared. With loose-type mode enabled no prefixes are
//! emitted at all and every scalar round-trips as plain text.
//!
//! ## Examples
//!
//! ```
//! use typedxml::{Json2Xml, Xml2Json, from_json_str};
//!
//! # fn main() -> typedxml::Result<()> {
//! let node = from_json_str(r#"{"id": 3, "name": "a"}"#)?;
//! let doc = Json2Xml::default().to_xml(&node)?;
//! let xml = doc.to_xml()?;
//! assert!(xml.starts_with("<root"));
//!
//! let back = Xml2Json::default().to_json(&doc)?;
//! assert_eq!(back, node);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod json;
pub mod node;
pub mod settings;
pub mod types;
pub mod xml;

pub use error::{ConvertError, Result};
pub use json::{
    from_json_slice, from_json_str, from_json_value, to_json_string, to_json_string_pretty,
    to_json_value,
};
pub use node::JsonNode;
pub use settings::{Json2XmlSettings, ParentKeyPolicy, Xml2JsonSettings};
pub use types::{JsonPrimitiveType, TypeSet};
pub use xml::{Json2Xml, Xml2Json, XmlDocument, XmlElement, to_xml_string};
