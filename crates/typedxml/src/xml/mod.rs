//! XML side of the conversion pipeline.
//!
//! The two converters in this module compose a round-trip pipeline:
//! [`Json2Xml`] walks a [`JsonNode`](crate::JsonNode) tree and builds an
//! [`XmlDocument`], tagging every scalar-bearing element and attribute
//! with a type-identifying namespace prefix; [`Xml2Json`] reads such a
//! document (or externally authored XML following the same convention)
//! and reconstructs the typed JSON tree.
//!
//! ## Disambiguation scheme
//!
//! JSON structure maps onto XML as follows:
//!
//! - An **object** becomes an element: scalar fields become namespaced
//!   attributes, except a field named by the configured text key (default
//!   `#text`), whose value becomes the element's own text content with the
//!   type prefix moved onto the element tag.
//! - A **keyed array** either collapses under a single wrapper element
//!   named after the field (when every item is an object with the same
//!   attribute shape as its first sibling) or forks into one element per
//!   item. The shape comparison is deliberately order-sensitive.
//! - A **bare array** (document root or nested array item) emits typed
//!   `item` elements for scalars and wrapped `item` elements for
//!   compounds.
//! - An **empty array at the document root** produces a degenerate
//!   document: a root tagged with the array prefix and no children.
//!
//! Only the type prefixes actually used in the document are declared as
//! `xmlns:` bindings on the root. With loose-type mode all tagging is
//! dropped and scalars survive only as text.

pub mod de;
pub mod ser;
pub mod tree;
mod utils;

pub use de::Xml2Json;
pub use ser::{Json2Xml, to_xml_string};
pub use tree::{XmlAttribute, XmlContent, XmlDocument, XmlElement, XmlName};
