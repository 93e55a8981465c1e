//! The closed primitive type taxonomy used to disambiguate JSON scalar
//! kinds once they are represented as untyped XML text.
//!
//! Each taxonomy member carries a fixed default namespace URI. The prefix
//! *name* bound to that URI is configurable through
//! [`Json2XmlSettings`](crate::Json2XmlSettings); the URIs themselves are
//! compiled in and shared by both conversion directions.

/// Namespace bound to the configured array prefix on a degenerate
/// empty-array document root.
pub const LIST_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema/list";

/// Namespace for text-typed values.
pub const STRING_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema/string";

/// Namespace for null-typed values.
pub const NULL_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Namespace for integral numbers.
pub const INTEGER_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema/integer";

/// Namespace for floating point numbers.
pub const DECIMAL_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema/decimal";

/// Namespace for booleans.
pub const BOOLEAN_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema/boolean";

/// Namespace for base64-encoded binary values.
pub const BINARY_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema/binary";

/// The JSON scalar kinds that can appear in a converted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonPrimitiveType {
    /// JSON `null`
    Null,
    /// JSON `true`/`false`
    Boolean,
    /// Integral number
    Int,
    /// Floating point number
    Float,
    /// Text
    Text,
    /// Binary payload, serialized as base64 text
    Binary,
}

impl JsonPrimitiveType {
    /// All taxonomy members, in the order namespace declarations are
    /// emitted on the root element.
    pub const ALL: [JsonPrimitiveType; 6] = [
        JsonPrimitiveType::Null,
        JsonPrimitiveType::Boolean,
        JsonPrimitiveType::Int,
        JsonPrimitiveType::Float,
        JsonPrimitiveType::Text,
        JsonPrimitiveType::Binary,
    ];

    /// The fixed namespace URI identifying this type.
    pub fn default_namespace(self) -> &'static str {
        match self {
            JsonPrimitiveType::Null => NULL_NAMESPACE,
            JsonPrimitiveType::Boolean => BOOLEAN_NAMESPACE,
            JsonPrimitiveType::Int => INTEGER_NAMESPACE,
            JsonPrimitiveType::Float => DECIMAL_NAMESPACE,
            JsonPrimitiveType::Text => STRING_NAMESPACE,
            JsonPrimitiveType::Binary => BINARY_NAMESPACE,
        }
    }

    /// Resolves a namespace URI back to its taxonomy member.
    pub fn from_namespace(uri: &str) -> Option<Self> {
        match uri {
            NULL_NAMESPACE => Some(JsonPrimitiveType::Null),
            BOOLEAN_NAMESPACE => Some(JsonPrimitiveType::Boolean),
            INTEGER_NAMESPACE => Some(JsonPrimitiveType::Int),
            DECIMAL_NAMESPACE => Some(JsonPrimitiveType::Float),
            STRING_NAMESPACE => Some(JsonPrimitiveType::Text),
            BINARY_NAMESPACE => Some(JsonPrimitiveType::Binary),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            JsonPrimitiveType::Null => 1 << 0,
            JsonPrimitiveType::Boolean => 1 << 1,
            JsonPrimitiveType::Int => 1 << 2,
            JsonPrimitiveType::Float => 1 << 3,
            JsonPrimitiveType::Text => 1 << 4,
            JsonPrimitiveType::Binary => 1 << 5,
        }
    }
}

/// Accumulator for the primitive types actually emitted during a single
/// conversion. Threaded by reference through the whole recursive walk so
/// the root-level namespace reconciliation sees every type used anywhere
/// in the tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TypeSet(u8);

impl TypeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        TypeSet(0)
    }

    /// Records a type as used.
    pub fn insert(&mut self, ty: JsonPrimitiveType) {
        self.0 |= ty.bit();
    }

    /// Whether the type has been recorded.
    pub fn contains(self, ty: JsonPrimitiveType) -> bool {
        self.0 & ty.bit() != 0
    }

    /// Whether no type has been recorded.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates recorded members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = JsonPrimitiveType> {
        JsonPrimitiveType::ALL
            .into_iter()
            .filter(move |ty| self.contains(*ty))
    }
}
