/// Error types for JSON/XML conversion.
#[derive(Debug)]
pub enum ConvertError {
    /// JSON parsing or serialization error
    Json(serde_json::Error),

    /// XML parsing or writing error
    Xml(quick_xml::Error),

    /// IO error while reading or writing a document
    Io(std::io::Error),

    /// Base64 decoding error for a binary-typed value
    Base64(base64::DecodeError),

    /// A node reported a kind inconsistent with its dispatch branch.
    /// Signals a contract violation by the caller, not a recoverable error.
    Structural(String),

    /// Custom error message
    Custom(String),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Json(e) => write!(f, "JSON error: {}", e),
            ConvertError::Xml(e) => write!(f, "XML error: {}", e),
            ConvertError::Io(e) => write!(f, "IO error: {}", e),
            ConvertError::Base64(e) => write!(f, "base64 error: {}", e),
            ConvertError::Structural(msg) => write!(f, "structural error: {}", msg),
            ConvertError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Json(e) => Some(e),
            ConvertError::Xml(e) => Some(e),
            ConvertError::Io(e) => Some(e),
            ConvertError::Base64(e) => Some(e),
            ConvertError::Structural(_) | ConvertError::Custom(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Json(err)
    }
}

impl From<quick_xml::Error> for ConvertError {
    fn from(err: quick_xml::Error) -> Self {
        ConvertError::Xml(err)
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err)
    }
}

impl From<base64::DecodeError> for ConvertError {
    fn from(err: base64::DecodeError) -> Self {
        ConvertError::Base64(err)
    }
}

impl From<String> for ConvertError {
    fn from(msg: String) -> Self {
        ConvertError::Custom(msg)
    }
}

impl From<&str> for ConvertError {
    fn from(msg: &str) -> Self {
        ConvertError::Custom(msg.to_string())
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
