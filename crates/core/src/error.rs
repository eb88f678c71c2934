//! Client error types

use thiserror::Error;

/// Fallback message when a failed response carries no `error` field
pub const GENERIC_REQUEST_FAILURE: &str = "Request failed";

/// Standard result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the session client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The transport failed before any response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived with a non-success status
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Malformed JSON, an unparsable date, or a typed result mismatch
    #[error("Parse error: {0}")]
    Parse(String),

    /// The browser storage API rejected the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a request error from a status code and message
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Build the request error for a failed response body.
    ///
    /// The message is the body's `error` field when it is present and
    /// non-empty, otherwise [`GENERIC_REQUEST_FAILURE`].
    pub fn from_response_body(status: u16, body: &serde_json::Value) -> Self {
        let message = match body.get("error") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(value) if is_truthy(value) => value.to_string(),
            _ => GENERIC_REQUEST_FAILURE.to_string(),
        };
        Self::request(status, message)
    }

    /// HTTP status of a request error, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short name of the error kind, used as the JS error name
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "NetworkError",
            Self::Request { .. } => "RequestError",
            Self::Parse(_) => "ParseError",
            Self::Storage(_) => "StorageError",
            Self::Configuration(_) => "ConfigurationError",
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}
