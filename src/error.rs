//! Courier error types

/// Courier error types
#[derive(Debug, thiserror::Error)]
pub enum CourierError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-2xx response from an upstream API.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Domain-specific 404 (e.g. unknown match id).
    #[error("not found: {0}")]
    NotFound(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    // Data errors
    /// Upstream body did not match the expected schema.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("empty response from model")]
    EmptyResponse,

    // Configuration errors
    /// A required credential or setting is missing.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CourierError {
    /// Whether this error originated at (or on the way to) an upstream API.
    ///
    /// `Parse` counts as upstream: a malformed body is the upstream's fault.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            CourierError::Http(_)
                | CourierError::Upstream { .. }
                | CourierError::Parse(_)
                | CourierError::AuthenticationFailed
                | CourierError::EmptyResponse
        )
    }

    /// HTTP status code, when the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CourierError::Upstream { status, .. } => Some(*status),
            CourierError::NotFound(_) => Some(404),
            CourierError::AuthenticationFailed => Some(401),
            _ => None,
        }
    }
}

/// Request URLs are stripped: some carry API keys in the query string.
impl From<reqwest::Error> for CourierError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            CourierError::Parse(err.to_string())
        } else {
            CourierError::Http(err.to_string())
        }
    }
}

/// Result type alias for Courier operations
pub type Result<T> = std::result::Result<T, CourierError>;
