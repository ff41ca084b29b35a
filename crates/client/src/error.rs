//! Error types for checkout-api-client.
//!
//! Non-success HTTP statuses are not errors here: they arrive as
//! [`ResponseBody::Error`](crate::ResponseBody::Error). This type covers
//! transport failures, (de)serialization failures and configuration problems.

/// Result type alias for checkout-api-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for checkout-api-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Timeout
                | ErrorKind::Connection(_)
                | ErrorKind::Http(_)
                | ErrorKind::ResponseTooLarge { .. }
        )
    }

    /// Returns true if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Returns the HTTP status if the remote API answered with an error body.
    pub fn api_status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection could not be established or was reset.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failure while sending the request or reading the response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body exceeded the configured buffer size.
    #[error("Response body exceeds the {limit} byte limit")]
    ResponseTooLarge { limit: usize },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Error body returned by the remote API, surfaced via `HttpResponse::into_result`.
    #[error("API error: {status} {message}")]
    Api {
        status: u16,
        error_code: Option<String>,
        message: String,
    },

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Http(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
