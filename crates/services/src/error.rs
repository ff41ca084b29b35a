//! Error types for checkout-api-services.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The transport error this wraps, if any.
    pub fn client_error(&self) -> Option<&checkout_api_client::Error> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<checkout_api_client::Error>())
    }

    /// Returns true if the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        self.client_error().is_some_and(|err| err.is_transport())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    #[error("{0}")]
    Other(String),
}

impl From<checkout_api_client::Error> for Error {
    fn from(err: checkout_api_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
