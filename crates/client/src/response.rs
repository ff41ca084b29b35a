//! Response dispatch: success model vs. decoded error body.

use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SuccessPolicy;
use crate::error::{Error, ErrorKind, Result};

/// Body of an API response, tagged by outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody<T> {
    /// Success status with a decoded payload.
    Model(T),
    /// Non-success status with a decoded error body.
    Error(ResponseError),
    /// The response carried no body.
    Empty,
}

/// Result of one API call: the status code plus the tagged body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse<T> {
    status: u16,
    body: ResponseBody<T>,
}

impl<T> HttpResponse<T> {
    /// Create a response from its parts.
    pub fn new(status: u16, body: ResponseBody<T>) -> Self {
        Self { status, body }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the tagged body.
    pub fn body(&self) -> &ResponseBody<T> {
        &self.body
    }

    /// Take the tagged body.
    pub fn into_body(self) -> ResponseBody<T> {
        self.body
    }

    /// Returns true if the body decoded into the success model.
    pub fn is_success(&self) -> bool {
        matches!(self.body, ResponseBody::Model(_))
    }

    /// Returns true if the response had no body.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, ResponseBody::Empty)
    }

    /// The success model, if any.
    pub fn model(&self) -> Option<&T> {
        match &self.body {
            ResponseBody::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Take the success model, if any.
    pub fn into_model(self) -> Option<T> {
        match self.body {
            ResponseBody::Model(model) => Some(model),
            _ => None,
        }
    }

    /// The decoded error body, if any.
    pub fn error(&self) -> Option<&ResponseError> {
        match &self.body {
            ResponseBody::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Convert into a `Result`, turning error bodies into [`ErrorKind::Api`].
    pub fn into_result(self) -> Result<T> {
        match self.body {
            ResponseBody::Model(model) => Ok(model),
            ResponseBody::Error(error) => Err(Error::new(ErrorKind::Api {
                status: self.status,
                error_code: error.error_code.clone(),
                message: sanitize_error_message(&error.summary()),
            })),
            ResponseBody::Empty => Err(Error::new(ErrorKind::Api {
                status: self.status,
                error_code: None,
                message: "response had no body".to_string(),
            })),
        }
    }

    /// Map the success model, keeping the status and any error body.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> HttpResponse<U> {
        let body = match self.body {
            ResponseBody::Model(model) => ResponseBody::Model(f(model)),
            ResponseBody::Error(error) => ResponseBody::Error(error),
            ResponseBody::Empty => ResponseBody::Empty,
        };
        HttpResponse {
            status: self.status,
            body,
        }
    }
}

impl<T: DeserializeOwned> HttpResponse<T> {
    /// Classify a raw status/body pair.
    ///
    /// - empty body: [`ResponseBody::Empty`]
    /// - success status (per `policy`): body decoded into `T`
    /// - anything else: body decoded into [`ResponseError`]
    pub fn from_parts(status: u16, body: &[u8], policy: SuccessPolicy) -> Result<Self> {
        let body = if body.iter().all(u8::is_ascii_whitespace) {
            ResponseBody::Empty
        } else if policy.is_success(status) {
            ResponseBody::Model(serde_json::from_slice(body)?)
        } else {
            ResponseBody::Error(ResponseError::from_body(body))
        };

        Ok(Self { status, body })
    }
}

/// Error body returned by the remote API.
///
/// Known fields are typed; any other keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_message_codes: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ResponseError {
    /// Create an error body with a code and message.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: Some(error_code.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Decode an error body of arbitrary shape.
    ///
    /// Objects that don't fit the typed fields keep their string-valued
    /// `message`/`errorCode`/`eventId` and everything else in `extra`.
    /// Non-object bodies become a sanitized `message`.
    pub fn from_body(body: &[u8]) -> Self {
        if let Ok(error) = serde_json::from_slice::<ResponseError>(body) {
            return error;
        }

        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(mut map)) => {
                let mut take_str = |key: &str| {
                    let value = map.get(key)?.as_str()?.to_string();
                    map.remove(key);
                    Some(value)
                };
                let event_id = take_str("eventId");
                let error_code = take_str("errorCode");
                let message = take_str("message");
                Self {
                    event_id,
                    error_code,
                    message,
                    extra: map,
                    ..Self::default()
                }
            }
            Ok(serde_json::Value::String(text)) => Self {
                message: Some(sanitize_error_message(&text)),
                ..Self::default()
            },
            _ => Self {
                message: Some(sanitize_error_message(&String::from_utf8_lossy(body))),
                ..Self::default()
            },
        }
    }

    /// One-line description: the message, else the first listed error, else the code.
    pub fn summary(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.errors.first().cloned())
            .or_else(|| self.error_code.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// Acknowledgement body returned by mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub message: String,
}

impl OkResponse {
    /// The canonical `{"message": "Ok"}` body.
    pub fn ok() -> Self {
        Self {
            message: "Ok".to_string(),
        }
    }

    /// Returns true if the message is `Ok`, ignoring case.
    pub fn is_ok(&self) -> bool {
        self.message.eq_ignore_ascii_case("ok")
    }
}

static SECRET_KEY_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"sk_(?:test_|live_)?[A-Za-z0-9\-]+").expect("static pattern")
});

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Secret keys are redacted and messages longer than 500 characters are truncated.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = SECRET_KEY_PATTERN
        .replace_all(message, "sk_[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// JSON keys whose values never appear in logged payloads.
const SENSITIVE_KEYS: &[&str] = &["number", "cvv"];

/// Redact card numbers, CVVs and secret keys from a request payload for logging.
///
/// Bodies that are not JSON only get secret-key redaction.
pub(crate) fn redact_payload(body: &str) -> String {
    let redacted = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(mut value) => {
            redact_value(&mut value);
            value.to_string()
        }
        Err(_) => body.to_string(),
    };
    SECRET_KEY_PATTERN
        .replace_all(&redacted, "sk_[REDACTED]")
        .into_owned()
}

fn redact_value(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SENSITIVE_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)) {
                    *field = serde_json::Value::String("[REDACTED]".to_string());
                } else {
                    redact_value(field);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(redact_value),
        _ => {}
    }
}
