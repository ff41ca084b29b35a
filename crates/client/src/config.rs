//! Transport configuration.

use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Which response statuses count as success when dispatching a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// Only `200 OK` decodes into the success model.
    #[default]
    OkOnly,
    /// Any `2xx` status decodes into the success model.
    AnySuccess,
}

impl SuccessPolicy {
    /// Returns true if `status` decodes into the success model under this policy.
    pub fn is_success(&self, status: u16) -> bool {
        match self {
            SuccessPolicy::OkOnly => status == 200,
            SuccessPolicy::AnySuccess => (200..300).contains(&status),
        }
    }
}

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Largest response body accepted, in bytes.
    pub max_response_buffer_size: usize,
    /// User-Agent header value.
    pub user_agent: String,
    /// Value for the `Accept` and `Content-Type` headers.
    pub content_type: String,
    /// Accept gzip-compressed responses.
    pub accept_compressed: bool,
    /// Log request lines, payloads and response bodies at debug level.
    pub debug_mode: bool,
    /// Status classification used by response dispatch.
    pub success_policy: SuccessPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_response_buffer_size: 10 * 1024 * 1024,
            user_agent: crate::USER_AGENT.to_string(),
            content_type: crate::DEFAULT_CONTENT_TYPE.to_string(),
            accept_compressed: true,
            debug_mode: false,
            success_policy: SuccessPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a configuration from defaults overlaid with environment variables.
    ///
    /// Recognised variables:
    /// - `CHECKOUT_REQUEST_TIMEOUT` (seconds)
    /// - `CHECKOUT_MAX_RESPONSE_BUFFER_SIZE` (bytes)
    /// - `CHECKOUT_USER_AGENT`
    /// - `CHECKOUT_DEBUG_MODE` (`true`/`false`/`1`/`0`)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("CHECKOUT_REQUEST_TIMEOUT") {
            config.timeout = parse_timeout(&value)?;
        }
        if let Ok(value) = std::env::var("CHECKOUT_MAX_RESPONSE_BUFFER_SIZE") {
            config.max_response_buffer_size =
                parse_env("CHECKOUT_MAX_RESPONSE_BUFFER_SIZE", &value)?;
        }
        if let Ok(value) = std::env::var("CHECKOUT_USER_AGENT") {
            config.user_agent = value;
        }
        if let Ok(value) = std::env::var("CHECKOUT_DEBUG_MODE") {
            config.debug_mode = parse_flag(&value).ok_or_else(|| {
                Error::new(ErrorKind::Config(format!(
                    "CHECKOUT_DEBUG_MODE must be a boolean, got '{}'",
                    value
                )))
            })?;
        }

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::new(ErrorKind::Config(format!(
            "{} has an invalid value '{}'",
            name, value
        )))
    })
}

/// A zero timeout would fail every request, so it is rejected.
fn parse_timeout(value: &str) -> Result<Duration> {
    match parse_env::<u64>("CHECKOUT_REQUEST_TIMEOUT", value)? {
        0 => Err(Error::new(ErrorKind::Config(
            "CHECKOUT_REQUEST_TIMEOUT must be greater than zero".to_string(),
        ))),
        secs => Ok(Duration::from_secs(secs)),
    }
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the largest response body accepted.
    pub fn with_max_response_buffer_size(mut self, bytes: usize) -> Self {
        self.config.max_response_buffer_size = bytes;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the content type used for `Accept` and request bodies.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.config.content_type = content_type.into();
        self
    }

    /// Accept or refuse compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Enable or disable debug logging of requests and responses.
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.config.debug_mode = enabled;
        self
    }

    /// Set which statuses decode into the success model.
    pub fn with_success_policy(mut self, policy: SuccessPolicy) -> Self {
        self.config.success_policy = policy;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
