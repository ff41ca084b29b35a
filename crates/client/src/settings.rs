//! Account settings: secret key and API base URLs.
//!
//! The secret key is redacted in Debug output.

use crate::error::{Error, ErrorKind, Result};

/// Sandbox payments API base URL.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.checkout.com/api2/v2/";

/// Live payments API base URL.
pub const LIVE_BASE_URL: &str = "https://api2.checkout.com/v2/";

/// Target environment of the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    /// Default payments base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Live => LIVE_BASE_URL,
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "test" => Ok(Environment::Sandbox),
            "live" | "production" => Ok(Environment::Live),
            other => Err(Error::new(ErrorKind::Config(format!(
                "Unknown environment '{}', expected 'sandbox' or 'live'",
                other
            )))),
        }
    }
}

/// Per-account settings used to reach the remote API.
#[derive(Clone)]
pub struct ApiSettings {
    secret_key: String,
    environment: Environment,
    base_url: String,
    basket_base_url: String,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("secret_key", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("basket_base_url", &self.basket_base_url)
            .finish()
    }
}

impl ApiSettings {
    /// Create settings for the given secret key against the sandbox.
    ///
    /// Baskets are served from the payments base URL unless overridden.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::for_environment(secret_key, Environment::Sandbox)
    }

    /// Create settings for the given secret key and environment.
    pub fn for_environment(secret_key: impl Into<String>, environment: Environment) -> Self {
        let base_url = normalize_base_url(environment.base_url());
        Self {
            secret_key: secret_key.into(),
            environment,
            basket_base_url: base_url.clone(),
            base_url,
        }
    }

    /// Override the payments base URL (also used for baskets unless set separately).
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        let previous = std::mem::take(&mut self.base_url);
        self.base_url = normalize_base_url(base_url.as_ref());
        if self.basket_base_url == previous {
            self.basket_base_url = self.base_url.clone();
        }
        self
    }

    /// Override the basket base URL.
    pub fn with_basket_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.basket_base_url = normalize_base_url(base_url.as_ref());
        self
    }

    /// Load settings from environment variables.
    ///
    /// Required:
    /// - `CHECKOUT_SECRET_KEY`
    ///
    /// Optional:
    /// - `CHECKOUT_ENVIRONMENT` (`sandbox` or `live`, default: sandbox)
    /// - `CHECKOUT_BASE_URL`
    /// - `CHECKOUT_BASKET_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret_key = lookup("CHECKOUT_SECRET_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("CHECKOUT_SECRET_KEY".to_string())))?;

        let environment = match lookup("CHECKOUT_ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let mut settings = Self::for_environment(secret_key, environment);
        if let Some(url) = lookup("CHECKOUT_BASE_URL") {
            settings = settings.with_base_url(url);
        }
        if let Some(url) = lookup("CHECKOUT_BASKET_BASE_URL") {
            settings = settings.with_basket_base_url(url);
        }

        Ok(settings)
    }

    /// Get the secret key.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Get the environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Get the payments base URL (always ends with `/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the basket base URL (always ends with `/`).
    pub fn basket_base_url(&self) -> &str {
        &self.basket_base_url
    }

    /// Returns true if the settings can authenticate a request.
    pub fn is_valid(&self) -> bool {
        !self.secret_key.is_empty() && !self.base_url.is_empty()
    }
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}
