//! High-level client binding account settings to the HTTP transport.
//!
//! `CheckoutClient` resolves endpoint paths against the configured base URLs
//! and attaches the secret key, so resource services only supply a path and
//! an optional payload.
//!
//! ## Security
//!
//! - The secret key is redacted in Debug output
//! - Payloads and keys are skipped in tracing spans

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::client::ApiHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::RequestMethod;
use crate::response::HttpResponse;
use crate::settings::ApiSettings;

/// Checkout API client.
///
/// # Example
///
/// ```rust,ignore
/// use checkout_api_client::{ApiSettings, CheckoutClient, OkResponse};
///
/// let client = CheckoutClient::new(ApiSettings::new("sk_test_..."))?;
///
/// let url = client.payments_url("customers/cust_123");
/// let response: HttpResponse<OkResponse> = client.delete(&url).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: ApiHttpClient,
    settings: ApiSettings,
}

impl CheckoutClient {
    /// Create a new client with default transport configuration.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        Self::with_config(settings, ClientConfig::default())
    }

    /// Create a new client with custom transport configuration.
    pub fn with_config(settings: ApiSettings, config: ClientConfig) -> Result<Self> {
        let http = ApiHttpClient::new(config)?;
        Ok(Self::from_parts(settings, http))
    }

    /// Create a client from settings and an existing transport.
    pub fn from_parts(settings: ApiSettings, http: ApiHttpClient) -> Self {
        Self { http, settings }
    }

    /// Create a client from `CHECKOUT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ApiSettings::from_env()?, ClientConfig::from_env()?)
    }

    /// Get the account settings.
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Get the underlying transport.
    pub fn http(&self) -> &ApiHttpClient {
        &self.http
    }

    /// Build a payments API URL for a path.
    ///
    /// Example: `payments_url("customers")` -> `https://sandbox.checkout.com/api2/v2/customers`
    pub fn payments_url(&self, path: &str) -> String {
        join_url(self.settings.base_url(), path)
    }

    /// Build a basket API URL for a path.
    pub fn basket_url(&self, path: &str) -> String {
        join_url(self.settings.basket_base_url(), path)
    }

    /// GET with the configured secret key.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<HttpResponse<T>> {
        self.http
            .get_request(url, self.settings.secret_key())
            .await
    }

    /// GET with query parameters appended to `url`.
    #[instrument(skip(self, params))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<HttpResponse<T>> {
        let request = params.iter().fold(
            self.http
                .request(RequestMethod::Get, url)
                .authorization(self.settings.secret_key()),
            |request, (name, value)| request.query(*name, value.as_str()),
        );
        self.http.execute(request).await
    }

    /// POST with the configured secret key and an optional JSON payload.
    #[instrument(skip(self, payload))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        payload: Option<&B>,
    ) -> Result<HttpResponse<T>> {
        self.http
            .post_request(url, self.settings.secret_key(), payload)
            .await
    }

    /// PUT with the configured secret key and an optional JSON payload.
    #[instrument(skip(self, payload))]
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        payload: Option<&B>,
    ) -> Result<HttpResponse<T>> {
        self.http
            .put_request(url, self.settings.secret_key(), payload)
            .await
    }

    /// DELETE with the configured secret key.
    #[instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<HttpResponse<T>> {
        self.http
            .delete_request(url, self.settings.secret_key())
            .await
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}{}", base, path.trim_start_matches('/'))
    }
}
