//! Core HTTP transport: one request in, one tagged response out.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use bytes::BytesMut;
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::perf::{PerfRecord, PerfTracker, TracingPerfTracker};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{redact_payload, HttpResponse};

/// HTTP client for the Checkout API.
///
/// Connections are never kept idle between calls, redirects are not
/// followed and no cookie store is attached, so every call starts from a
/// clean transport. Each call emits one [`PerfRecord`].
#[derive(Clone)]
pub struct ApiHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
    default_headers: Arc<RwLock<Vec<(String, String)>>>,
    perf: Arc<dyn PerfTracker>,
}

impl std::fmt::Debug for ApiHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiHttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .gzip(config.accept_compressed)
            .deflate(false)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            config,
            default_headers: Arc::new(RwLock::new(Vec::new())),
            perf: Arc::new(TracingPerfTracker),
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Replace the perf-tracking sink.
    pub fn with_perf_tracker(mut self, tracker: impl PerfTracker + 'static) -> Self {
        self.perf = Arc::new(tracker);
        self
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set a header sent with every request. `None` removes it.
    pub fn set_default_header(&self, name: &str, value: Option<&str>) {
        let mut headers = self
            .default_headers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        if let Some(value) = value {
            headers.push((name.to_string(), value.to_string()));
        }
    }

    /// Get a header previously set with [`set_default_header`](Self::set_default_header).
    pub fn default_header(&self, name: &str) -> Option<String> {
        self.default_headers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    /// Create a request builder for the given method.
    pub fn request(&self, method: RequestMethod, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// GET `url`, authenticating with `authentication_key`.
    pub async fn get_request<T: DeserializeOwned>(
        &self,
        url: &str,
        authentication_key: &str,
    ) -> Result<HttpResponse<T>> {
        let request = self
            .request(RequestMethod::Get, url)
            .authorization(authentication_key);
        self.execute(request).await
    }

    /// POST `payload` as JSON to `url`. `None` sends no body.
    pub async fn post_request<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        authentication_key: &str,
        payload: Option<&B>,
    ) -> Result<HttpResponse<T>> {
        let request = self
            .request(RequestMethod::Post, url)
            .authorization(authentication_key)
            .json_opt(payload)?;
        self.execute(request).await
    }

    /// PUT `payload` as JSON to `url`. `None` sends no body.
    pub async fn put_request<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        authentication_key: &str,
        payload: Option<&B>,
    ) -> Result<HttpResponse<T>> {
        let request = self
            .request(RequestMethod::Put, url)
            .authorization(authentication_key)
            .json_opt(payload)?;
        self.execute(request).await
    }

    /// DELETE `url`, authenticating with `authentication_key`.
    pub async fn delete_request<T: DeserializeOwned>(
        &self,
        url: &str,
        authentication_key: &str,
    ) -> Result<HttpResponse<T>> {
        let request = self
            .request(RequestMethod::Delete, url)
            .authorization(authentication_key);
        self.execute(request).await
    }

    /// Send a request and dispatch the response body.
    ///
    /// Transport failures are returned as `Err` after being recorded; no
    /// retry is attempted.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<HttpResponse<T>> {
        let started_at = Utc::now();
        let timer = Instant::now();

        let result = self.execute_once(&request).await;

        let elapsed_ms = u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX);
        let outcome = match &result {
            Ok(response) => PerfRecord::outcome_for_status(response.status()),
            Err(err) => {
                if self.config.debug_mode {
                    debug!(error = %err, source = ?err.source, "** Exception **");
                }
                PerfRecord::outcome_for_error(err)
            }
        };

        self.perf.record(&PerfRecord {
            thread_id: format!("{:?}", std::thread::current().id()),
            url: request.url.clone(),
            elapsed_ms,
            outcome,
            started_at,
        });

        result
    }

    async fn execute_once<T: DeserializeOwned>(
        &self,
        request: &RequestBuilder,
    ) -> Result<HttpResponse<T>> {
        let url = request.full_url()?;
        let mut req = self.inner.request(request.method.to_reqwest(), url);

        let defaults = self
            .default_headers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for (name, value) in &defaults {
            req = req.header(name.as_str(), value.as_str());
        }

        req = req.header(ACCEPT, self.config.content_type.as_str());

        if let Some(ref key) = request.authorization {
            req = req.header(AUTHORIZATION, key.as_str());
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req
                .header(CONTENT_TYPE, self.config.content_type.as_str())
                .body(body.clone());
        }

        if self.config.debug_mode {
            debug!(method = %request.method, url = %request.url, "** Request **");
            if let Some(ref body) = request.body {
                debug!(payload = %redact_payload(body), "** Payload **");
            }
        }

        let mut response = req.send().await?;
        let status = response.status().as_u16();

        let limit = self.config.max_response_buffer_size;
        if response
            .content_length()
            .is_some_and(|len| len > limit as u64)
        {
            return Err(Error::new(ErrorKind::ResponseTooLarge { limit }));
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(Error::new(ErrorKind::ResponseTooLarge { limit }));
            }
            body.extend_from_slice(&chunk);
        }

        if self.config.debug_mode {
            debug!(
                status,
                body = %String::from_utf8_lossy(&body),
                "** HttpResponse **"
            );
        } else if (200..300).contains(&status) {
            debug!(status, content_length = body.len(), "Response received");
        } else {
            info!(status, content_length = body.len(), "Non-success response");
        }

        HttpResponse::from_parts(status, &body, self.config.success_policy)
    }
}
