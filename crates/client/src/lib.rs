//! # checkout-api-client
//!
//! Core HTTP transport for the Checkout payments API.
//!
//! This crate provides the request/response pipeline every resource service
//! goes through:
//! - JSON request marshalling with `Accept`/`Authorization`/`User-Agent` headers
//! - Gzip-compressed responses, no redirects, no cookies, no pooled connections
//! - Tagged response dispatch (success model vs. decoded error body)
//! - One perf-tracking record per call
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Service Layer                            │
//! │  (checkout-api-services: BasketService, CustomerService)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CheckoutClient                           │
//! │  - Holds ApiSettings (secret key, base URLs)                │
//! │  - Builds endpoint URLs, attaches the secret key            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ApiHttpClient                            │
//! │  - GET/POST/PUT/DELETE with a caller-supplied URL + key     │
//! │  - Response dispatch into HttpResponse<T>                   │
//! │  - Perf tracking                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_api_client::{ApiSettings, CheckoutClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), checkout_api_client::Error> {
//!     let settings = ApiSettings::from_env()?;
//!     let client = CheckoutClient::new(settings)?;
//!
//!     let response = client
//!         .get::<serde_json::Value>(&client.payments_url("customers/cust_123"))
//!         .await?;
//!
//!     match response.model() {
//!         Some(customer) => println!("{customer}"),
//!         None => println!("failed with {}", response.status()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod checkout_client;
mod client;
mod config;
mod error;
mod perf;
mod request;
mod response;
pub mod security;
mod settings;

pub use checkout_client::CheckoutClient;
pub use client::ApiHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, SuccessPolicy};
pub use error::{Error, ErrorKind, Result};
pub use perf::{NoopPerfTracker, PerfRecord, PerfTracker, TracingPerfTracker};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{HttpResponse, OkResponse, ResponseBody, ResponseError};
pub use settings::{ApiSettings, Environment};

/// Default content type for request and response bodies.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("checkout-api-rust/", env!("CARGO_PKG_VERSION"));
