//! # checkout-api
//!
//! Rust client library for the Checkout payments API.
//!
//! ## Security
//!
//! - The secret key is redacted in Debug output
//! - Tracing spans skip keys and request payloads
//! - Error messages taken from response bodies have `sk_...` keys redacted
//!
//! ## Crates
//!
//! - **checkout-api-client** - HTTP transport: headers, timeouts, size limits, tagged responses, perf records
//! - **checkout-api-services** - Basket and customer façades plus their request/response types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_api::{ApiClient, ApiSettings, Item};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new(ApiSettings::new("sk_test_..."))?;
//!
//!     let basket = api.basket_service().create_basket().await?.into_result()?;
//!     api.basket_service()
//!         .add_item(basket.id, &Item::new("Sprite", 10))
//!         .await?;
//!
//!     let response = api.basket_service().get_basket(basket.id).await?;
//!     match response.model() {
//!         Some(basket) => println!("{} items", basket.items.len()),
//!         None => println!("failed: {:?}", response.error()),
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub use checkout_api_client as client;
#[cfg(feature = "services")]
pub use checkout_api_services as services;

#[cfg(feature = "client")]
pub use checkout_api_client::{
    ApiHttpClient, ApiSettings, CheckoutClient, ClientConfig, Environment, HttpResponse,
    OkResponse, PerfRecord, PerfTracker, ResponseBody, ResponseError, SuccessPolicy,
};
#[cfg(feature = "services")]
pub use checkout_api_services::{
    ApiClient, Basket, BasketService, Customer, CustomerCreate, CustomerGetList, CustomerService,
    CustomerUpdate, Item,
};
