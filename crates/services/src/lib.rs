//! # checkout-api-services
//!
//! Typed façades over the Checkout basket and customer APIs.
//!
//! Every operation is a single call into the transport: the URL template is
//! filled from the arguments, the configured secret key is attached and the
//! tagged [`HttpResponse`] comes back unchanged. Non-success statuses are
//! values, not errors; only transport failures surface as [`Error`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_api_services::{ApiClient, CustomerCreate};
//! use checkout_api_client::ApiSettings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), checkout_api_services::Error> {
//!     let api = ApiClient::new(ApiSettings::new("sk_test_..."))?;
//!
//!     let basket = api.basket_service().create_basket().await?;
//!     if let Some(basket) = basket.model() {
//!         println!("basket {}", basket.id);
//!     }
//!
//!     let customer = api
//!         .customer_service()
//!         .create_customer(&CustomerCreate {
//!             email: "jane@example.com".into(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("status {}", customer.status());
//!
//!     Ok(())
//! }
//! ```

mod basket;
mod client;
mod customer;
mod error;
pub mod urls;

pub use basket::{Basket, BasketItem, Item};
pub use client::{ApiClient, BasketService, CustomerService};
pub use customer::{
    Address, Card, CardCreate, CardList, Customer, CustomerCreate, CustomerGetList, CustomerList,
    CustomerUpdate, Phone, CARD_ID_PREFIX, CUSTOMER_ID_PREFIX,
};
pub use error::{Error, ErrorKind, Result};

// Re-export transport types that appear in service signatures
pub use checkout_api_client::{
    ApiSettings, CheckoutClient, ClientConfig, Environment, HttpResponse, OkResponse,
    ResponseBody, ResponseError, SuccessPolicy,
};
