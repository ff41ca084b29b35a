//! Resource service clients.
//!
//! Each service wraps a `CheckoutClient` from `checkout-api-client`. Services
//! built through [`ApiClient`] share one transport.

use checkout_api_client::{ApiSettings, CheckoutClient, ClientConfig, SuccessPolicy};

use crate::error::Result;

mod basket;
mod customer;

pub use basket::BasketService;
pub use customer::CustomerService;

/// Aggregate of every resource service.
///
/// # Example
///
/// ```rust,ignore
/// use checkout_api_services::ApiClient;
///
/// let api = ApiClient::from_env()?;
/// let basket = api.basket_service().create_basket().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    basket_service: BasketService,
    customer_service: CustomerService,
}

impl ApiClient {
    /// Create services for the given account settings.
    ///
    /// Resource creation answers `201 Created`, so the transport is
    /// configured to decode any 2xx status as a success.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        Self::with_config(settings, Self::default_config())
    }

    /// Create services with custom transport configuration.
    pub fn with_config(settings: ApiSettings, config: ClientConfig) -> Result<Self> {
        let client = CheckoutClient::with_config(settings, config)?;
        Ok(Self::from_client(client))
    }

    /// Create services sharing an existing client.
    pub fn from_client(client: CheckoutClient) -> Self {
        Self {
            basket_service: BasketService::from_client(client.clone()),
            customer_service: CustomerService::from_client(client),
        }
    }

    /// Create services from `CHECKOUT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let settings = ApiSettings::from_env()?;
        let mut config = ClientConfig::from_env()?;
        config.success_policy = SuccessPolicy::AnySuccess;
        Self::with_config(settings, config)
    }

    /// Transport configuration used by [`ApiClient::new`].
    pub fn default_config() -> ClientConfig {
        ClientConfig::builder()
            .with_success_policy(SuccessPolicy::AnySuccess)
            .build()
    }

    /// Basket operations.
    pub fn basket_service(&self) -> &BasketService {
        &self.basket_service
    }

    /// Customer operations.
    pub fn customer_service(&self) -> &CustomerService {
        &self.customer_service
    }
}
