use checkout_api_client::security::url::fill_template;
use checkout_api_client::{ApiSettings, CheckoutClient, HttpResponse, OkResponse};
use tracing::instrument;

use crate::customer::{Customer, CustomerCreate, CustomerGetList, CustomerList, CustomerUpdate};
use crate::error::Result;
use crate::urls;

/// Customer API operations.
#[derive(Debug, Clone)]
pub struct CustomerService {
    client: CheckoutClient,
}

impl CustomerService {
    /// Create a customer service with default transport configuration.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let client = CheckoutClient::with_config(settings, super::ApiClient::default_config())?;
        Ok(Self { client })
    }

    pub fn from_client(client: CheckoutClient) -> Self {
        Self { client }
    }

    /// Get the underlying CheckoutClient.
    pub fn inner(&self) -> &CheckoutClient {
        &self.client
    }

    /// Create a customer, optionally with a card.
    #[instrument(skip(self, request))]
    pub async fn create_customer(
        &self,
        request: &CustomerCreate,
    ) -> Result<HttpResponse<Customer>> {
        let url = self.client.payments_url(urls::CUSTOMERS);
        self.client
            .post(&url, Some(request))
            .await
            .map_err(Into::into)
    }

    /// Get a customer by id.
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: &str) -> Result<HttpResponse<Customer>> {
        let url = self.customer_url(customer_id)?;
        self.client.get(&url).await.map_err(Into::into)
    }

    /// Update a customer. Fields absent from `request` are left unchanged.
    #[instrument(skip(self, request))]
    pub async fn update_customer(
        &self,
        customer_id: &str,
        request: &CustomerUpdate,
    ) -> Result<HttpResponse<OkResponse>> {
        let url = self.customer_url(customer_id)?;
        self.client
            .put(&url, Some(request))
            .await
            .map_err(Into::into)
    }

    /// Delete a customer.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: &str) -> Result<HttpResponse<OkResponse>> {
        let url = self.customer_url(customer_id)?;
        self.client.delete(&url).await.map_err(Into::into)
    }

    /// List customers matching `filter`, newest first.
    #[instrument(skip(self))]
    pub async fn get_customer_list(
        &self,
        filter: &CustomerGetList,
    ) -> Result<HttpResponse<CustomerList>> {
        let url = self.client.payments_url(urls::CUSTOMERS);
        self.client
            .get_with_query(&url, &filter.query_params())
            .await
            .map_err(Into::into)
    }

    fn customer_url(&self, customer_id: &str) -> Result<String> {
        let path = fill_template(urls::CUSTOMER, &[customer_id])?;
        Ok(self.client.payments_url(&path))
    }
}
