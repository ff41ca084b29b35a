use checkout_api_client::security::url::fill_template;
use checkout_api_client::{ApiSettings, CheckoutClient, HttpResponse, OkResponse};
use tracing::instrument;
use uuid::Uuid;

use crate::basket::{Basket, Item};
use crate::error::Result;
use crate::urls;

/// Basket API operations.
#[derive(Debug, Clone)]
pub struct BasketService {
    client: CheckoutClient,
}

impl BasketService {
    /// Create a basket service with default transport configuration.
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

    /// Create an empty basket.
    #[instrument(skip(self))]
    pub async fn create_basket(&self) -> Result<HttpResponse<Basket>> {
        let url = self.client.basket_url(urls::BASKET_CREATE);
        self.client
            .post::<Basket, ()>(&url, None)
            .await
            .map_err(Into::into)
    }

    /// Add an item to a basket.
    #[instrument(skip(self, item))]
    pub async fn add_item(&self, basket_id: Uuid, item: &Item) -> Result<HttpResponse<OkResponse>> {
        let url = self.items_url(basket_id)?;
        self.client.post(&url, Some(item)).await.map_err(Into::into)
    }

    /// Replace the quantity of an item already in a basket.
    #[instrument(skip(self, item))]
    pub async fn update_item(
        &self,
        basket_id: Uuid,
        item: &Item,
    ) -> Result<HttpResponse<OkResponse>> {
        let url = self.items_url(basket_id)?;
        self.client.put(&url, Some(item)).await.map_err(Into::into)
    }

    /// Get a basket containing only the named item.
    #[instrument(skip(self))]
    pub async fn get_item(&self, basket_id: Uuid, name: &str) -> Result<HttpResponse<Basket>> {
        let url = self.item_url(basket_id, name)?;
        self.client.get(&url).await.map_err(Into::into)
    }

    /// Get a basket with all its items.
    #[instrument(skip(self))]
    pub async fn get_basket(&self, basket_id: Uuid) -> Result<HttpResponse<Basket>> {
        let id = basket_id.to_string();
        let url = self
            .client
            .basket_url(&fill_template(urls::BASKET_GET, &[&id])?);
        self.client.get(&url).await.map_err(Into::into)
    }

    /// Remove the named item from a basket.
    #[instrument(skip(self))]
    pub async fn delete_item(
        &self,
        basket_id: Uuid,
        name: &str,
    ) -> Result<HttpResponse<OkResponse>> {
        let url = self.item_url(basket_id, name)?;
        self.client.delete(&url).await.map_err(Into::into)
    }

    fn items_url(&self, basket_id: Uuid) -> Result<String> {
        let id = basket_id.to_string();
        let path = fill_template(urls::BASKET_ITEMS, &[&id])?;
        Ok(self.client.basket_url(&path))
    }

    fn item_url(&self, basket_id: Uuid, name: &str) -> Result<String> {
        let id = basket_id.to_string();
        let path = fill_template(urls::BASKET_ITEM, &[&id, name])?;
        Ok(self.client.basket_url(&path))
    }
}
