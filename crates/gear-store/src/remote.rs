//! REST-backed cart store for authenticated customers.
//!
//! Wraps the storefront services: cart persistence, catalog lookups, and
//! order submission. All responses use the `{success, data, message}`
//! envelope.

use crate::{CartStore, Envelope, StoreError};
use async_trait::async_trait;
use gear_commerce::cart::LineItem;
use gear_commerce::catalog::ProductSnapshot;
use gear_commerce::checkout::{Order, OrderRequest};
use gear_commerce::ids::{CustomerId, ProductId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the storefront services.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(StoreError::from)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Attach a bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fetch the server-side cart: `GET /cart/:customer_id`.
    pub async fn fetch_cart(&self, customer_id: &CustomerId) -> Result<Vec<LineItem>, StoreError> {
        let url = self.url(&format!("/cart/{}", customer_id));
        let resp = self.authed(self.http.get(url)).send().await?;
        read_envelope(resp).await?.into_data()
    }

    /// Add one line item: `POST /cart`.
    pub async fn add_item(
        &self,
        customer_id: &CustomerId,
        item: &LineItem,
    ) -> Result<(), StoreError> {
        let body = CartItemBody { customer_id, item };
        let resp = self
            .authed(self.http.post(self.url("/cart")).json(&body))
            .send()
            .await?;
        ack(resp).await
    }

    /// Update a line item's quantity: `PUT /cart`.
    pub async fn update_quantity(
        &self,
        customer_id: &CustomerId,
        product_id: &ProductId,
        variant: Option<&str>,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let body = UpdateQuantityBody {
            customer_id,
            product_id,
            variant,
            quantity,
        };
        let resp = self
            .authed(self.http.put(self.url("/cart")).json(&body))
            .send()
            .await?;
        ack(resp).await
    }

    /// Remove a line item: `DELETE /cart`.
    pub async fn remove_item(
        &self,
        customer_id: &CustomerId,
        product_id: &ProductId,
        variant: Option<&str>,
    ) -> Result<(), StoreError> {
        let body = RemoveItemBody {
            customer_id,
            product_id,
            variant,
        };
        let resp = self
            .authed(self.http.delete(self.url("/cart")).json(&body))
            .send()
            .await?;
        ack(resp).await
    }

    /// Empty the server-side cart: `DELETE /cart/:customer_id/clear`.
    pub async fn clear_cart(&self, customer_id: &CustomerId) -> Result<(), StoreError> {
        let url = self.url(&format!("/cart/{}/clear", customer_id));
        let resp = self.authed(self.http.delete(url)).send().await?;
        ack(resp).await
    }

    /// Fetch a product snapshot: `GET /products/:id`.
    pub async fn fetch_product(&self, product_id: &ProductId) -> Result<ProductSnapshot, StoreError> {
        let url = self.url(&format!("/products/{}", product_id));
        let resp = self.authed(self.http.get(url)).send().await?;
        read_envelope(resp).await?.into_data()
    }

    /// Submit an order: `POST /orders`.
    ///
    /// A rejected submission surfaces the service's validation-error list as
    /// [`StoreError::Validation`].
    pub async fn submit_order(&self, request: &OrderRequest) -> Result<Order, StoreError> {
        let resp = self
            .authed(self.http.post(self.url("/orders")).json(request))
            .send()
            .await?;
        read_envelope(resp).await?.into_data()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// Parse a response into an envelope, mapping unparseable non-2xx bodies to
/// an HTTP error.
async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Envelope<T>, StoreError> {
    let status = resp.status();
    let body = resp.text().await?;
    match serde_json::from_str(&body) {
        Ok(env) => Ok(env),
        Err(e) if status.is_success() => Err(StoreError::Serde(e)),
        Err(_) => Err(StoreError::Http {
            status: status.as_u16(),
            message: body,
        }),
    }
}

/// Check a payload-less acknowledgement response.
async fn ack(resp: reqwest::Response) -> Result<(), StoreError> {
    read_envelope::<serde_json::Value>(resp)
        .await?
        .ensure_success()
        .map(|_| ())
}

#[derive(Serialize)]
struct CartItemBody<'a> {
    customer_id: &'a CustomerId,
    #[serde(flatten)]
    item: &'a LineItem,
}

#[derive(Serialize)]
struct UpdateQuantityBody<'a> {
    customer_id: &'a CustomerId,
    product_id: &'a ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<&'a str>,
    quantity: u32,
}

#[derive(Serialize)]
struct RemoveItemBody<'a> {
    customer_id: &'a CustomerId,
    product_id: &'a ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<&'a str>,
}

#[async_trait]
impl crate::OrderGateway for ApiClient {
    async fn submit(&self, request: &OrderRequest) -> Result<Order, StoreError> {
        self.submit_order(request).await
    }
}

/// Server-backed [`CartStore`] bound to one customer.
pub struct RemoteStore {
    client: Arc<ApiClient>,
    customer_id: CustomerId,
}

impl RemoteStore {
    /// Create a store for a customer.
    pub fn new(client: Arc<ApiClient>, customer_id: CustomerId) -> Self {
        Self {
            client,
            customer_id,
        }
    }
}

#[async_trait]
impl CartStore for RemoteStore {
    async fn load(&self) -> Result<Option<Vec<LineItem>>, StoreError> {
        self.client.fetch_cart(&self.customer_id).await.map(Some)
    }

    /// Replace the server cart with the given items.
    ///
    /// The cart service is item-granular, so a full-state sync clears and
    /// re-adds. Callers serialize writes (the debounced writer's sequence
    /// token), which makes replace last-write-wins.
    async fn save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        self.client.clear_cart(&self.customer_id).await?;
        for item in items {
            self.client.add_item(&self.customer_id, item).await?;
        }
        tracing::debug!(
            customer = %self.customer_id,
            count = items.len(),
            "replaced server cart"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.client.clear_cart(&self.customer_id).await
    }
}
