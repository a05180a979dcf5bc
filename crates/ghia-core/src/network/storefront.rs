//! Typed client for the storefront endpoints.

use super::client::HttpClient;
use crate::cancel::CancellationToken;
use crate::catalog::{Item, ItemQuery};
use crate::config::CacheKeys;
use crate::forms::{ContactForm, CONTACT_SEND_FAILED, CONTACT_SERVER_FALLBACK};
use crate::{Result, StorefrontError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Response of the `*/count` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// The resources the dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountResource {
    Products,
    Users,
    Orders,
}

impl CountResource {
    pub const ALL: [CountResource; 3] = [
        CountResource::Products,
        CountResource::Users,
        CountResource::Orders,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            CountResource::Products => "/products/count",
            CountResource::Users => "/users/count",
            CountResource::Orders => "/orders/count",
        }
    }

    pub fn cache_key(&self) -> &'static str {
        match self {
            CountResource::Products => CacheKeys::PRODUCTS_COUNT,
            CountResource::Users => CacheKeys::USERS_COUNT,
            CountResource::Orders => CacheKeys::ORDERS_COUNT,
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            CountResource::Products => "Failed to fetch product count",
            CountResource::Users => "Failed to fetch user count",
            CountResource::Orders => "Failed to fetch order count",
        }
    }
}

/// Items endpoints may answer with a bare array or wrap it.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsPayload {
    List(Vec<Item>),
    Wrapped { items: Vec<Item> },
}

/// Client for the storefront JSON API.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Arc<HttpClient>,
}

impl StorefrontClient {
    pub const ITEMS_PATH: &'static str = "/items";
    pub const CONTACT_PATH: &'static str = "/contact";

    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// `GET /items` with the query's parameters.
    pub async fn fetch_items(
        &self,
        query: &ItemQuery,
        token: &CancellationToken,
    ) -> Result<Vec<Item>> {
        let request = self.http.get(Self::ITEMS_PATH).query(&query.to_pairs());
        let response = self.http.send(request, token).await?;
        let payload: ItemsPayload =
            HttpClient::json_or(response, "Failed to fetch products", token).await?;
        Ok(match payload {
            ItemsPayload::List(items) | ItemsPayload::Wrapped { items } => items,
        })
    }

    /// `GET /{resource}/count`.
    pub async fn fetch_count(
        &self,
        resource: CountResource,
        token: &CancellationToken,
    ) -> Result<u64> {
        let response = self.http.send(self.http.get(resource.path()), token).await?;
        let body: CountResponse =
            HttpClient::json_or(response, resource.failure_message(), token).await?;
        Ok(body.count)
    }

    /// Validate and send a contact message.
    ///
    /// Validation failures are returned before any request is made.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<()> {
        form.validate()?;

        let request = self.http.post(Self::CONTACT_PATH).json(form);
        let response = self
            .http
            .send(request, &CancellationToken::new())
            .await
            .map_err(|e| {
                warn!("Contact message could not be sent: {}", e);
                match e {
                    StorefrontError::Network { .. } | StorefrontError::Timeout(_) => {
                        StorefrontError::Other(CONTACT_SEND_FAILED.to_string())
                    }
                    other => other,
                }
            })?;
        HttpClient::expect_success(response, CONTACT_SERVER_FALLBACK).await?;

        info!("Contact message sent");
        Ok(())
    }
}
