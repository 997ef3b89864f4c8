//! REST backend
//!
//! Talks to a PostgREST endpoint (`/rest/v1/<table>`) the way the hosted
//! service expects: `apikey` header, bearer token, `eq.` filters and
//! `Prefer: return=representation` on writes.

use super::{Backend, BackendError, BackendResult, ProductFilter};
use crate::core::Config;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::models::{
    NewOrder, NewOrderItem, NewWishlistItem, OrderRecord, ProductCreate, ProductId, ProductRow,
    ProductUpdate, Session, WishlistItem,
};
use std::time::Duration;

const PRODUCTS: &str = "products";
const ORDERS: &str = "orders";
const ORDER_ITEMS: &str = "order_items";
const WISHLIST_ITEMS: &str = "wishlist_items";
const ADMIN_USERS: &str = "admin_users";

/// Error body returned by PostgREST
#[derive(serde::Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestBackend {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> BackendResult<Self> {
        Self::new(
            &config.backend_url,
            &config.backend_anon_key,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, table: &str, session: Option<&Session>) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let token = session
            .map(|s| s.access_token.as_str())
            .unwrap_or(&self.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> BackendResult<T> {
        let response = Self::check(req.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(&self, req: RequestBuilder) -> BackendResult<()> {
        Self::check(req.send().await?).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> BackendResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostgrestError>(&text) {
            Ok(err) => match err.hint {
                Some(hint) => format!("{} ({})", err.message, hint),
                None => err.message,
            },
            Err(_) => text,
        };
        tracing::warn!(status = %status, message = %message, "Backend request failed");
        Err(BackendError::Status { status, message })
    }

    /// First row of a `return=representation` response
    fn first<T>(rows: Vec<T>, what: &str) -> BackendResult<T> {
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::InvalidResponse(format!("{} returned no rows", what)))
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_products(&self, filter: &ProductFilter) -> BackendResult<Vec<ProductRow>> {
        let mut query: Vec<(&str, String)> = vec![
            ("select", "*".into()),
            ("order", "created_at.desc".into()),
        ];
        if let Some(featured) = filter.featured {
            query.push(("featured", eq(featured)));
        }
        if let Some(best) = filter.is_best_seller {
            query.push(("is_best_seller", eq(best)));
        }
        if let Some(gender) = &filter.gender {
            query.push(("gender", eq(gender)));
        }
        if let Some(limit) = filter.limit {
            query.push(("limit", limit.to_string()));
        }
        self.send(self.request(Method::GET, PRODUCTS, None).query(&query))
            .await
    }

    async fn get_product(&self, id: ProductId) -> BackendResult<Option<ProductRow>> {
        let rows: Vec<ProductRow> = self
            .send(
                self.request(Method::GET, PRODUCTS, None)
                    .query(&[("select", "*".to_string()), ("id", eq(id))]),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn is_admin(&self, session: &Session) -> BackendResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .send(
                self.request(Method::GET, ADMIN_USERS, Some(session))
                    .query(&[("select", "id".to_string()), ("user_id", eq(session.user_id))]),
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn insert_product(
        &self,
        session: &Session,
        data: &ProductCreate,
    ) -> BackendResult<ProductRow> {
        let rows = self
            .send(
                self.request(Method::POST, PRODUCTS, Some(session))
                    .header("Prefer", "return=representation")
                    .json(data),
            )
            .await?;
        Self::first(rows, "product insert")
    }

    async fn update_product(
        &self,
        session: &Session,
        id: ProductId,
        data: &ProductUpdate,
    ) -> BackendResult<ProductRow> {
        let rows: Vec<ProductRow> = self
            .send(
                self.request(Method::PATCH, PRODUCTS, Some(session))
                    .query(&[("id", eq(id))])
                    .header("Prefer", "return=representation")
                    .json(data),
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("product {}", id)))
    }

    async fn delete_product(&self, session: &Session, id: ProductId) -> BackendResult<()> {
        self.send_empty(
            self.request(Method::DELETE, PRODUCTS, Some(session))
                .query(&[("id", eq(id))]),
        )
        .await
    }

    async fn insert_order(
        &self,
        session: &Session,
        order: &NewOrder,
    ) -> BackendResult<OrderRecord> {
        let rows = self
            .send(
                self.request(Method::POST, ORDERS, Some(session))
                    .header("Prefer", "return=representation")
                    .json(order),
            )
            .await?;
        Self::first(rows, "order insert")
    }

    async fn insert_order_items(
        &self,
        session: &Session,
        items: &[NewOrderItem],
    ) -> BackendResult<()> {
        self.send_empty(
            self.request(Method::POST, ORDER_ITEMS, Some(session))
                .header("Prefer", "return=minimal")
                .json(items),
        )
        .await
    }

    async fn list_orders(&self, session: &Session) -> BackendResult<Vec<OrderRecord>> {
        self.send(self.request(Method::GET, ORDERS, Some(session)).query(&[
            ("select", "*".to_string()),
            ("user_id", eq(session.user_id)),
            ("order", "created_at.desc".to_string()),
        ]))
        .await
    }

    async fn list_wishlist(&self, session: &Session) -> BackendResult<Vec<WishlistItem>> {
        self.send(
            self.request(Method::GET, WISHLIST_ITEMS, Some(session))
                .query(&[
                    ("select", "*,product:products(*)".to_string()),
                    ("user_id", eq(session.user_id)),
                ]),
        )
        .await
    }

    async fn insert_wishlist_item(
        &self,
        session: &Session,
        item: &NewWishlistItem,
    ) -> BackendResult<WishlistItem> {
        let rows = self
            .send(
                self.request(Method::POST, WISHLIST_ITEMS, Some(session))
                    .header("Prefer", "return=representation")
                    .json(item),
            )
            .await?;
        Self::first(rows, "wishlist insert")
    }

    async fn delete_wishlist_item(&self, session: &Session, item_id: i64) -> BackendResult<()> {
        self.send_empty(
            self.request(Method::DELETE, WISHLIST_ITEMS, Some(session))
                .query(&[("id", eq(item_id)), ("user_id", eq(session.user_id))]),
        )
        .await
    }
}
