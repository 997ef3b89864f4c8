//! Backend Module
//!
//! Typed seam over the hosted data/auth service. Auth, row storage and
//! query filtering stay in the service; this module only describes the
//! CRUD calls the storefront makes.
//!
//! - [`Backend`]: the calls, one per table operation
//! - [`RestBackend`]: PostgREST-over-HTTP implementation

mod rest;

#[cfg(test)]
pub(crate) mod memory;

pub use rest::RestBackend;

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    NewOrder, NewOrderItem, NewWishlistItem, OrderRecord, ProductCreate, ProductId, ProductRow,
    ProductUpdate, Session, WishlistItem,
};
use thiserror::Error;

/// Backend error types
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            BackendError::Http(e) => AppError::with_message(ErrorCode::NetworkError, e.to_string()),
            BackendError::Status { status, message } => {
                AppError::with_message(ErrorCode::from_http_status(status), message)
                    .with_detail("status", status.as_u16())
            }
            BackendError::NotFound(resource) => AppError::not_found(resource),
            BackendError::Decode(e) => AppError::database(format!("Decode error: {}", e)),
            BackendError::InvalidResponse(msg) => AppError::database(msg),
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Filters the backend applies to product listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub featured: Option<bool>,
    pub is_best_seller: Option<bool>,
    pub gender: Option<String>,
    pub limit: Option<usize>,
}

/// CRUD calls against the hosted backend
///
/// Calls that take a [`Session`] run with the user's token so row-level
/// security in the service applies.
#[async_trait]
pub trait Backend: Send + Sync {
    // Catalog
    /// Products matching `filter`, newest first
    async fn list_products(&self, filter: &ProductFilter) -> BackendResult<Vec<ProductRow>>;
    async fn get_product(&self, id: ProductId) -> BackendResult<Option<ProductRow>>;

    // Admin
    async fn is_admin(&self, session: &Session) -> BackendResult<bool>;
    async fn insert_product(
        &self,
        session: &Session,
        data: &ProductCreate,
    ) -> BackendResult<ProductRow>;
    async fn update_product(
        &self,
        session: &Session,
        id: ProductId,
        data: &ProductUpdate,
    ) -> BackendResult<ProductRow>;
    async fn delete_product(&self, session: &Session, id: ProductId) -> BackendResult<()>;

    // Orders
    async fn insert_order(&self, session: &Session, order: &NewOrder)
    -> BackendResult<OrderRecord>;
    async fn insert_order_items(
        &self,
        session: &Session,
        items: &[NewOrderItem],
    ) -> BackendResult<()>;
    /// The session user's orders, newest first
    async fn list_orders(&self, session: &Session) -> BackendResult<Vec<OrderRecord>>;

    // Wishlist
    /// The session user's wishlist rows joined with their product
    async fn list_wishlist(&self, session: &Session) -> BackendResult<Vec<WishlistItem>>;
    async fn insert_wishlist_item(
        &self,
        session: &Session,
        item: &NewWishlistItem,
    ) -> BackendResult<WishlistItem>;
    async fn delete_wishlist_item(&self, session: &Session, item_id: i64) -> BackendResult<()>;
}
