//! Wishlist
//!
//! Cached wishlist of the signed-in user. Every mutation goes to the backend
//! first and then reloads the cache, so the cache only ever holds rows the
//! backend returned. Without a session all operations are no-ops.

use crate::backend::Backend;
use shared::error::AppResult;
use shared::models::{NewWishlistItem, Product, ProductId, Session, WishlistItem};
use std::sync::Arc;

pub struct WishlistService {
    backend: Arc<dyn Backend>,
    session: Option<Session>,
    items: Vec<WishlistItem>,
}

impl WishlistService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            session: None,
            items: Vec::new(),
        }
    }

    /// Switch user. The cache is dropped; call [`WishlistService::refresh`] to reload.
    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
        self.items.clear();
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub async fn refresh(&mut self) -> AppResult<()> {
        let Some(session) = &self.session else {
            self.items.clear();
            return Ok(());
        };
        self.items = self.backend.list_wishlist(session).await?;
        tracing::debug!(user_id = %session.user_id, items = self.items.len(), "Wishlist loaded");
        Ok(())
    }

    /// Add a product; does nothing when it is already listed
    pub async fn add(&mut self, product_id: ProductId) -> AppResult<()> {
        if self.session.is_none() {
            return Ok(());
        }
        self.refresh().await?;
        if self.is_in_wishlist(product_id) {
            return Ok(());
        }
        if let Some(session) = &self.session {
            let item = NewWishlistItem {
                user_id: session.user_id,
                product_id,
            };
            self.backend.insert_wishlist_item(session, &item).await?;
            tracing::info!(user_id = %session.user_id, product_id, "Wishlist item added");
        }
        self.refresh().await
    }

    /// Remove a wishlist row by its id
    pub async fn remove(&mut self, item_id: i64) -> AppResult<()> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        self.backend.delete_wishlist_item(session, item_id).await?;
        tracing::info!(user_id = %session.user_id, item_id, "Wishlist item removed");
        self.refresh().await
    }

    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Joined products that pass validation
    pub fn products(&self) -> Vec<Product> {
        self.items
            .iter()
            .filter_map(|item| item.product.clone())
            .filter_map(|row| Product::try_from(row).ok())
            .collect()
    }
}
