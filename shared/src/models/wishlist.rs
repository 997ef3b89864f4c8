//! Wishlist Model

use super::product::{ProductId, ProductRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wishlist row, optionally joined with its product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: i64,
    pub user_id: Uuid,
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRow>,
}

/// Insert payload for a wishlist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWishlistItem {
    pub user_id: Uuid,
    pub product_id: ProductId,
}
