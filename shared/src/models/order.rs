//! Order Model
//!
//! Orders are written once at checkout; `special_offer_applied` records the
//! offer label that produced `total`.

use super::offer::Offer;
use super::product::ProductId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OrderId = i64;

/// Order status as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Order row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total: Decimal,
    pub special_offer_applied: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    /// Offer recorded on the order, if the label is one we know
    pub fn applied_offer(&self) -> Option<Offer> {
        self.special_offer_applied
            .as_deref()
            .and_then(Offer::from_label)
    }
}

/// Insert payload for an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub special_offer_applied: Option<String>,
}

/// Order item row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: i64,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price at the time of purchase
    pub price: Decimal,
}

/// Insert payload for an order item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}
