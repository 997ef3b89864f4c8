//! Checkout
//!
//! Turns the cart into an order: one `orders` row carrying the discounted
//! total and the applied offer label, then one `order_items` row per cart
//! line at its unit price. The cart is cleared only after both writes
//! succeed.

use crate::audit_log;
use crate::backend::Backend;
use crate::cart::CartStore;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_required_text,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{NewOrder, NewOrderItem, OfferResult, OrderRecord, OrderStatus, Session};
use std::sync::Arc;

/// Delivery details collected at checkout. Validated, not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingDetails {
    /// Every field is required; the first missing one is reported
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.first_name, "first_name", MAX_NAME_LEN)?;
        validate_required_text(&self.last_name, "last_name", MAX_NAME_LEN)?;
        validate_email(&self.email, "email")?;
        validate_required_text(&self.address, "address", MAX_ADDRESS_LEN)?;
        validate_required_text(&self.city, "city", MAX_NAME_LEN)?;
        validate_required_text(&self.state, "state", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&self.zip_code, "zip_code", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&self.country, "country", MAX_SHORT_TEXT_LEN)?;
        Ok(())
    }
}

/// What was written for a successful checkout
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub order: OrderRecord,
    pub items: Vec<NewOrderItem>,
    pub offer: OfferResult,
}

#[derive(Clone)]
pub struct CheckoutService {
    backend: Arc<dyn Backend>,
}

impl CheckoutService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Place an order for the cart's contents.
    ///
    /// On any error the cart is left untouched.
    pub async fn submit(
        &self,
        session: Option<&Session>,
        cart: &mut CartStore,
        shipping: &ShippingDetails,
    ) -> AppResult<CheckoutReceipt> {
        let session = session.ok_or_else(AppError::not_authenticated)?;
        if cart.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        shipping.validate()?;

        let offer = cart.offer().clone();
        let new_order = NewOrder {
            user_id: session.user_id,
            status: OrderStatus::Processing,
            total: offer.discounted_total,
            special_offer_applied: offer.label().map(str::to_string),
        };
        let order = self.backend.insert_order(session, &new_order).await?;

        let items: Vec<NewOrderItem> = cart
            .lines()
            .iter()
            .map(|line| NewOrderItem {
                order_id: order.id,
                product_id: line.product_id,
                quantity: line.quantity,
                price: line.unit_price,
            })
            .collect();
        if let Err(e) = self.backend.insert_order_items(session, &items).await {
            tracing::error!(order_id = order.id, error = %e, "Failed to write order items");
            return Err(e.into());
        }

        tracing::info!(
            order_id = order.id,
            user_id = %session.user_id,
            total = %order.total,
            offer = offer.label().unwrap_or("none"),
            lines = items.len(),
            "Order placed"
        );
        audit_log!(
            session.user_id,
            "place",
            format!("order:{}", order.id),
            offer.label().unwrap_or("none")
        );
        cart.clear();

        Ok(CheckoutReceipt {
            order,
            items,
            offer,
        })
    }
}
