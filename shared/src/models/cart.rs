//! Cart Model

use super::product::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One distinct product held in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    /// Always >= 1 while the line is in a cart
    pub quantity: u32,
    pub image_url: String,
}

impl CartLine {
    /// unit_price * quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Product data needed to put an item in the cart (quantity is supplied separately)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemInput {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image_url: String,
}

impl From<&Product> for CartItemInput {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
        }
    }
}

impl CartItemInput {
    pub fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            product_id: self.product_id,
            name: self.name,
            unit_price: self.unit_price,
            quantity,
            image_url: self.image_url,
        }
    }
}
