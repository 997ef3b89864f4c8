//! Cart Store
//!
//! Explicitly owned cart state. Every mutation builds the new line list,
//! recomputes the offer and replaces both in one step, so readers never see
//! lines and offer out of sync.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartItemInput, CartLine, Offer, OfferResult, ProductId};

use super::validation::{validate_cart_item, validate_cart_line, validate_quantity};
use crate::offers::find_best_offer;

#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    offer: OfferResult,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from saved lines.
    ///
    /// Lines are validated; lines sharing a product id are merged.
    pub fn restore(saved: Vec<CartLine>) -> AppResult<Self> {
        let mut lines: Vec<CartLine> = Vec::with_capacity(saved.len());
        for line in saved {
            validate_cart_line(&line)?;
            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity =
                        merged_quantity(existing.quantity, i64::from(line.quantity))?;
                }
                None => lines.push(line),
            }
        }
        let mut store = Self::new();
        store.commit(lines);
        Ok(store)
    }

    // ========== Mutations ==========

    /// Add one unit of a product
    pub fn add_item(&mut self, item: CartItemInput) -> AppResult<()> {
        self.add_quantity(item, 1)
    }

    /// Add `quantity` units of a product, incrementing the existing line if any
    pub fn add_quantity(&mut self, item: CartItemInput, quantity: u32) -> AppResult<()> {
        validate_cart_item(&item)?;
        let quantity = validate_quantity(i64::from(quantity))?;

        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|l| l.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity = merged_quantity(existing.quantity, i64::from(quantity))?;
            }
            None => lines.push(item.into_line(quantity)),
        }
        self.commit(lines);
        Ok(())
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        if !self.contains(product_id) {
            return false;
        }
        let lines = self
            .lines
            .iter()
            .filter(|l| l.product_id != product_id)
            .cloned()
            .collect();
        self.commit(lines);
        true
    }

    /// Set a line's quantity. Anything below 1 removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> AppResult<()> {
        if quantity < 1 {
            self.remove_item(product_id);
            return Ok(());
        }
        let quantity = validate_quantity(quantity)?;
        if !self.contains(product_id) {
            return Err(
                AppError::new(ErrorCode::CartItemNotFound).with_detail("product_id", product_id)
            );
        }

        let lines = self
            .lines
            .iter()
            .map(|l| {
                if l.product_id == product_id {
                    CartLine {
                        quantity,
                        ..l.clone()
                    }
                } else {
                    l.clone()
                }
            })
            .collect();
        self.commit(lines);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.commit(Vec::new());
    }

    fn commit(&mut self, lines: Vec<CartLine>) {
        let offer = find_best_offer(&lines);
        tracing::debug!(
            lines = lines.len(),
            subtotal = %offer.subtotal,
            total = %offer.discounted_total,
            offer = offer.label().unwrap_or("none"),
            "Cart offer recomputed"
        );
        self.lines = lines;
        self.offer = offer;
    }

    // ========== Readers ==========

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Lines to persist with [`CartStore::restore`]
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Total number of units across all lines
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.offer.subtotal
    }

    pub fn discount(&self) -> Decimal {
        self.offer.savings()
    }

    pub fn total(&self) -> Decimal {
        self.offer.discounted_total
    }

    pub fn applied_offer(&self) -> Option<Offer> {
        self.offer.applied_offer
    }

    pub fn offer(&self) -> &OfferResult {
        &self.offer
    }
}

fn merged_quantity(current: u32, added: i64) -> AppResult<u32> {
    validate_quantity(i64::from(current) + added)
}
