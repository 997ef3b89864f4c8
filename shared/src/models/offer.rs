//! Offer Model
//!
//! Result types of the offer engine. The engine itself lives in
//! `storefront::offers`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Promotional offer that can be applied to a whole cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Offer {
    /// Flat 15% off the subtotal
    #[serde(rename = "15% Off")]
    PercentOff,
    /// One free unit per five purchased
    #[serde(rename = "Buy 4, Get 1 Free")]
    BuyFourGetOneFree,
}

impl Offer {
    /// Label shown to customers and stored on orders
    pub const fn label(&self) -> &'static str {
        match self {
            Offer::PercentOff => "15% Off",
            Offer::BuyFourGetOneFree => "Buy 4, Get 1 Free",
        }
    }

    /// Parse a stored label back into an offer
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "15% Off" => Some(Offer::PercentOff),
            "Buy 4, Get 1 Free" => Some(Offer::BuyFourGetOneFree),
            _ => None,
        }
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Best offer for a cart and the resulting total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferResult {
    pub applied_offer: Option<Offer>,
    pub subtotal: Decimal,
    /// Never negative, never above `subtotal`
    pub discounted_total: Decimal,
}

impl OfferResult {
    /// Result for an empty cart
    pub const fn none() -> Self {
        Self {
            applied_offer: None,
            subtotal: Decimal::ZERO,
            discounted_total: Decimal::ZERO,
        }
    }

    pub fn savings(&self) -> Decimal {
        self.subtotal - self.discounted_total
    }

    pub fn label(&self) -> Option<&'static str> {
        self.applied_offer.map(|o| o.label())
    }
}

impl Default for OfferResult {
    fn default() -> Self {
        Self::none()
    }
}
