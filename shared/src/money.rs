//! Money helpers
//!
//! All calculations are done using `Decimal`. Backend rows carry prices as
//! JSON floats, so `f64` only appears at that boundary.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal. Non-finite input yields zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round a monetary amount to 2 decimal places, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether the amount carries digits below one cent
#[inline]
pub fn is_sub_cent(value: Decimal) -> bool {
    round_money(value) != value
}

/// Check a boundary price: finite, non-negative, whole cents and at most [`MAX_PRICE`]
pub fn check_price(value: f64) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err(format!("price must be a finite number, got {}", value));
    }
    if value < 0.0 {
        return Err(format!("price must be non-negative, got {}", value));
    }
    if value > MAX_PRICE {
        return Err(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, value
        ));
    }
    let price = to_decimal(value);
    if is_sub_cent(price) {
        return Err(format!("price must be in whole cents, got {}", value));
    }
    Ok(price)
}
