//! Cart input validation
//!
//! Callers must reject bad prices and quantities before they reach the
//! offer engine; everything entering `CartStore` goes through here.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartItemInput, CartLine};
use shared::money::is_sub_cent;

use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_max_len, validate_required_text};

/// Maximum allowed unit price (1,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: u32 = 9999;

/// Validate product data before it is added to the cart
pub fn validate_cart_item(item: &CartItemInput) -> AppResult<()> {
    validate_unit_price(item.unit_price)?;
    validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
    validate_max_len(&item.image_url, "image_url", MAX_URL_LEN)?;
    Ok(())
}

/// Validate a full line (used when restoring a saved cart)
pub fn validate_cart_line(line: &CartLine) -> AppResult<()> {
    validate_unit_price(line.unit_price)?;
    validate_quantity(i64::from(line.quantity))?;
    Ok(())
}

/// Price must be non-negative, in whole cents and at most [`MAX_PRICE`]
pub fn validate_unit_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::CartInvalidPrice,
            format!("price must be non-negative, got {}", price),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::CartInvalidPrice,
            format!("price exceeds maximum allowed ({}), got {}", MAX_PRICE, price),
        ));
    }
    if is_sub_cent(price) {
        return Err(AppError::with_message(
            ErrorCode::CartInvalidPrice,
            format!("price must be in whole cents, got {}", price),
        ));
    }
    Ok(())
}

/// Quantity must be in `1..=MAX_QUANTITY`
pub fn validate_quantity(quantity: i64) -> AppResult<u32> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::CartInvalidQuantity,
            format!("quantity must be positive, got {}", quantity),
        ));
    }
    if quantity > i64::from(MAX_QUANTITY) {
        return Err(AppError::with_message(
            ErrorCode::CartInvalidQuantity,
            format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, quantity
            ),
        ));
    }
    Ok(quantity as u32)
}
