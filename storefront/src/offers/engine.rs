//! Offer Engine
//!
//! Picks the single promotional offer that saves the most on a cart:
//! - 15% off the subtotal, available whenever the subtotal is positive
//! - "Buy 4, Get 1 Free": one free unit per complete group of five units,
//!   the free units being the *cheapest* ones in the cart
//!
//! Offers never stack. Pure function, no I/O.

use rust_decimal::prelude::*;
use shared::models::{CartLine, Offer, OfferResult};
use shared::money::round_money;

/// 15% expressed as a fraction
const PERCENT_OFF_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Units per bundle; every complete bundle yields one free unit
pub const BUNDLE_SIZE: u64 = 5;

/// Discount each offer would give on a cart, before selection
#[derive(Debug, Clone, PartialEq)]
pub struct OfferCandidates {
    pub total_quantity: u64,
    pub subtotal: Decimal,
    pub percent_off: Decimal,
    /// `None` when the cart has fewer than [`BUNDLE_SIZE`] units
    pub bundle: Option<Decimal>,
}

/// Evaluate every offer against the cart without choosing one
pub fn evaluate_offers(lines: &[CartLine]) -> OfferCandidates {
    let total_quantity: u64 = lines.iter().map(|l| u64::from(l.quantity)).sum();
    let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();

    let bundle = (total_quantity >= BUNDLE_SIZE)
        .then(|| cheapest_units_total(lines, total_quantity / BUNDLE_SIZE));

    OfferCandidates {
        total_quantity,
        subtotal,
        percent_off: subtotal * PERCENT_OFF_RATE,
        bundle,
    }
}

/// Compute the best offer for the cart and the discounted total.
///
/// The bundle offer wins only when it saves strictly more than the
/// percentage offer; ties go to the percentage offer. An empty or zero-value
/// cart gets no offer, and neither does a cart where the saving rounds to
/// zero cents.
pub fn find_best_offer(lines: &[CartLine]) -> OfferResult {
    let candidates = evaluate_offers(lines);

    let (applied_offer, discount) = match candidates.bundle {
        Some(bundle) if bundle > candidates.percent_off => {
            (Some(Offer::BuyFourGetOneFree), bundle)
        }
        _ if candidates.percent_off > Decimal::ZERO => {
            (Some(Offer::PercentOff), candidates.percent_off)
        }
        _ => (None, Decimal::ZERO),
    };

    let subtotal = round_money(candidates.subtotal);
    let discounted_total = round_money(candidates.subtotal - discount)
        .max(Decimal::ZERO)
        .min(subtotal);

    // An offer that saves nothing once rounded to cents is not applied
    if discounted_total == subtotal {
        return OfferResult {
            applied_offer: None,
            subtotal,
            discounted_total: subtotal,
        };
    }

    OfferResult {
        applied_offer,
        subtotal,
        discounted_total,
    }
}

/// Sum of the `count` cheapest units in the cart.
///
/// Equivalent to expanding every line into one price per unit, sorting the
/// prices ascending and summing the first `count`, without materialising the
/// per-unit list.
fn cheapest_units_total(lines: &[CartLine], count: u64) -> Decimal {
    let mut by_price: Vec<&CartLine> = lines.iter().collect();
    by_price.sort_by(|a, b| a.unit_price.cmp(&b.unit_price));

    let mut remaining = count;
    let mut total = Decimal::ZERO;
    for line in by_price {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(u64::from(line.quantity));
        total += line.unit_price * Decimal::from(take);
        remaining -= take;
    }
    total
}
