//! Quantity stepper arithmetic.
//!
//! Cart line quantities are stepped one unit at a time and are clamped to
//! `1..=stock` when a stock ceiling is known, or `1..` when it is not.

/// Step a quantity up by one, clamped to available stock.
///
/// When `stock` is `None` the quantity grows without an upper bound. The
/// result is never below 1, so a zero input normalizes to 1.
#[must_use]
pub fn bounded_increment(current: u32, stock: Option<u32>) -> u32 {
    let next = current.saturating_add(1);
    stock.map_or(next, |ceiling| next.min(ceiling)).max(1)
}

/// Step a quantity down by one, clamped to a minimum of 1.
#[must_use]
pub fn bounded_decrement(current: u32) -> u32 {
    current.saturating_sub(1).max(1)
}
