//! Decimal money helpers.
//!
//! Amounts travel as decimal strings (`"1499.90"`) or plain JSON numbers
//! depending on the endpoint. They are kept as [`Decimal`] everywhere and only
//! rounded when rendered.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency label used by the store (Bolivianos).
pub const CURRENCY_LABEL: &str = "Bs";

/// Multiply a unit price by a quantity.
///
/// Saturates at [`Decimal::MAX`] (or `MIN`) instead of overflowing.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price.saturating_mul(Decimal::from(quantity))
}

/// Saturating sum of amounts.
#[must_use]
pub fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Round an amount to two decimals for display.
#[must_use]
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as `"Bs. 1234.50"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{CURRENCY_LABEL}. {:.2}", round_for_display(amount))
}
