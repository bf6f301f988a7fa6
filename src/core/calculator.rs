use crate::core::{DispenseCommand, Payment, PaymentKind, PriceQuote};
use std::time::Duration;

/// Smallest currency units per whole unit (satoshi per bitcoin).
pub const UNITS_PER_COIN: f64 = 1e8;

/// Fiat reference amounts (cents) worth one base dispense.
pub const UNITS_PER_DISPENSE: f64 = 40.0;

/// Number of base dispenses an on-chain payment is worth.
///
/// `value / 1e8 / quote / 40`, kept exactly in this order so the rounding
/// matches the established dispense amounts.
pub fn dispense_units(value: u64, quote: PriceQuote) -> f64 {
    value as f64 / UNITS_PER_COIN / quote.rate() / UNITS_PER_DISPENSE
}

/// Derives the actuation time for a payment.
///
/// Off-chain payments always dispense `base`, whatever their value. On-chain
/// payments scale `base` by the whole number of units they are worth and need
/// a quote; `None` is returned when one is missing.
pub fn compute(
    payment: &Payment,
    base: Duration,
    quote: Option<PriceQuote>,
) -> Option<DispenseCommand> {
    match payment.kind {
        PaymentKind::OffChain => Some(DispenseCommand::new(base)),
        PaymentKind::OnChain => {
            let quote = quote?;
            let how_many = dispense_units(payment.value, quote);
            tracing::debug!(value = payment.value, %quote, how_many, "Converted on-chain payment");
            // float -> int `as` truncates toward zero and saturates, NaN becomes 0
            Some(DispenseCommand::new(base.saturating_mul(how_many as u32)))
        }
    }
}
