use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One output of an observed chain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// `None` for outputs the listener could not attribute to an address.
    pub address: Option<String>,
    /// Smallest currency unit (satoshi).
    pub value: u64,
}

impl TxOutput {
    pub fn new(address: impl Into<String>, value: u64) -> Self {
        Self {
            address: Some(address.into()),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChainTransaction {
    pub outputs: Vec<TxOutput>,
}

/// A settled off-chain invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInvoice {
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    OnChain,
    OffChain,
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentKind::OnChain => write!(f, "on-chain"),
            PaymentKind::OffChain => write!(f, "off-chain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub kind: PaymentKind,
    pub value: u64,
}

/// Exchange rate returned by the price service: currency units per fiat
/// reference amount.
///
/// Held at single precision, which is the precision the rate is parsed at.
/// Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PriceQuote(f32);

impl PriceQuote {
    pub fn new(rate: f32) -> Option<Self> {
        (rate.is_finite() && rate > 0.0).then_some(Self(rate))
    }

    pub fn rate(&self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispenseCommand {
    pub duration: Duration,
}

impl DispenseCommand {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

/// Notifications from the manual push-button sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEvent {
    Pressed,
    Released,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_quote_rejects_non_positive() {
        assert!(PriceQuote::new(0.0000025).is_some());
        assert!(PriceQuote::new(0.0).is_none());
        assert!(PriceQuote::new(-1.5).is_none());
        assert!(PriceQuote::new(f32::NAN).is_none());
        assert!(PriceQuote::new(f32::INFINITY).is_none());
    }

    #[test]
    fn test_price_quote_widens_single_precision() {
        let quote = PriceQuote::new(0.0000025).unwrap();
        assert_eq!(quote.rate(), f64::from(0.0000025_f32));
        assert_ne!(quote.rate(), 0.0000025_f64);
    }
}
