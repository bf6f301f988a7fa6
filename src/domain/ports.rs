use crate::domain::model::PriceQuote;
use crate::utils::error::PriceLookupError;
use async_trait::async_trait;

/// Source of the current exchange rate.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Rate for `fiat_amount` units of the configured reference currency.
    async fn fetch_rate(&self, fiat_amount: f64) -> Result<PriceQuote, PriceLookupError>;
}

/// On/off control surface of the single dispensing output.
pub trait Actuator: Send + Sync {
    fn on(&self);
    fn off(&self);
}

#[async_trait]
impl<O: PriceOracle + ?Sized> PriceOracle for std::sync::Arc<O> {
    async fn fetch_rate(&self, fiat_amount: f64) -> Result<PriceQuote, PriceLookupError> {
        (**self).fetch_rate(fiat_amount).await
    }
}

impl<A: Actuator + ?Sized> Actuator for std::sync::Arc<A> {
    fn on(&self) {
        (**self).on()
    }

    fn off(&self) {
        (**self).off()
    }
}
