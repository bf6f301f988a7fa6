#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{DispenserError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_amount, validate_required_field, validate_url,
    Validate,
};
use std::time::Duration;

pub const DEFAULT_ORACLE_ENDPOINT: &str = "https://blockchain.info/tobtc";
pub const DEFAULT_ORACLE_CURRENCY: &str = "USD";
/// One cent.
pub const DEFAULT_REFERENCE_AMOUNT: f64 = 0.01;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Price service settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    pub endpoint: String,
    pub currency: String,
    pub reference_amount: f64,
    /// `None` waits on the price service indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ORACLE_ENDPOINT.to_string(),
            currency: DEFAULT_ORACLE_CURRENCY.to_string(),
            reference_amount: DEFAULT_REFERENCE_AMOUNT,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListenerConfig {
    pub retry_delay: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Everything the dispenser needs, resolved once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispenserConfig {
    /// On-chain payments are ignored when unset.
    pub receiving_address: Option<String>,
    /// Long-poll feed of transactions for `receiving_address`.
    pub chain_feed: Option<String>,
    pub invoice_subscriptions: Vec<String>,
    /// Startup self-test duration and on-chain scaling unit.
    pub base_dispense: Duration,
    pub oracle: OracleConfig,
    pub listener: ListenerConfig,
}

impl DispenserConfig {
    pub fn on_chain_enabled(&self) -> bool {
        self.receiving_address.is_some()
    }
}

impl Validate for DispenserConfig {
    fn validate(&self) -> Result<()> {
        if let Some(address) = &self.receiving_address {
            validate_non_empty_string("bitcoin.address", address)?;
            let feed = validate_required_field("bitcoin.feed", &self.chain_feed)?;
            validate_url("bitcoin.feed", feed)?;
        } else if self.chain_feed.is_some() {
            return Err(DispenserError::ConfigError {
                message: "bitcoin.feed is set but bitcoin.address is not".to_string(),
            });
        }

        for endpoint in &self.invoice_subscriptions {
            validate_url("lightning.subscription", endpoint)?;
        }

        validate_url("oracle.endpoint", &self.oracle.endpoint)?;
        validate_non_empty_string("oracle.currency", &self.oracle.currency)?;
        validate_positive_amount("oracle.reference_amount", self.oracle.reference_amount)?;

        if self.invoice_subscriptions.is_empty() && !self.on_chain_enabled() {
            tracing::warn!("No payment source configured, only the startup dispense will run");
        }

        Ok(())
    }
}

/// humantime strings (`"2s"`, `"500ms"`) for TOML durations.
pub(crate) mod humantime_serde {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
