use crate::config::{humantime_serde, DispenserConfig};
use crate::utils::error::{DispenserError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Dispenser settings as written in a TOML file. Every key is optional.
///
/// ```toml
/// [bitcoin]
/// address = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT"
/// feed = "http://localhost:9000/utx"
///
/// [lightning]
/// subscriptions = ["http://localhost:9001/invoices"]
///
/// [dispense]
/// base = "2s"
///
/// [oracle]
/// endpoint = "https://blockchain.info/tobtc"
/// currency = "USD"
/// reference_amount = 0.01
/// timeout = "10s"
///
/// [listener]
/// retry_delay = "5s"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub bitcoin: BitcoinSection,
    pub lightning: LightningSection,
    pub dispense: DispenseSection,
    pub oracle: OracleSection,
    pub listener: ListenerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BitcoinSection {
    pub address: Option<String>,
    pub feed: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LightningSection {
    pub subscriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DispenseSection {
    #[serde(deserialize_with = "humantime_serde::deserialize")]
    pub base: Option<Duration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OracleSection {
    pub endpoint: Option<String>,
    pub currency: Option<String>,
    pub reference_amount: Option<f64>,
    #[serde(deserialize_with = "humantime_serde::deserialize")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListenerSection {
    #[serde(deserialize_with = "humantime_serde::deserialize")]
    pub retry_delay: Option<Duration>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DispenserError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unset variables are an error.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DispenserError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.push(var_name.to_string());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(DispenserError::ConfigError {
                message: format!("Undefined environment variables: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }

    /// Overlays the values present in the file onto `base`.
    pub fn apply_to(self, mut base: DispenserConfig) -> DispenserConfig {
        if let Some(address) = self.bitcoin.address {
            base.receiving_address = Some(address);
        }
        if let Some(feed) = self.bitcoin.feed {
            base.chain_feed = Some(feed);
        }
        if !self.lightning.subscriptions.is_empty() {
            base.invoice_subscriptions = self.lightning.subscriptions;
        }
        if let Some(duration) = self.dispense.base {
            base.base_dispense = duration;
        }
        if let Some(endpoint) = self.oracle.endpoint {
            base.oracle.endpoint = endpoint;
        }
        if let Some(currency) = self.oracle.currency {
            base.oracle.currency = currency;
        }
        if let Some(amount) = self.oracle.reference_amount {
            base.oracle.reference_amount = amount;
        }
        if self.oracle.timeout.is_some() {
            base.oracle.timeout = self.oracle.timeout;
        }
        if let Some(delay) = self.listener.retry_delay {
            base.listener.retry_delay = delay;
        }
        base
    }

    pub fn into_config(self) -> DispenserConfig {
        self.apply_to(DispenserConfig::default())
    }
}
