use crate::config::toml_config::TomlConfig;
use crate::config::DispenserConfig;
use crate::utils::error::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "candy-dispenser")]
#[command(about = "Dispenses candy for on-chain and lightning payments")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file; flags override its values")]
    pub config: Option<PathBuf>,

    #[arg(long = "bitcoin.address", help = "receiving Bitcoin address")]
    pub bitcoin_address: Option<String>,

    #[arg(long = "bitcoin.feed", help = "long-poll feed of transactions for the receiving address")]
    pub bitcoin_feed: Option<String>,

    #[arg(
        long = "lightning.subscription",
        action = ArgAction::Append,
        help = "subscription endpoint to paid lightning invoices (repeatable)"
    )]
    pub lightning_subscriptions: Vec<String>,

    #[arg(
        long = "debug.dispense",
        value_parser = humantime::parse_duration,
        help = "dispensing duration on startup, also the per-unit dispense time"
    )]
    pub debug_dispense: Option<Duration>,

    #[arg(long = "oracle.endpoint")]
    pub oracle_endpoint: Option<String>,

    #[arg(long = "oracle.currency")]
    pub oracle_currency: Option<String>,

    #[arg(long = "oracle.reference-amount")]
    pub oracle_reference_amount: Option<f64>,

    #[arg(long = "oracle.timeout", value_parser = humantime::parse_duration)]
    pub oracle_timeout: Option<Duration>,

    #[arg(long = "listener.retry-delay", value_parser = humantime::parse_duration)]
    pub listener_retry_delay: Option<Duration>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Builds the immutable dispenser configuration: defaults, then the
    /// `--config` file, then explicit flags.
    pub fn resolve(&self) -> Result<DispenserConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_config(),
            None => DispenserConfig::default(),
        };

        if let Some(address) = &self.bitcoin_address {
            config.receiving_address = Some(address.clone());
        }
        if let Some(feed) = &self.bitcoin_feed {
            config.chain_feed = Some(feed.clone());
        }
        if !self.lightning_subscriptions.is_empty() {
            config.invoice_subscriptions = self.lightning_subscriptions.clone();
        }
        if let Some(duration) = self.debug_dispense {
            config.base_dispense = duration;
        }
        if let Some(endpoint) = &self.oracle_endpoint {
            config.oracle.endpoint = endpoint.clone();
        }
        if let Some(currency) = &self.oracle_currency {
            config.oracle.currency = currency.clone();
        }
        if let Some(amount) = self.oracle_reference_amount {
            config.oracle.reference_amount = amount;
        }
        if self.oracle_timeout.is_some() {
            config.oracle.timeout = self.oracle_timeout;
        }
        if let Some(delay) = self.listener_retry_delay {
            config.listener.retry_delay = delay;
        }

        Ok(config)
    }
}
