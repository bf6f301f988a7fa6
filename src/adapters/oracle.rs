use crate::config::OracleConfig;
use crate::domain::model::PriceQuote;
use crate::domain::ports::PriceOracle;
use crate::utils::error::{DispenserError, PriceLookupError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Price service speaking the blockchain.info `tobtc` dialect:
/// `GET <endpoint>?currency=USD&value=0.01` answered by a plain decimal body.
#[derive(Debug, Clone)]
pub struct HttpPriceOracle {
    client: Client,
    endpoint: String,
    currency: String,
}

impl HttpPriceOracle {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DispenserError::ConfigError {
            message: format!("Cannot build price service client: {}", e),
        })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            currency: config.currency.clone(),
        })
    }
}

/// Parses the price service body. Single precision, like the service's own
/// rounding of the rate.
pub fn parse_quote(body: &str) -> std::result::Result<PriceQuote, PriceLookupError> {
    let trimmed = body.trim();
    let rate: f32 = trimmed.parse().map_err(|_| PriceLookupError::Malformed {
        body: trimmed.to_string(),
    })?;
    PriceQuote::new(rate).ok_or(PriceLookupError::NonPositive { rate })
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn fetch_rate(
        &self,
        fiat_amount: f64,
    ) -> std::result::Result<PriceQuote, PriceLookupError> {
        tracing::debug!("Requesting rate from: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("currency", self.currency.clone()),
                ("value", fiat_amount.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Price service response status: {}", status);
        if !status.is_success() {
            return Err(PriceLookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_quote(&body)
    }
}
