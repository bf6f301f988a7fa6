use crate::core::channel::Publisher;
use crate::domain::model::{RawChainTransaction, RawInvoice, TxOutput};
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// blockchain.info style unconfirmed-transaction message.
#[derive(Debug, Deserialize)]
struct UtxMessage {
    x: UtxBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UtxBody {
    out: Vec<UtxOutput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UtxOutput {
    addr: Option<String>,
    value: u64,
}

impl From<UtxMessage> for RawChainTransaction {
    fn from(message: UtxMessage) -> Self {
        RawChainTransaction {
            outputs: message
                .x
                .out
                .into_iter()
                .map(|out| TxOutput {
                    address: out.addr,
                    value: out.value,
                })
                .collect(),
        }
    }
}

pub fn decode_utx(payload: &serde_json::Value) -> Result<RawChainTransaction> {
    let message = UtxMessage::deserialize(payload)?;
    Ok(message.into())
}

/// Reads the settled amount of an invoice notification; anything that is not
/// a non-negative integer counts as 0.
pub fn decode_invoice(payload: &serde_json::Value) -> RawInvoice {
    RawInvoice {
        value: payload
            .get("value")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0),
    }
}

async fn long_poll(request: reqwest::RequestBuilder) -> Result<Option<serde_json::Value>> {
    let response = request.send().await?;
    tracing::debug!("Listener response status: {}", response.status());

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let response = response.error_for_status()?;
    let text = response.text().await?;
    Ok(Some(serde_json::from_str(&text)?))
}

/// Long-polls one lightning subscription endpoint for settled invoices.
pub struct InvoiceListener {
    client: Client,
    endpoint: String,
    retry_delay: Duration,
}

impl InvoiceListener {
    pub fn new(endpoint: impl Into<String>, retry_delay: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            retry_delay,
        }
    }

    /// One request: `None` when nothing has settled yet.
    pub async fn poll_once(&self) -> Result<Option<RawInvoice>> {
        let payload = long_poll(self.client.get(&self.endpoint)).await?;
        Ok(payload.as_ref().map(decode_invoice))
    }

    /// Publishes invoices until the coordinator stops listening. An empty
    /// poll waits `retry_delay` before asking again.
    pub async fn run(self, invoices: Publisher<RawInvoice>) {
        tracing::info!(channel = invoices.name(), "Listening for invoices on {}", self.endpoint);
        loop {
            match self.poll_once().await {
                Ok(Some(invoice)) => {
                    tracing::debug!(value = invoice.value, "Invoice settled");
                    if invoices.publish(invoice).await.is_err() {
                        break;
                    }
                }
                Ok(None) => tokio::time::sleep(self.retry_delay).await,
                Err(e) => {
                    tracing::warn!("Invoice subscription {} failed: {}", self.endpoint, e);
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
            if invoices.is_closed() {
                break;
            }
        }
        tracing::info!(channel = invoices.name(), "Invoice listener for {} stopped", self.endpoint);
    }
}

/// Long-polls a transaction feed for the receiving address.
pub struct ChainListener {
    client: Client,
    feed: String,
    address: String,
    retry_delay: Duration,
}

impl ChainListener {
    pub fn new(feed: impl Into<String>, address: impl Into<String>, retry_delay: Duration) -> Self {
        Self {
            client: Client::new(),
            feed: feed.into(),
            address: address.into(),
            retry_delay,
        }
    }

    pub async fn poll_once(&self) -> Result<Option<RawChainTransaction>> {
        let request = self
            .client
            .get(&self.feed)
            .query(&[("address", self.address.as_str())]);
        match long_poll(request).await? {
            Some(payload) => Ok(Some(decode_utx(&payload)?)),
            None => Ok(None),
        }
    }

    pub async fn run(self, transactions: Publisher<RawChainTransaction>) {
        tracing::info!(
            channel = transactions.name(),
            "Watching {} via {}",
            self.address,
            self.feed
        );
        loop {
            match self.poll_once().await {
                Ok(Some(tx)) => {
                    tracing::debug!(outputs = tx.outputs.len(), "Transaction observed");
                    if transactions.publish(tx).await.is_err() {
                        break;
                    }
                }
                Ok(None) => tokio::time::sleep(self.retry_delay).await,
                Err(e) => {
                    tracing::warn!("Transaction feed {} failed: {}", self.feed, e);
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
            if transactions.is_closed() {
                break;
            }
        }
        tracing::info!(
            channel = transactions.name(),
            "Chain listener for {} stopped",
            self.address
        );
    }
}
