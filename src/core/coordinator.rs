use crate::config::DispenserConfig;
use crate::core::actuator::ActuatorController;
use crate::core::calculator;
use crate::core::channel::{rendezvous, Publisher, Subscription};
use crate::core::normalizer::{normalize_chain, normalize_invoice};
use crate::core::{
    Actuator, DispenseCommand, Payment, PaymentKind, PriceOracle, RawChainTransaction, RawInvoice,
    SensorEvent,
};
use crate::utils::error::Result;
use tokio::task::JoinHandle;

/// Producer ends handed to the listeners.
pub struct Producers {
    /// Present only when a receiving address is configured.
    pub chain: Option<Publisher<RawChainTransaction>>,
    pub invoices: Publisher<RawInvoice>,
    pub sensor: Publisher<SensorEvent>,
}

pub struct PaymentSources {
    pub chain: Option<Subscription<RawChainTransaction>>,
    pub invoices: Subscription<RawInvoice>,
}

pub struct Sources {
    pub payments: PaymentSources,
    pub sensor: Subscription<SensorEvent>,
}

/// Creates every channel between the listeners and the coordinator.
pub fn wire(config: &DispenserConfig) -> (Producers, Sources) {
    let (chain_tx, chain_rx) = match config.receiving_address {
        Some(_) => {
            let (tx, rx) = rendezvous("chain");
            (Some(tx), Some(rx))
        }
        None => (None, None),
    };
    let (invoice_tx, invoice_rx) = rendezvous("invoice");
    let (sensor_tx, sensor_rx) = rendezvous("sensor");

    (
        Producers {
            chain: chain_tx,
            invoices: invoice_tx,
            sensor: sensor_tx,
        },
        Sources {
            payments: PaymentSources {
                chain: chain_rx,
                invoices: invoice_rx,
            },
            sensor: sensor_rx,
        },
    )
}

/// The payment-to-dispense decision loop.
///
/// Owns the actuator; handles one payment at a time from whichever source is
/// ready, with no priority between sources.
pub struct Coordinator<O: PriceOracle, A: Actuator> {
    config: DispenserConfig,
    oracle: O,
    controller: ActuatorController<A>,
}

impl<O: PriceOracle, A: Actuator> Coordinator<O, A> {
    pub fn new(config: DispenserConfig, oracle: O, controller: ActuatorController<A>) -> Self {
        Self {
            config,
            oracle,
            controller,
        }
    }

    /// Runs the startup self-test, then serves payments until a price lookup
    /// fails (returned as the error) or every payment source has closed.
    pub async fn run(self, mut sources: PaymentSources) -> Result<()> {
        self.self_test().await;

        loop {
            let payment = tokio::select! {
                Some(tx) = recv_optional(&mut sources.chain) => {
                    // chain subscription only exists alongside a receiving address
                    let address = self.config.receiving_address.as_deref().unwrap_or_default();
                    normalize_chain(&tx, address)
                }
                Some(invoice) = sources.invoices.recv() => normalize_invoice(&invoice),
                else => {
                    tracing::warn!("All payment sources closed, stopping dispenser");
                    return Ok(());
                }
            };

            self.handle(payment).await?;
        }
    }

    /// Unconditional dispense of the base duration, when one is configured.
    pub async fn self_test(&self) {
        if self.config.base_dispense.is_zero() {
            return;
        }
        tracing::info!(
            "Initial dispensing is on, dispensing for {:?}",
            self.config.base_dispense
        );
        self.controller
            .dispense(DispenseCommand::new(self.config.base_dispense))
            .await;
    }

    /// Quotes (on-chain only), computes and dispenses a single payment.
    ///
    /// Returns the command that was carried out, if any.
    pub async fn handle(&self, payment: Payment) -> Result<Option<DispenseCommand>> {
        tracing::info!(kind = %payment.kind, value = payment.value, "Payment received");

        let quote = match payment.kind {
            PaymentKind::OnChain => {
                let quote = self
                    .oracle
                    .fetch_rate(self.config.oracle.reference_amount)
                    .await
                    .inspect_err(|e| tracing::error!("Price lookup failed: {}", e))?;
                tracing::info!(%quote, "Fetched exchange rate");
                Some(quote)
            }
            PaymentKind::OffChain => None,
        };

        let Some(command) = calculator::compute(&payment, self.config.base_dispense, quote) else {
            tracing::warn!(kind = %payment.kind, "No dispense command for payment");
            return Ok(None);
        };
        self.controller.dispense(command).await;
        Ok(Some(command))
    }
}

async fn recv_optional<T>(subscription: &mut Option<Subscription<T>>) -> Option<T> {
    match subscription {
        Some(subscription) => subscription.recv().await,
        None => None,
    }
}

/// Logs manual sensor notifications. Runs apart from the decision loop.
pub struct SensorLogger;

impl SensorLogger {
    pub fn log(event: SensorEvent) {
        match event {
            SensorEvent::Pressed => tracing::info!("button pressed"),
            SensorEvent::Released => tracing::info!("button released"),
        }
    }

    pub fn spawn(mut events: Subscription<SensorEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                Self::log(event);
            }
            tracing::debug!("Sensor channel closed");
        })
    }
}
