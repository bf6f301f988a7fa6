use anyhow::Context;
use candy_dispenser::adapters::console_sensor::ConsoleSensor;
use candy_dispenser::adapters::listeners::{ChainListener, InvoiceListener};
use candy_dispenser::core::coordinator::{self, SensorLogger};
use candy_dispenser::utils::{logger, validation::Validate};
use candy_dispenser::{
    ActuatorController, CliConfig, Coordinator, DispenserError, HttpPriceOracle, SimulatedPin,
};
use clap::Parser;
use tokio::io::BufReader;

const MOTOR_PIN: &str = "13";

fn fail(e: &DispenserError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting candy-dispenser");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Dispenser config: {:?}", config);
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let (producers, sources) = coordinator::wire(&config);

    if let (Some(publisher), Some(address), Some(feed)) = (
        producers.chain,
        config.receiving_address.as_ref(),
        config.chain_feed.as_ref(),
    ) {
        let listener = ChainListener::new(feed, address, config.listener.retry_delay);
        tokio::spawn(listener.run(publisher));
    }

    for endpoint in &config.invoice_subscriptions {
        let listener = InvoiceListener::new(endpoint, config.listener.retry_delay);
        tokio::spawn(listener.run(producers.invoices.clone()));
    }
    drop(producers.invoices);

    SensorLogger::spawn(sources.sensor);
    tokio::spawn(ConsoleSensor::new(BufReader::new(tokio::io::stdin())).run(producers.sensor));

    let oracle = HttpPriceOracle::new(&config.oracle).context("price service client")?;
    let controller = ActuatorController::new(SimulatedPin::new(MOTOR_PIN));
    let dispenser = Coordinator::new(config, oracle, controller);

    if let Err(e) = dispenser.run(sources.payments).await {
        fail(&e);
    }

    tracing::info!("Dispenser stopped");
    Ok(())
}
