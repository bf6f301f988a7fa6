pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{oracle::HttpPriceOracle, pin::SimulatedPin};
pub use config::DispenserConfig;
pub use self::core::{actuator::ActuatorController, coordinator::Coordinator};
pub use utils::error::{DispenserError, PriceLookupError, Result};
