use thiserror::Error;

/// Failure while asking the price service for the current exchange rate.
#[derive(Error, Debug)]
pub enum PriceLookupError {
    #[error("price request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("price service answered with status {status}")]
    Status { status: u16 },

    #[error("price service returned a non-numeric body: {body:?}")]
    Malformed { body: String },

    #[error("price service returned a non-positive rate: {rate}")]
    NonPositive { rate: f32 },
}

#[derive(Error, Debug)]
pub enum DispenserError {
    #[error("Price lookup failed: {0}")]
    PriceLookup(#[from] PriceLookupError),

    #[error("Listener request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("The {channel} channel is closed")]
    ChannelClosed { channel: &'static str },
}

impl DispenserError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DispenserError::ConfigError { .. }
                | DispenserError::InvalidConfigValueError { .. }
                | DispenserError::MissingConfigError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DispenserError::PriceLookup(_) => {
                "Check connectivity to the price service, then restart the dispenser"
            }
            DispenserError::Http(_) => "Check that the listener endpoints are reachable",
            DispenserError::Io(_) => "Check file paths and permissions",
            DispenserError::Serialization(_) => "Check the payload format sent by the listeners",
            DispenserError::ConfigError { .. }
            | DispenserError::InvalidConfigValueError { .. }
            | DispenserError::MissingConfigError { .. } => {
                "Fix the command line flags or the configuration file"
            }
            DispenserError::ChannelClosed { .. } => "Restart the dispenser",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            e if e.is_config_error() => 1,
            DispenserError::PriceLookup(_) => 2,
            _ => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DispenserError>;
