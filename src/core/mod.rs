pub mod actuator;
pub mod calculator;
pub mod channel;
pub mod coordinator;
pub mod normalizer;

pub use crate::domain::model::{
    DispenseCommand, Payment, PaymentKind, PriceQuote, RawChainTransaction, RawInvoice,
    SensorEvent, TxOutput,
};
pub use crate::domain::ports::{Actuator, PriceOracle};
pub use crate::utils::error::Result;
