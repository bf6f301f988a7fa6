// Adapters layer: concrete implementations for external systems (price service, listeners, pins).

pub mod console_sensor;
pub mod listeners;
pub mod oracle;
pub mod pin;
