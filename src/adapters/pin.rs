use crate::domain::ports::Actuator;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stand-in for a direct GPIO output: logs level changes and remembers them.
#[derive(Debug)]
pub struct SimulatedPin {
    pin: String,
    high: AtomicBool,
}

impl SimulatedPin {
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            high: AtomicBool::new(false),
        }
    }

    pub fn is_high(&self) -> bool {
        self.high.load(Ordering::SeqCst)
    }
}

impl Actuator for SimulatedPin {
    fn on(&self) {
        self.high.store(true, Ordering::SeqCst);
        tracing::info!(pin = %self.pin, "Motor pin high");
    }

    fn off(&self) {
        self.high.store(false, Ordering::SeqCst);
        tracing::info!(pin = %self.pin, "Motor pin low");
    }
}
