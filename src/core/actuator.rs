use crate::core::{Actuator, DispenseCommand};

/// Drives the dispensing output for the duration of a command.
pub struct ActuatorController<A: Actuator> {
    actuator: A,
}

/// Holds the output on; switching it off when dropped.
///
/// The dispense future may be dropped mid-hold (task abort, runtime
/// shutdown), so the release lives in `Drop` rather than after the sleep.
struct Engaged<'a, A: Actuator> {
    actuator: &'a A,
}

impl<'a, A: Actuator> Engaged<'a, A> {
    fn on(actuator: &'a A) -> Self {
        actuator.on();
        tracing::debug!("Actuator on");
        Self { actuator }
    }
}

impl<A: Actuator> Drop for Engaged<'_, A> {
    fn drop(&mut self) {
        self.actuator.off();
        tracing::debug!("Actuator off");
    }
}

impl<A: Actuator> ActuatorController<A> {
    pub fn new(actuator: A) -> Self {
        Self { actuator }
    }

    /// on, hold for `command.duration`, off. Blocks the calling task for the hold.
    pub async fn dispense(&self, command: DispenseCommand) {
        tracing::info!("Dispensing for a duration of {:?}", command.duration);

        let _engaged = Engaged::on(&self.actuator);
        tokio::time::sleep(command.duration).await;
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}
