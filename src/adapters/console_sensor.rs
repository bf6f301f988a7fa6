use crate::core::channel::Publisher;
use crate::domain::model::SensorEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub fn parse_sensor_command(line: &str) -> Option<SensorEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "p" | "press" => Some(SensorEvent::Pressed),
        "r" | "release" => Some(SensorEvent::Released),
        _ => None,
    }
}

/// Manual sensor driven from a line-oriented input (stdin in the binary).
pub struct ConsoleSensor<R> {
    input: R,
}

impl<R: AsyncBufRead + Unpin> ConsoleSensor<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Publishes one event per recognised line until the input ends.
    pub async fn run(self, events: Publisher<SensorEvent>) {
        let mut lines = self.input.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Sensor input failed: {}", e);
                    break;
                }
            };

            match parse_sensor_command(&line) {
                Some(event) => {
                    if events.publish(event).await.is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => tracing::warn!("Unknown sensor command: {:?}", line.trim()),
            }
        }
    }
}
