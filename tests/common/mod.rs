#![allow(dead_code)]

use async_trait::async_trait;
use candy_dispenser::core::{Actuator, PriceOracle, PriceQuote};
use candy_dispenser::PriceLookupError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

pub const ADDRESS: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    On,
    Off,
}

#[derive(Default)]
pub struct RecordingActuator {
    transitions: Mutex<Vec<(Level, Instant)>>,
}

impl RecordingActuator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn levels(&self) -> Vec<Level> {
        self.transitions.lock().unwrap().iter().map(|(l, _)| *l).collect()
    }

    /// Hold time of every completed on/off pair, panicking on unpaired levels.
    pub fn holds(&self) -> Vec<Duration> {
        let transitions = self.transitions.lock().unwrap();
        assert_eq!(transitions.len() % 2, 0, "unpaired actuator transition");
        transitions
            .chunks(2)
            .map(|pair| {
                assert_eq!(pair[0].0, Level::On);
                assert_eq!(pair[1].0, Level::Off);
                pair[1].1 - pair[0].1
            })
            .collect()
    }
}

impl Actuator for RecordingActuator {
    fn on(&self) {
        self.transitions.lock().unwrap().push((Level::On, Instant::now()));
    }

    fn off(&self) {
        self.transitions.lock().unwrap().push((Level::Off, Instant::now()));
    }
}

/// Always answers with the same rate.
pub struct FixedOracle {
    rate: f32,
    pub calls: AtomicUsize,
}

impl FixedOracle {
    pub fn new(rate: f32) -> Arc<Self> {
        Arc::new(Self {
            rate,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceOracle for FixedOracle {
    async fn fetch_rate(&self, fiat_amount: f64) -> Result<PriceQuote, PriceLookupError> {
        assert_eq!(fiat_amount, 0.01);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PriceQuote::new(self.rate).unwrap())
    }
}

pub struct FailingOracle;

#[async_trait]
impl PriceOracle for FailingOracle {
    async fn fetch_rate(&self, _fiat_amount: f64) -> Result<PriceQuote, PriceLookupError> {
        Err(PriceLookupError::Status { status: 503 })
    }
}

/// Holds every lookup until the test opens the gate.
pub struct GatedOracle {
    rate: f32,
    gate: Semaphore,
}

impl GatedOracle {
    pub fn new(rate: f32) -> Arc<Self> {
        Arc::new(Self {
            rate,
            gate: Semaphore::new(0),
        })
    }

    pub fn open(&self, lookups: usize) {
        self.gate.add_permits(lookups);
    }
}

#[async_trait]
impl PriceOracle for GatedOracle {
    async fn fetch_rate(&self, _fiat_amount: f64) -> Result<PriceQuote, PriceLookupError> {
        self.gate.acquire().await.unwrap().forget();
        Ok(PriceQuote::new(self.rate).unwrap())
    }
}
