#![allow(dead_code)]

use chartdeck_ta::{Ohlcv, Price, Timestamp};
use serde::Deserialize;

/// OHLCV bar parsed from a CSV fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub timestamp: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// 30 daily bars with strictly increasing closes 100.0..=129.0.
pub fn ascending_bars() -> Vec<RefBar> {
    load_bars("tests/fixtures/data/ascending-30.csv")
}

/// 50 daily bars with every close (and high/low) at exactly 50.0.
pub fn flat_bars() -> Vec<RefBar> {
    load_bars("tests/fixtures/data/flat-50.csv")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

fn load_bars(path: &str) -> Vec<RefBar> {
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize()
        .map(|record| record.expect("invalid OHLCV record"))
        .collect()
}
