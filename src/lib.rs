//! Batch technical indicators for OHLCV chart data.
//!
//! The engine consumes a time-ordered slice of bars (any type
//! implementing [`Ohlcv`]) and produces indicator series aligned to the
//! input timestamps, ready to merge with a charting layer's own
//! time-indexed plotting primitives. Everything is a pure function:
//! output is recomputed in full per call, there is no streaming state.
//!
//! Indicators with a warm-up window return an **empty** output when fewer
//! bars than the window are supplied — short history is an expected
//! condition while a chart loads, not an error. Invalid parameters (zero
//! periods, MACD fast ≥ slow) are [`Error`]s at call time.
//!
//! # Example
//!
//! ```
//! use chartdeck_ta::{PriceSource, Ohlcv, Price, Timestamp, rsi, sma};
//!
//! struct Bar(f64, u64);
//! impl Ohlcv for Bar {
//!     fn open(&self) -> Price { self.0 }
//!     fn high(&self) -> Price { self.0 }
//!     fn low(&self) -> Price { self.0 }
//!     fn close(&self) -> Price { self.0 }
//!     fn timestamp(&self) -> Timestamp { self.1 }
//! }
//!
//! let bars: Vec<Bar> = (0..30u32).map(|i| Bar(100.0 + f64::from(i), u64::from(i) + 1)).collect();
//!
//! let sma20 = sma(&bars, 20, PriceSource::Close).unwrap();
//! assert_eq!(sma20.len(), 11);
//!
//! // Monotonic rise: no losses in any window
//! let rsi14 = rsi(&bars, 14).unwrap();
//! assert!(rsi14.iter().all(|p| p.value == 100.0));
//! ```
//!
//! Screener-style classifications ([`crossovers`], [`classify_thresholds`],
//! [`volatility_regimes`], [`band_positions`]) are derived from the
//! indicator series; [`IndicatorSpec`] is the parameter registry the
//! chart layer dispatches through.

mod bollinger;
mod ema;
mod error;
mod indicator;
mod macd;
mod ohlcv;
mod price_source;
mod rsi;
mod series;
mod signal;
mod sma;
mod stochastic;

pub use crate::error::Error;
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::series::{Series, SeriesPoint};

pub use crate::bollinger::{BollingerPoint, bollinger};
pub use crate::ema::ema;
pub use crate::macd::{MacdPoint, macd};
pub use crate::rsi::rsi;
pub use crate::sma::sma;
pub use crate::stochastic::{StochPoint, stochastic};

pub use crate::indicator::{IndicatorOutput, IndicatorSpec, Multiplier};
pub use crate::signal::{
    BandPosition, Crossover, RegimeThresholds, ThresholdBand, VolatilityRegime, band_positions,
    classify_thresholds, crossovers, volatility_regimes,
};

#[cfg(test)]
mod test_util;
