use crate::{
    Ohlcv, Price, PriceSource, Timestamp,
    ema::ema_over,
    error::{Error, validate_period},
};

use std::fmt::Display;

/// One MACD output point: line, signal, and histogram share the timestamp.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct MacdPoint {
    timestamp: Timestamp,
    macd: Price,
    signal: Price,
    histogram: Price,
}

impl MacdPoint {
    /// Timestamp of the bar this point is anchored to.
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// MACD line: `EMA(fast) − EMA(slow)`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// Histogram: `macd − signal`.
    ///
    /// Positive while the MACD line is above its signal (bullish
    /// momentum), negative below.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

impl Display for MacdPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(m: {}, s: {}, h: {})",
            self.macd, self.signal, self.histogram
        )
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// Computed on closing prices with the three standard parameters
/// (conventionally 12/26/9):
///
/// ```text
/// macd      = EMA(close, fast) − EMA(close, slow)
/// signal    = EMA(macd, signal_period)
/// histogram = macd − signal
/// ```
///
/// The MACD line is aligned to the slow EMA's start; the signal line is an
/// SMA-seeded EMA over the MACD line itself. Output is trimmed to the
/// timestamps where all three values exist, so the first point is anchored
/// where the signal line's warm-up completes.
///
/// # Errors
///
/// [`Error::InvalidPeriod`] when any period is zero,
/// [`Error::FastNotBelowSlow`] when `fast ≥ slow`. Fewer than
/// `slow + signal_period` bars is not an error: the result is empty.
///
/// # Example
///
/// ```
/// use chartdeck_ta::macd;
/// # use chartdeck_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn timestamp(&self) -> Timestamp { self.1 }
/// # }
///
/// let bars: Vec<Bar> = (0..40u32).map(|i| Bar(100.0 + f64::from(i), u64::from(i) + 1)).collect();
/// let points = macd(&bars, 12, 26, 9).unwrap();
///
/// assert!(!points.is_empty());
/// for p in &points {
///     assert!((p.histogram() - (p.macd() - p.signal())).abs() < 1e-12);
/// }
/// ```
pub fn macd<B: Ohlcv>(
    bars: &[B],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<Vec<MacdPoint>, Error> {
    validate_period(fast)?;
    validate_period(slow)?;
    validate_period(signal_period)?;
    if fast >= slow {
        return Err(Error::FastNotBelowSlow { fast, slow });
    }

    if bars.len() < slow + signal_period {
        return Ok(Vec::new());
    }

    let closes = PriceSource::Close.extract_all(bars);
    let fast_ema = ema_over(&closes, fast);
    let slow_ema = ema_over(&closes, slow);

    // Drop fast-EMA points that precede the slow EMA's start
    let offset = slow - fast;
    let macd_line: Vec<Price> = slow_ema
        .iter()
        .enumerate()
        .map(|(i, slow_value)| fast_ema[i + offset] - slow_value)
        .collect();

    let signal_line = ema_over(&macd_line, signal_period);

    // First signal point: bar index (slow − 1) + (signal_period − 1)
    let first_bar = slow + signal_period - 2;
    Ok(signal_line
        .into_iter()
        .enumerate()
        .map(|(j, signal)| {
            let macd = macd_line[signal_period - 1 + j];
            MacdPoint {
                timestamp: bars[first_bar + j].timestamp(),
                macd,
                signal,
                histogram: macd - signal,
            }
        })
        .collect())
}
