use crate::{
    Ohlcv, Price, Timestamp,
    error::{Error, validate_period},
    sma::sma_over,
};

use std::fmt::Display;

/// One slow-stochastic output point: smoothed %K and %D share the
/// timestamp.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct StochPoint {
    timestamp: Timestamp,
    k: Price,
    d: Price,
}

impl StochPoint {
    /// Timestamp of the bar this point is anchored to.
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Smoothed %K line.
    #[inline]
    #[must_use]
    pub fn k(&self) -> Price {
        self.k
    }

    /// %D line: SMA of the smoothed %K.
    #[inline]
    #[must_use]
    pub fn d(&self) -> Price {
        self.d
    }
}

impl Display for StochPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stoch(k: {}, d: {})", self.k, self.d)
    }
}

/// Slow stochastic oscillator.
///
/// Compares the close to the trailing high/low range on a 0–100 scale
/// (conventionally 14/3/3; above 80 overbought, below 20 oversold):
///
/// ```text
/// raw %K = 100 × (close − LL) / (HH − LL)   over the last k_period bars
/// %K     = SMA(raw %K, k_smooth)
/// %D     = SMA(%K, d_period)
/// ```
///
/// A window whose high equals its low (zero range) yields `%K = 50.0`,
/// the scale midpoint, rather than a division by zero.
///
/// Output is trimmed to timestamps where both lines exist; the first point
/// is anchored at input index `k_period + k_smooth + d_period − 3`.
///
/// # Errors
///
/// [`Error::InvalidPeriod`] when any period is zero. Too few bars is not
/// an error: the result is empty.
pub fn stochastic<B: Ohlcv>(
    bars: &[B],
    k_period: usize,
    k_smooth: usize,
    d_period: usize,
) -> Result<Vec<StochPoint>, Error> {
    validate_period(k_period)?;
    validate_period(k_smooth)?;
    validate_period(d_period)?;

    if bars.len() < k_period {
        return Ok(Vec::new());
    }

    // Raw %K, one value per full high/low window. Windows are rescanned
    // per bar; bar counts here are small enough that a monotonic-deque
    // rolling extremum is not worth the code.
    let raw_k: Vec<Price> = (k_period - 1..bars.len())
        .map(|i| {
            let window = &bars[i + 1 - k_period..=i];
            let highest = window.iter().map(Ohlcv::high).fold(f64::MIN, f64::max);
            let lowest = window.iter().map(Ohlcv::low).fold(f64::MAX, f64::min);
            let range = highest - lowest;
            if range == 0.0 {
                50.0
            } else {
                100.0 * (bars[i].close() - lowest) / range
            }
        })
        .collect();

    let k_line = sma_over(&raw_k, k_smooth);
    let d_line = sma_over(&k_line, d_period);

    let first_bar = k_period + k_smooth + d_period - 3;
    Ok(d_line
        .into_iter()
        .enumerate()
        .map(|(j, d)| StochPoint {
            timestamp: bars[first_bar + j].timestamp(),
            k: k_line[d_period - 1 + j],
            d,
        })
        .collect())
}
