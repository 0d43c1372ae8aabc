use crate::{
    Ohlcv, Series,
    error::{Error, validate_period},
};

/// Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Measures the speed and magnitude of recent close-to-close changes on a
/// 0–100 scale. Values above 70 are conventionally considered overbought;
/// below 30, oversold.
///
/// The first `period` changes are averaged with a simple mean (SMA seed);
/// subsequent gains and losses are smoothed with Wilder's method
/// (`α = 1 / period`):
///
/// ```text
/// avg_gain = (prev_avg_gain × (period − 1) + gain) / period
/// avg_loss = (prev_avg_loss × (period − 1) + loss) / period
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
/// ```
///
/// A window with no losses (`avg_loss == 0`, including a completely flat
/// window) yields exactly `100.0`; there is no division by zero and no
/// `NaN` in the output.
///
/// `period` changes need `period + 1` bars, so the first output point is
/// anchored at input index `period`.
///
/// # Errors
///
/// [`Error::InvalidPeriod`] when `period` is zero. Fewer than
/// `period + 1` bars is not an error: the result is an empty series.
///
/// # Example
///
/// ```
/// use chartdeck_ta::rsi;
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
/// // Changes: +2, −1, +2 → avg_gain = 4/3, avg_loss = 1/3 → RSI = 80
/// let bars = [Bar(10.0, 1), Bar(12.0, 2), Bar(11.0, 3), Bar(13.0, 4)];
/// let series = rsi(&bars, 3).unwrap();
///
/// assert_eq!(series.len(), 1);
/// assert!((series.last().unwrap().value - 80.0).abs() < 1e-10);
/// ```
pub fn rsi<B: Ohlcv>(bars: &[B], period: usize) -> Result<Series, Error> {
    validate_period(period)?;

    if bars.len() < period + 1 {
        return Ok(Series::empty());
    }

    #[allow(clippy::cast_precision_loss)]
    let period_f = period as f64;
    let period_minus_one = period_f - 1.0;

    let mut series = Series::with_capacity(bars.len() - period);

    // SMA seed over the first `period` changes
    let (mut avg_gain, mut avg_loss) = (0.0, 0.0);
    for pair in bars[..=period].windows(2) {
        let (gain, loss) = gain_and_loss(pair[0].close(), pair[1].close());
        avg_gain += gain;
        avg_loss += loss;
    }
    avg_gain /= period_f;
    avg_loss /= period_f;
    series.push(bars[period].timestamp(), rsi_from_averages(avg_gain, avg_loss));

    // Wilder smoothing for the rest
    for pair in bars[period..].windows(2) {
        let (gain, loss) = gain_and_loss(pair[0].close(), pair[1].close());
        avg_gain = avg_gain.mul_add(period_minus_one, gain) / period_f;
        avg_loss = avg_loss.mul_add(period_minus_one, loss) / period_f;
        series.push(pair[1].timestamp(), rsi_from_averages(avg_gain, avg_loss));
    }

    Ok(series)
}

#[inline]
fn gain_and_loss(prev_close: f64, close: f64) -> (f64, f64) {
    let change = close - prev_close;
    (change.max(0.0), (-change).max(0.0))
}

#[inline]
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
