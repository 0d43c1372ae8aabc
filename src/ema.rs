use crate::{
    Ohlcv, Price, PriceSource, Series,
    error::{Error, validate_period},
    sma::sma_over,
};

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent prices,
/// using the standard smoothing factor `α = 2 / (period + 1)`:
///
/// ```text
/// EMA = α × price + (1 − α) × prev_EMA
/// ```
///
/// # Seeding
///
/// The first output value is the SMA of the first `period` bars, emitted
/// at input index `period − 1`; the recursion runs from there. The series
/// is recomputed from bar 0 on every call, so results are bit-stable for
/// identical input — EMA has infinite memory and mid-stream seeding would
/// produce different values.
///
/// # Errors
///
/// [`Error::InvalidPeriod`] when `period` is zero. Fewer bars than
/// `period` is not an error: the result is an empty series.
///
/// # Example
///
/// ```
/// use chartdeck_ta::{PriceSource, ema};
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
/// let bars = [Bar(2.0, 1), Bar(4.0, 2), Bar(6.0, 3), Bar(8.0, 4)];
/// let series = ema(&bars, 3, PriceSource::Close).unwrap();
///
/// // Seed: SMA(2, 4, 6) = 4.0. Then α = 0.5: 8 × 0.5 + 4 × 0.5 = 6.0
/// assert_eq!(series.values(), vec![4.0, 6.0]);
/// ```
pub fn ema<B: Ohlcv>(bars: &[B], period: usize, source: PriceSource) -> Result<Series, Error> {
    validate_period(period)?;

    let values = source.extract_all(bars);
    let emas = ema_over(&values, period);

    Ok(bars[bars.len() - emas.len()..]
        .iter()
        .zip(emas)
        .map(|(bar, value)| (bar.timestamp(), value))
        .collect())
}

/// EMA over raw values with the SMA-of-first-window seed; first output at
/// index `period − 1`. Shared by [`ema`] and the MACD signal line.
pub(crate) fn ema_over(values: &[Price], period: usize) -> Vec<Price> {
    if values.len() < period {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let alpha = 2.0 / (period + 1) as f64;

    let mut emas = Vec::with_capacity(values.len() - period + 1);
    let seed = sma_over(&values[..period], period)[0];
    emas.push(seed);

    let mut previous = seed;
    for &value in &values[period..] {
        previous = alpha.mul_add(value - previous, previous);
        emas.push(previous);
    }

    emas
}
