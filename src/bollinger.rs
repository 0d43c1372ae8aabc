use crate::{
    Ohlcv, Price, PriceSource, Timestamp,
    error::{Error, validate_multiplier, validate_period},
};

use std::fmt::Display;

/// One Bollinger Bands output point.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct BollingerPoint {
    timestamp: Timestamp,
    upper: Price,
    middle: Price,
    lower: Price,
    bandwidth: f64,
}

impl BollingerPoint {
    /// Timestamp of the bar this point is anchored to.
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Upper band: `middle + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Middle band: SMA of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lower band: `middle − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }

    /// Relative band width: `(upper − lower) / middle`, or `0.0` when the
    /// middle band is zero.
    ///
    /// Narrow bandwidth indicates consolidation (Bollinger squeeze); wide
    /// bandwidth indicates high volatility. Feed a bandwidth series to
    /// [`volatility_regimes`](crate::volatility_regimes) to classify.
    #[inline]
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

impl Display for BollingerPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger Bands.
///
/// A volatility indicator consisting of three bands: a simple moving
/// average (middle) with upper and lower bands offset by `multiplier`
/// (conventionally 2.0) population standard deviations of the window:
///
/// ```text
/// σ² = E[X²] − mean²          (divide by period, not period − 1)
/// upper  = mean + k × σ
/// lower  = mean − k × σ
/// ```
///
/// Population σ matches the moving-window semantics; parity with a host
/// charting library that uses the sample estimator would need `period − 1`
/// in the divisor instead.
///
/// The first point is anchored at input index `period − 1`, like
/// [`sma`](crate::sma).
///
/// # Errors
///
/// [`Error::InvalidPeriod`] when `period` is zero,
/// [`Error::InvalidMultiplier`] when `multiplier` is not finite and
/// positive. Fewer bars than `period` is not an error: the result is
/// empty.
///
/// # Example
///
/// ```
/// use chartdeck_ta::{PriceSource, bollinger};
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
/// // Window [3, 5]: mean = 4, σ = 1, k = 2
/// let bars = [Bar(3.0, 1), Bar(5.0, 2)];
/// let points = bollinger(&bars, 2, 2.0, PriceSource::Close).unwrap();
///
/// assert_eq!(points[0].upper(), 6.0);
/// assert_eq!(points[0].middle(), 4.0);
/// assert_eq!(points[0].lower(), 2.0);
/// ```
pub fn bollinger<B: Ohlcv>(
    bars: &[B],
    period: usize,
    multiplier: f64,
    source: PriceSource,
) -> Result<Vec<BollingerPoint>, Error> {
    validate_period(period)?;
    validate_multiplier(multiplier)?;

    if bars.len() < period {
        return Ok(Vec::new());
    }

    #[allow(clippy::cast_precision_loss)]
    let period_reciprocal = 1.0 / period as f64;
    let values = source.extract_all(bars);

    let mut points = Vec::with_capacity(bars.len() - period + 1);
    let mut sum: f64 = values[..period].iter().sum();
    let mut sum_of_squares: f64 = values[..period].iter().map(|v| v * v).sum();

    for i in period - 1..values.len() {
        if i >= period {
            let (old, new) = (values[i - period], values[i]);
            sum += new - old;
            sum_of_squares += new * new - old * old;
        }

        let mean = sum * period_reciprocal;
        // Variance = E[X²] − mean²; clamp tiny negative rounding residue
        let variance = sum_of_squares.mul_add(period_reciprocal, -(mean * mean));
        let offset = variance.max(0.0).sqrt() * multiplier;

        let (upper, lower) = (mean + offset, mean - offset);
        points.push(BollingerPoint {
            timestamp: bars[i].timestamp(),
            upper,
            middle: mean,
            lower,
            bandwidth: if mean == 0.0 { 0.0 } else { (upper - lower) / mean },
        });
    }

    Ok(points)
}
