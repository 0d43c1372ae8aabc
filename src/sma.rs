use crate::{
    Ohlcv, Price, PriceSource, Series,
    error::{Error, validate_period},
};

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the trailing `period` values. The first
/// output point is anchored at input index `period − 1` (the bar where the
/// window first becomes full), so `len(bars)` inputs yield
/// `len(bars) − period + 1` points.
///
/// Uses a running sum for O(n) total work regardless of window length.
///
/// # Errors
///
/// [`Error::InvalidPeriod`] when `period` is zero. Fewer bars than
/// `period` is not an error: the result is an empty series.
///
/// # Example
///
/// ```
/// use chartdeck_ta::{PriceSource, sma};
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
/// let bars = [Bar(10.0, 1), Bar(20.0, 2), Bar(30.0, 3)];
/// let series = sma(&bars, 3, PriceSource::Close).unwrap();
///
/// assert_eq!(series.len(), 1);
/// assert_eq!(series.last().unwrap().timestamp, 3);
/// assert_eq!(series.last().unwrap().value, 20.0);
/// ```
pub fn sma<B: Ohlcv>(bars: &[B], period: usize, source: PriceSource) -> Result<Series, Error> {
    validate_period(period)?;

    let values = source.extract_all(bars);
    let means = sma_over(&values, period);

    Ok(bars[bars.len() - means.len()..]
        .iter()
        .zip(means)
        .map(|(bar, mean)| (bar.timestamp(), mean))
        .collect())
}

/// SMA over raw values; one output per full window, anchored at the window
/// end. Shared by [`sma`], the EMA seed, and stochastic smoothing.
pub(crate) fn sma_over(values: &[Price], period: usize) -> Vec<Price> {
    if values.len() < period {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let period_reciprocal = 1.0 / period as f64;

    let mut means = Vec::with_capacity(values.len() - period + 1);
    let mut sum: f64 = values[..period].iter().sum();
    means.push(sum * period_reciprocal);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        means.push(sum * period_reciprocal);
    }

    means
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{Bar, assert_approx, bar, bars_from_closes};

    mod warm_up {
        use super::*;

        #[test]
        fn empty_when_fewer_bars_than_period() {
            let bars = bars_from_closes(&[10.0, 20.0]);
            assert!(sma(&bars, 3, PriceSource::Close).unwrap().is_empty());
        }

        #[test]
        fn empty_input_gives_empty_series() {
            let bars: [Bar; 0] = [];
            assert!(sma(&bars, 3, PriceSource::Close).unwrap().is_empty());
        }

        #[test]
        fn first_point_anchored_at_window_end() {
            let bars = bars_from_closes(&[10.0, 20.0, 30.0, 40.0]);
            let series = sma(&bars, 3, PriceSource::Close).unwrap();
            assert_eq!(series.len(), 2);
            // timestamps from bars_from_closes are 1-based
            assert_eq!(series.points()[0].timestamp, 3);
        }
    }

    mod computation {
        use super::*;

        #[test]
        fn mean_of_each_window() {
            let bars = bars_from_closes(&[10.0, 20.0, 30.0, 40.0, 50.0]);
            let series = sma(&bars, 2, PriceSource::Close).unwrap();
            assert_eq!(series.values(), vec![15.0, 25.0, 35.0, 45.0]);
        }

        #[test]
        fn constant_input_returns_constant() {
            let bars = bars_from_closes(&[7.0; 10]);
            let series = sma(&bars, 4, PriceSource::Close).unwrap();
            assert_eq!(series.len(), 7);
            for point in &series {
                assert_approx!(point.value, 7.0);
            }
        }

        #[test]
        fn period_one_echoes_input() {
            let bars = bars_from_closes(&[3.0, 1.0, 4.0]);
            let series = sma(&bars, 1, PriceSource::Close).unwrap();
            assert_eq!(series.values(), vec![3.0, 1.0, 4.0]);
        }

        #[test]
        fn window_equal_to_input_gives_single_mean() {
            let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0]);
            let series = sma(&bars, 4, PriceSource::Close).unwrap();
            assert_eq!(series.values(), vec![2.5]);
        }
    }

    mod price_source {
        use super::*;

        #[test]
        fn hl2_source() {
            // HL2 = (high + low) / 2
            let bars = [
                Bar::new(0.0, 20.0, 10.0, 0.0).at(1), // HL2 = 15
                Bar::new(0.0, 30.0, 20.0, 0.0).at(2), // HL2 = 25
            ];
            let series = sma(&bars, 2, PriceSource::HL2).unwrap();
            assert_eq!(series.values(), vec![20.0]);
        }
    }

    mod parameters {
        use super::*;

        #[test]
        fn zero_period_is_an_error() {
            let bars = [bar(10.0, 1)];
            assert_eq!(
                sma(&bars, 0, PriceSource::Close),
                Err(Error::InvalidPeriod { period: 0 })
            );
        }
    }
}
