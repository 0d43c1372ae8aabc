//! Screener signal classifiers derived from indicator series.
//!
//! Each classifier is a pure function over one or two [`Series`] (or bars
//! plus a band envelope) and static thresholds. Classifications depend
//! only on the values at — and for crossovers, immediately before — the
//! timestamp in question.

use crate::{
    BollingerPoint, Ohlcv, Series, Timestamp,
    error::{Error, validate_multiplier, validate_period},
};

use std::fmt::Display;

/// Direction of a crossover between two series.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Crossover {
    /// The first series crossed from at-or-below to above the second.
    Bullish,
    /// The first series crossed from at-or-above to below the second.
    Bearish,
}

impl Display for Crossover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Detects crossovers of series `a` over series `b`.
///
/// The series are joined on their shared timestamps; at joined index `i`
/// (requiring `i − 1`), a bullish crossover is
/// `a[i−1] ≤ b[i−1] ∧ a[i] > b[i]` and a bearish crossover is the mirror.
/// Only event timestamps are returned; an empty result means no crossing
/// occurred (or fewer than two shared points exist).
///
/// Used for SMA20-over-SMA50, MACD-line-over-signal, and stochastic
/// %K-over-%D style screens.
///
/// # Example
///
/// ```
/// use chartdeck_ta::{Crossover, Series, crossovers};
///
/// let a: Series = [(1, 1.0), (2, 3.0)].into_iter().collect();
/// let b: Series = [(1, 2.0), (2, 2.0)].into_iter().collect();
///
/// assert_eq!(crossovers(&a, &b), vec![(2, Crossover::Bullish)]);
/// ```
#[must_use]
pub fn crossovers(a: &Series, b: &Series) -> Vec<(Timestamp, Crossover)> {
    let joined = Series::join(a, b);

    joined
        .windows(2)
        .filter_map(|pair| {
            let (_, prev_a, prev_b) = pair[0];
            let (timestamp, cur_a, cur_b) = pair[1];

            if prev_a <= prev_b && cur_a > cur_b {
                Some((timestamp, Crossover::Bullish))
            } else if prev_a >= prev_b && cur_a < cur_b {
                Some((timestamp, Crossover::Bearish))
            } else {
                None
            }
        })
        .collect()
}

/// Position of a value relative to a `[lower, upper]` band.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ThresholdBand {
    /// Strictly below the lower bound (e.g. RSI < 30: oversold).
    Below,
    /// Inside the closed band.
    Within,
    /// Strictly above the upper bound (e.g. RSI > 70: overbought).
    Above,
}

impl Display for ThresholdBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Classifies every point of a series against a `[lower, upper]` band.
///
/// The conventional oscillator screens are `classify_thresholds(&rsi, 30.0,
/// 70.0)` and `classify_thresholds(&stoch_k, 20.0, 80.0)`; MACD
/// bullish/bearish state is the histogram against `(0.0, 0.0)`.
///
/// # Errors
///
/// [`Error::InvalidBounds`] when `lower > upper` or either bound is not
/// finite.
pub fn classify_thresholds(
    series: &Series,
    lower: f64,
    upper: f64,
) -> Result<Vec<(Timestamp, ThresholdBand)>, Error> {
    if !(lower.is_finite() && upper.is_finite()) || lower > upper {
        return Err(Error::InvalidBounds { lower, upper });
    }

    Ok(series
        .iter()
        .map(|point| {
            let band = if point.value < lower {
                ThresholdBand::Below
            } else if point.value > upper {
                ThresholdBand::Above
            } else {
                ThresholdBand::Within
            };
            (point.timestamp, band)
        })
        .collect())
}

/// Volatility regime of a bandwidth series point within its trailing
/// window.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum VolatilityRegime {
    /// Bandwidth at or near the trailing window's minimum (contraction).
    Squeeze,
    /// Neither extreme.
    Normal,
    /// Bandwidth at or near the trailing window's maximum (expansion).
    Expansion,
}

impl Display for VolatilityRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Percentile knobs for [`volatility_regimes`].
///
/// The percentile of a point is its position within the trailing window's
/// `[min, max]` value range. Defaults classify the bottom decile as
/// squeeze and the top decile as expansion; both knobs are adjustable.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct RegimeThresholds {
    /// At or below this percentile of the window range: squeeze.
    pub squeeze: f64,
    /// At or above this percentile of the window range: expansion.
    pub expansion: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            squeeze: 0.10,
            expansion: 0.90,
        }
    }
}

/// Classifies the volatility regime of each bandwidth point against its
/// trailing `lookback` window (window includes the point itself).
///
/// A window with zero value range — a completely flat bandwidth, as a flat
/// price series produces — classifies as [`VolatilityRegime::Squeeze`]:
/// the current value sits exactly at the window minimum.
///
/// The first classification is produced once `lookback` points exist;
/// fewer points yield an empty result.
///
/// # Errors
///
/// [`Error::InvalidPeriod`] when `lookback` is zero,
/// [`Error::InvalidThresholds`] when the knobs leave `0 ≤ squeeze ≤
/// expansion ≤ 1`.
pub fn volatility_regimes(
    bandwidth: &Series,
    lookback: usize,
    thresholds: RegimeThresholds,
) -> Result<Vec<(Timestamp, VolatilityRegime)>, Error> {
    validate_period(lookback)?;
    let RegimeThresholds { squeeze, expansion } = thresholds;
    if !(squeeze.is_finite() && expansion.is_finite())
        || squeeze < 0.0
        || expansion > 1.0
        || squeeze > expansion
    {
        return Err(Error::InvalidThresholds { squeeze, expansion });
    }

    let points = bandwidth.points();
    if points.len() < lookback {
        return Ok(Vec::new());
    }

    Ok((lookback - 1..points.len())
        .map(|i| {
            let window = &points[i + 1 - lookback..=i];
            let min = window.iter().map(|p| p.value).fold(f64::MAX, f64::min);
            let max = window.iter().map(|p| p.value).fold(f64::MIN, f64::max);

            let regime = if max == min {
                VolatilityRegime::Squeeze
            } else {
                let percentile = (points[i].value - min) / (max - min);
                if percentile <= squeeze {
                    VolatilityRegime::Squeeze
                } else if percentile >= expansion {
                    VolatilityRegime::Expansion
                } else {
                    VolatilityRegime::Normal
                }
            };

            (points[i].timestamp, regime)
        })
        .collect())
}

/// Position of the closing price relative to a Bollinger band envelope.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum BandPosition {
    /// Close above the upper band.
    AboveUpper,
    /// Close within `tolerance × width` of the upper band.
    NearUpper,
    /// Close within `tolerance × width / 2` of the middle band.
    NearMiddle,
    /// Close within `tolerance × width` of the lower band.
    NearLower,
    /// Close below the lower band.
    BelowLower,
    /// Inside the envelope but near no band.
    Between,
}

impl Display for BandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Classifies each bar's close against the band envelope at the same
/// timestamp.
///
/// `tolerance` is the fraction of the band width considered "near" a band
/// (0.2 is the conventional screener setting). Classification precedence:
/// outside the envelope first, then near-upper, near-lower, near-middle.
/// Zero-width bands (flat window) classify as
/// [`BandPosition::NearMiddle`].
///
/// Bars without a matching band point (the warm-up prefix) are skipped.
///
/// # Errors
///
/// [`Error::InvalidMultiplier`] when `tolerance` is not finite and
/// positive.
pub fn band_positions<B: Ohlcv>(
    bars: &[B],
    bands: &[BollingerPoint],
    tolerance: f64,
) -> Result<Vec<(Timestamp, BandPosition)>, Error> {
    validate_multiplier(tolerance)?;

    let mut positions = Vec::with_capacity(bands.len());
    let mut bars_iter = bars.iter();

    for band in bands {
        let Some(bar) = bars_iter.find(|bar| bar.timestamp() == band.timestamp()) else {
            continue;
        };

        let close = bar.close();
        let width = band.upper() - band.lower();

        let position = if close > band.upper() {
            BandPosition::AboveUpper
        } else if close < band.lower() {
            BandPosition::BelowLower
        } else if width == 0.0 {
            BandPosition::NearMiddle
        } else if band.upper() - close <= tolerance * width {
            BandPosition::NearUpper
        } else if close - band.lower() <= tolerance * width {
            BandPosition::NearLower
        } else if (close - band.middle()).abs() <= tolerance * width / 2.0 {
            BandPosition::NearMiddle
        } else {
            BandPosition::Between
        };

        positions.push((band.timestamp(), position));
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::bars_from_closes;
    use crate::{PriceSource, bollinger};

    fn series(points: &[(Timestamp, f64)]) -> Series {
        points.iter().copied().collect()
    }

    mod crossover {
        use super::*;

        #[test]
        fn single_bullish_transition_flags_once() {
            let a = series(&[(1, 1.0), (2, 3.0), (3, 4.0)]);
            let b = series(&[(1, 2.0), (2, 2.0), (3, 2.0)]);
            assert_eq!(crossovers(&a, &b), vec![(2, Crossover::Bullish)]);
        }

        #[test]
        fn bearish_is_the_mirror() {
            let a = series(&[(1, 3.0), (2, 1.0)]);
            let b = series(&[(1, 2.0), (2, 2.0)]);
            assert_eq!(crossovers(&a, &b), vec![(2, Crossover::Bearish)]);
        }

        #[test]
        fn touch_then_cross_counts_once() {
            // a touches b (equal) then crosses: the equality bar is not an
            // event, the crossing bar is
            let a = series(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
            let b = series(&[(1, 2.0), (2, 2.0), (3, 2.0)]);
            assert_eq!(crossovers(&a, &b), vec![(3, Crossover::Bullish)]);
        }

        #[test]
        fn no_events_when_always_above() {
            let a = series(&[(1, 3.0), (2, 4.0), (3, 5.0)]);
            let b = series(&[(1, 2.0), (2, 2.0), (3, 2.0)]);
            assert!(crossovers(&a, &b).is_empty());
        }

        #[test]
        fn oscillation_flags_each_crossing() {
            let a = series(&[(1, 1.0), (2, 3.0), (3, 1.0), (4, 3.0)]);
            let b = series(&[(1, 2.0), (2, 2.0), (3, 2.0), (4, 2.0)]);
            assert_eq!(
                crossovers(&a, &b),
                vec![
                    (2, Crossover::Bullish),
                    (3, Crossover::Bearish),
                    (4, Crossover::Bullish),
                ]
            );
        }

        #[test]
        fn offset_warmups_align_on_shared_timestamps() {
            // b has a longer warm-up; only shared timestamps count
            let a = series(&[(1, 1.0), (2, 1.0), (3, 1.0), (4, 3.0)]);
            let b = series(&[(3, 2.0), (4, 2.0)]);
            assert_eq!(crossovers(&a, &b), vec![(4, Crossover::Bullish)]);
        }

        #[test]
        fn fewer_than_two_shared_points_yields_nothing() {
            let a = series(&[(1, 1.0), (2, 3.0)]);
            let b = series(&[(2, 2.0)]);
            assert!(crossovers(&a, &b).is_empty());
        }
    }

    mod thresholds {
        use super::*;

        #[test]
        fn classifies_below_within_above() {
            let rsi = series(&[(1, 25.0), (2, 50.0), (3, 75.0), (4, 30.0), (5, 70.0)]);
            assert_eq!(
                classify_thresholds(&rsi, 30.0, 70.0).unwrap(),
                vec![
                    (1, ThresholdBand::Below),
                    (2, ThresholdBand::Within),
                    (3, ThresholdBand::Above),
                    (4, ThresholdBand::Within), // bounds are inclusive
                    (5, ThresholdBand::Within),
                ]
            );
        }

        #[test]
        fn degenerate_band_splits_strictly() {
            // MACD histogram against zero
            let hist = series(&[(1, -0.5), (2, 0.0), (3, 0.5)]);
            assert_eq!(
                classify_thresholds(&hist, 0.0, 0.0).unwrap(),
                vec![
                    (1, ThresholdBand::Below),
                    (2, ThresholdBand::Within),
                    (3, ThresholdBand::Above),
                ]
            );
        }

        #[test]
        fn inverted_or_non_finite_bounds_are_errors() {
            let s = series(&[(1, 50.0)]);
            assert_eq!(
                classify_thresholds(&s, 70.0, 30.0),
                Err(Error::InvalidBounds {
                    lower: 70.0,
                    upper: 30.0
                })
            );
            assert!(classify_thresholds(&s, f64::NAN, 30.0).is_err());
        }

        #[test]
        fn empty_series_classifies_empty() {
            assert!(
                classify_thresholds(&Series::empty(), 30.0, 70.0)
                    .unwrap()
                    .is_empty()
            );
        }
    }

    mod regimes {
        use super::*;

        #[test]
        fn empty_below_lookback() {
            let bw = series(&[(1, 0.1), (2, 0.2)]);
            assert!(
                volatility_regimes(&bw, 3, RegimeThresholds::default())
                    .unwrap()
                    .is_empty()
            );
        }

        #[test]
        fn minimum_of_window_is_squeeze() {
            let bw = series(&[(1, 0.5), (2, 0.4), (3, 0.3), (4, 0.1)]);
            let regimes = volatility_regimes(&bw, 4, RegimeThresholds::default()).unwrap();
            assert_eq!(regimes, vec![(4, VolatilityRegime::Squeeze)]);
        }

        #[test]
        fn maximum_of_window_is_expansion() {
            let bw = series(&[(1, 0.1), (2, 0.2), (3, 0.3), (4, 0.9)]);
            let regimes = volatility_regimes(&bw, 4, RegimeThresholds::default()).unwrap();
            assert_eq!(regimes, vec![(4, VolatilityRegime::Expansion)]);
        }

        #[test]
        fn mid_range_is_normal() {
            let bw = series(&[(1, 0.1), (2, 0.9), (3, 0.5)]);
            let regimes = volatility_regimes(&bw, 3, RegimeThresholds::default()).unwrap();
            assert_eq!(regimes, vec![(3, VolatilityRegime::Normal)]);
        }

        #[test]
        fn flat_bandwidth_is_squeeze() {
            let bw = series(&[(1, 0.0), (2, 0.0), (3, 0.0)]);
            let regimes = volatility_regimes(&bw, 3, RegimeThresholds::default()).unwrap();
            assert_eq!(regimes, vec![(3, VolatilityRegime::Squeeze)]);
        }

        #[test]
        fn thresholds_are_adjustable() {
            // 0.5 percentile point: squeeze with a 0.5 squeeze knob
            let bw = series(&[(1, 0.1), (2, 0.9), (3, 0.5)]);
            let thresholds = RegimeThresholds {
                squeeze: 0.5,
                expansion: 0.9,
            };
            let regimes = volatility_regimes(&bw, 3, thresholds).unwrap();
            assert_eq!(regimes, vec![(3, VolatilityRegime::Squeeze)]);
        }

        #[test]
        fn invalid_knobs_are_errors() {
            let bw = series(&[(1, 0.1)]);
            for (squeeze, expansion) in [(-0.1, 0.9), (0.1, 1.1), (0.9, 0.1)] {
                assert_eq!(
                    volatility_regimes(&bw, 1, RegimeThresholds { squeeze, expansion }),
                    Err(Error::InvalidThresholds { squeeze, expansion })
                );
            }
        }

        #[test]
        fn zero_lookback_is_an_error() {
            let bw = series(&[(1, 0.1)]);
            assert_eq!(
                volatility_regimes(&bw, 0, RegimeThresholds::default()),
                Err(Error::InvalidPeriod { period: 0 })
            );
        }
    }

    mod band_position {
        use super::*;

        // Closes chosen so the final window [10, 30] has mean 20, σ = 10:
        // bands at 40 / 20 / 0 with k = 2.
        fn fixture() -> (Vec<crate::test_util::Bar>, Vec<BollingerPoint>) {
            let bars = bars_from_closes(&[10.0, 30.0]);
            let bands = bollinger(&bars, 2, 2.0, PriceSource::Close).unwrap();
            (bars, bands)
        }

        #[test]
        fn close_inside_upper_margin_is_near_upper() {
            let (bars, bands) = fixture();
            // close 30: upper − close = 10 ≤ 0.3 × 40
            let positions = band_positions(&bars, &bands, 0.3).unwrap();
            assert_eq!(positions, vec![(2, BandPosition::NearUpper)]);
        }

        #[test]
        fn tight_tolerance_moves_close_to_between() {
            let (bars, bands) = fixture();
            // close 30: upper − close = 10 > 0.2 × 40 = 8, and 10 > half-margin
            let positions = band_positions(&bars, &bands, 0.2).unwrap();
            assert_eq!(positions, vec![(2, BandPosition::Between)]);
        }

        #[test]
        fn outside_the_envelope_wins() {
            // mean 55, σ = 45, k = 0.5: upper = 77.5; close 100 is outside
            let bars = bars_from_closes(&[10.0, 100.0]);
            let bands = bollinger(&bars, 2, 0.5, PriceSource::Close).unwrap();
            let positions = band_positions(&bars, &bands, 0.2).unwrap();
            assert_eq!(positions, vec![(2, BandPosition::AboveUpper)]);
        }

        #[test]
        fn flat_bands_classify_near_middle() {
            let bars = bars_from_closes(&[50.0; 5]);
            let bands = bollinger(&bars, 3, 2.0, PriceSource::Close).unwrap();
            let positions = band_positions(&bars, &bands, 0.2).unwrap();
            assert_eq!(positions.len(), 3);
            assert!(
                positions
                    .iter()
                    .all(|(_, p)| *p == BandPosition::NearMiddle)
            );
        }

        #[test]
        fn warm_up_prefix_is_skipped() {
            let bars = bars_from_closes(&[10.0, 20.0, 30.0, 40.0]);
            let bands = bollinger(&bars, 3, 2.0, PriceSource::Close).unwrap();
            let positions = band_positions(&bars, &bands, 0.2).unwrap();
            assert_eq!(positions.len(), 2);
            assert_eq!(positions[0].0, 3);
        }

        #[test]
        fn invalid_tolerance_is_an_error() {
            let (bars, bands) = fixture();
            assert!(band_positions(&bars, &bands, 0.0).is_err());
            assert!(band_positions(&bars, &bands, f64::NAN).is_err());
        }
    }
}
