use crate::{
    BollingerPoint, MacdPoint, Ohlcv, PriceSource, Series, StochPoint, bollinger, ema,
    error::Error, macd, rsi, sma, stochastic,
};

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

/// Standard deviation multiplier for Bollinger Bands.
///
/// Wraps an `f64` so [`IndicatorSpec`] can implement `Eq` and `Hash` via
/// bit-level comparison. Validation (finite, positive) happens when the
/// indicator is computed, not at construction.
///
/// Defaults to `2.0`, the standard Bollinger Bands setting.
#[derive(Clone, Copy, Debug)]
pub struct Multiplier(f64);

impl Multiplier {
    /// Wraps a multiplier value.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The wrapped value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Multiplier {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Multiplier {}

impl Hash for Multiplier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self(2.0)
    }
}

/// An indicator identifier with its parameters.
///
/// The tagged-variant registry the chart and screener layers dispatch
/// through: one variant per indicator, parameters declared on the
/// variant, computation via [`compute`](IndicatorSpec::compute). Replaces
/// string-keyed `match`-on-name branching at the call sites.
///
/// Specs are value types: cheap to copy, compare, and hash, so callers
/// can memoize computed output by `(bars hash, spec)`.
///
/// # Example
///
/// ```
/// use chartdeck_ta::{IndicatorOutput, IndicatorSpec};
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
/// let bars: Vec<Bar> = (0..30u32).map(|i| Bar(100.0 + f64::from(i), u64::from(i) + 1)).collect();
///
/// match IndicatorSpec::rsi14().compute(&bars).unwrap() {
///     IndicatorOutput::Line(series) => assert!(!series.is_empty()),
///     _ => unreachable!("RSI is a single-line indicator"),
/// }
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum IndicatorSpec {
    /// Simple moving average.
    Sma {
        /// Window length.
        period: usize,
        /// Price source per bar.
        source: PriceSource,
    },
    /// Exponential moving average.
    Ema {
        /// Window length.
        period: usize,
        /// Price source per bar.
        source: PriceSource,
    },
    /// Relative Strength Index.
    Rsi {
        /// Smoothing length.
        period: usize,
    },
    /// Moving Average Convergence Divergence.
    Macd {
        /// Fast EMA period.
        fast: usize,
        /// Slow EMA period.
        slow: usize,
        /// Signal EMA period.
        signal: usize,
    },
    /// Bollinger Bands.
    Bollinger {
        /// Window length.
        period: usize,
        /// Standard deviation multiplier.
        multiplier: Multiplier,
        /// Price source per bar.
        source: PriceSource,
    },
    /// Slow stochastic oscillator.
    Stochastic {
        /// High/low window length.
        k_period: usize,
        /// %K smoothing length.
        k_smooth: usize,
        /// %D smoothing length.
        d_period: usize,
    },
}

impl IndicatorSpec {
    /// SMA on closing price.
    #[must_use]
    pub fn sma(period: usize) -> Self {
        Self::Sma {
            period,
            source: PriceSource::Close,
        }
    }

    /// EMA on closing price.
    #[must_use]
    pub fn ema(period: usize) -> Self {
        Self::Ema {
            period,
            source: PriceSource::Close,
        }
    }

    /// RSI with a custom period.
    #[must_use]
    pub fn rsi(period: usize) -> Self {
        Self::Rsi { period }
    }

    /// RSI(14), the conventional setting.
    #[must_use]
    pub fn rsi14() -> Self {
        Self::rsi(14)
    }

    /// MACD(12, 26, 9), the conventional setting.
    #[must_use]
    pub fn macd_standard() -> Self {
        Self::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }

    /// Bollinger Bands (20, close, 2σ), the conventional setting.
    #[must_use]
    pub fn bollinger20() -> Self {
        Self::Bollinger {
            period: 20,
            multiplier: Multiplier::default(),
            source: PriceSource::Close,
        }
    }

    /// Slow stochastic (14, 3, 3), the conventional setting.
    #[must_use]
    pub fn stochastic_14_3_3() -> Self {
        Self::Stochastic {
            k_period: 14,
            k_smooth: 3,
            d_period: 3,
        }
    }

    /// Computes this indicator over the given bars.
    ///
    /// # Errors
    ///
    /// Propagates the parameter errors of the underlying indicator
    /// function. Insufficient data yields an empty
    /// [`IndicatorOutput`], not an error.
    pub fn compute<B: Ohlcv>(&self, bars: &[B]) -> Result<IndicatorOutput, Error> {
        match *self {
            Self::Sma { period, source } => sma(bars, period, source).map(IndicatorOutput::Line),
            Self::Ema { period, source } => ema(bars, period, source).map(IndicatorOutput::Line),
            Self::Rsi { period } => rsi(bars, period).map(IndicatorOutput::Line),
            Self::Macd { fast, slow, signal } => {
                macd(bars, fast, slow, signal).map(IndicatorOutput::Macd)
            }
            Self::Bollinger {
                period,
                multiplier,
                source,
            } => bollinger(bars, period, multiplier.value(), source).map(IndicatorOutput::Bands),
            Self::Stochastic {
                k_period,
                k_smooth,
                d_period,
            } => stochastic(bars, k_period, k_smooth, d_period).map(IndicatorOutput::Stochastic),
        }
    }
}

impl Display for IndicatorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Sma { period, source } => write!(f, "SMA({period}, {source})"),
            Self::Ema { period, source } => write!(f, "EMA({period}, {source})"),
            Self::Rsi { period } => write!(f, "RSI({period})"),
            Self::Macd { fast, slow, signal } => write!(f, "MACD({fast}, {slow}, {signal})"),
            Self::Bollinger {
                period,
                multiplier,
                source,
            } => write!(f, "BB({period}, {source}, {})", multiplier.value()),
            Self::Stochastic {
                k_period,
                k_smooth,
                d_period,
            } => write!(f, "Stoch({k_period}, {k_smooth}, {d_period})"),
        }
    }
}

/// Output of [`IndicatorSpec::compute`]: one variant per output shape.
#[derive(PartialEq, Clone, Debug)]
pub enum IndicatorOutput {
    /// Single-value series (SMA, EMA, RSI).
    Line(Series),
    /// MACD line / signal / histogram triple.
    Macd(Vec<MacdPoint>),
    /// Bollinger upper / middle / lower / bandwidth.
    Bands(Vec<BollingerPoint>),
    /// Stochastic %K / %D pair.
    Stochastic(Vec<StochPoint>),
}

impl IndicatorOutput {
    /// Number of output points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Line(series) => series.len(),
            Self::Macd(points) => points.len(),
            Self::Bands(points) => points.len(),
            Self::Stochastic(points) => points.len(),
        }
    }

    /// `true` when the indicator produced no output (insufficient data).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
