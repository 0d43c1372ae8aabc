use thiserror::Error;

/// Invalid indicator parameters.
///
/// Parameter errors are programming errors and surface as `Err` at call
/// time. Insufficient data is not an error: indicators return an empty
/// output instead, since short histories are an expected steady-state
/// condition while a chart is loading.
#[derive(Error, PartialEq, Clone, Copy, Debug)]
pub enum Error {
    /// A window length of zero was supplied.
    #[error("period must be positive, got {period}")]
    InvalidPeriod {
        /// The rejected period.
        period: usize,
    },

    /// MACD requires the fast period to be strictly below the slow one.
    #[error("MACD fast period must be below slow period, got fast={fast}, slow={slow}")]
    FastNotBelowSlow {
        /// Fast EMA period.
        fast: usize,
        /// Slow EMA period.
        slow: usize,
    },

    /// Band multiplier that is not a finite positive number.
    #[error("band multiplier must be finite and positive, got {value}")]
    InvalidMultiplier {
        /// The rejected multiplier.
        value: f64,
    },

    /// Threshold band with the lower bound above the upper bound.
    #[error("threshold bounds must satisfy lower <= upper, got lower={lower}, upper={upper}")]
    InvalidBounds {
        /// Lower bound of the band.
        lower: f64,
        /// Upper bound of the band.
        upper: f64,
    },

    /// Volatility-regime percentiles outside `0.0..=1.0` or inverted.
    #[error(
        "regime percentiles must satisfy 0 <= squeeze <= expansion <= 1, \
         got squeeze={squeeze}, expansion={expansion}"
    )]
    InvalidThresholds {
        /// Squeeze percentile.
        squeeze: f64,
        /// Expansion percentile.
        expansion: f64,
    },
}

pub(crate) fn validate_period(period: usize) -> Result<(), Error> {
    if period == 0 {
        return Err(Error::InvalidPeriod { period });
    }
    Ok(())
}

pub(crate) fn validate_multiplier(value: f64) -> Result<(), Error> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidMultiplier { value });
    }
    Ok(())
}
