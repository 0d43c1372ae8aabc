/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar timestamp in milliseconds since the Unix epoch.
///
/// Indicator outputs carry the timestamp of the bar they are anchored to,
/// so the host charting layer can merge them with its own time-indexed
/// series. Must be strictly increasing across a bar slice.
pub type Timestamp = u64;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-call
/// conversion. Indicators accept `&[impl Ohlcv]` and extract the
/// configured [`PriceSource`](crate::PriceSource) internally.
///
/// The engine does not validate bar geometry (`low ≤ open, close ≤ high`)
/// or timestamp ordering; supplying clean, strictly time-ordered bars is
/// the caller's responsibility.
///
/// # Example
///
/// ```
/// use chartdeck_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyBar {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyBar {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn timestamp(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar timestamp, milliseconds since epoch.
    ///
    /// Must be strictly increasing across the slice passed to an
    /// indicator; output series timestamps are a subsequence of these.
    fn timestamp(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    ///
    /// None of the current indicators read volume; it is part of the
    /// input model so volume-dependent indicators can be added without
    /// changing the trait.
    fn volume(&self) -> f64 {
        0.0
    }
}
