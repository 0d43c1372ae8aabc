use crate::{Price, Timestamp};

use std::fmt::Display;

/// One point of an indicator output series.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct SeriesPoint {
    /// Timestamp of the bar this value is anchored to.
    pub timestamp: Timestamp,
    /// Computed indicator value.
    pub value: Price,
}

impl Display for SeriesPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.timestamp, self.value)
    }
}

/// Time-ordered indicator output, aligned to a subsequence of the input
/// bars' timestamps.
///
/// An indicator with a warm-up window of `N` bars over `M` input bars
/// produces at most `M − N + 1` points, anchored at the bar where the
/// window first becomes full. An empty series means "not enough data",
/// which is an expected steady-state condition, not an error.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Empty series; what indicators return for insufficient data.
    #[must_use]
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    #[must_use]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, timestamp: Timestamp, value: Price) {
        debug_assert!(
            self.points.last().is_none_or(|p| p.timestamp < timestamp),
            "series timestamps must be strictly increasing: last={:?}, got={timestamp}",
            self.points.last().map(|p| p.timestamp),
        );
        self.points.push(SeriesPoint { timestamp, value });
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the indicator produced no output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, oldest first.
    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// The most recent point, if any.
    #[must_use]
    pub fn last(&self) -> Option<SeriesPoint> {
        self.points.last().copied()
    }

    /// Iterator over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = SeriesPoint> + '_ {
        self.points.iter().copied()
    }

    /// Values without timestamps, oldest first.
    #[must_use]
    pub fn values(&self) -> Vec<Price> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Joins two series on their shared timestamps.
    ///
    /// Both inputs are sorted by timestamp, so this is a two-pointer walk.
    /// Returns `(timestamp, a_value, b_value)` for every timestamp present
    /// in both series, oldest first.
    #[must_use]
    pub(crate) fn join(a: &Series, b: &Series) -> Vec<(Timestamp, Price, Price)> {
        let mut joined = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);

        while i < a.points.len() && j < b.points.len() {
            let (pa, pb) = (a.points[i], b.points[j]);
            match pa.timestamp.cmp(&pb.timestamp) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    joined.push((pa.timestamp, pa.value, pb.value));
                    i += 1;
                    j += 1;
                }
            }
        }

        joined
    }
}

impl FromIterator<(Timestamp, Price)> for Series {
    fn from_iter<I: IntoIterator<Item = (Timestamp, Price)>>(iter: I) -> Self {
        let mut series = Series::empty();
        for (timestamp, value) in iter {
            series.push(timestamp, value);
        }
        series
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
