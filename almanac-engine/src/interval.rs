//! Contiguous integer intervals and collections of them.

use thiserror::Error;

use crate::Number;

/// An error related to constructing an [`Interval`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntervalError {
    /// The given bounds are reversed.
    #[error("interval start must be <= end (start = {start}, end = {end})")]
    StartAfterEnd { start: Number, end: Number },

    /// A start-and-length construction was given a non-positive length.
    #[error("interval length must be > 0 (start = {start}, length = {length})")]
    EmptyLength { start: Number, length: Number },

    /// Integer overflow occurred when calculating an interval's end from the
    /// given start & length.
    #[error("interval end overflow when calculating start + length - 1 (start = {start}, length = {length})")]
    EndOverflow { start: Number, length: Number },
}

/// A contiguous, inclusive range of integers `[start, end]`.
///
/// Invariant: `start <= end`, enforced at construction, so every interval
/// holds at least one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    // order of props relevant when deriving Ord
    start: Number,
    end: Number,
}

impl Interval {
    /// Create an interval from inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::StartAfterEnd`] if `start > end`.
    pub fn new(start: Number, end: Number) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create an interval holding a single value.
    pub fn singleton(value: Number) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    /// Create an interval from a start and a count of values, as seed ranges
    /// are written in puzzle input.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::EmptyLength`] if `length <= 0`, or
    /// [`IntervalError::EndOverflow`] if `start + length - 1` overflows.
    pub fn from_start_and_length(start: Number, length: Number) -> Result<Self, IntervalError> {
        if length <= 0 {
            return Err(IntervalError::EmptyLength { start, length });
        }
        let end = start
            .checked_add(length - 1)
            .ok_or(IntervalError::EndOverflow { start, length })?;
        Ok(Self { start, end })
    }

    /// Construct from bounds already known to be ordered.
    pub(crate) const fn new_unchecked(start: Number, end: Number) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// The start of the interval, inclusive.
    pub fn start(self) -> Number {
        self.start
    }

    /// The end of the interval, inclusive.
    pub fn end(self) -> Number {
        self.end
    }

    /// Whether the interval contains the given value.
    pub fn contains(self, value: Number) -> bool {
        self.start <= value && value <= self.end
    }
}

/// An unordered collection of [`Interval`]s jointly representing a set of
/// integers.
///
/// Intervals may be non-disjoint while a computation is in flight;
/// [`IntervalSet::normalize`] restores a sorted, merged form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet(Vec<Interval>);

impl IntervalSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an interval to the set.
    pub fn push(&mut self, interval: Interval) {
        self.0.push(interval);
    }

    /// Whether the set holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The count of intervals in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the intervals in their current order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.0.iter()
    }

    /// The smallest interval start in the set, or `None` for an empty set.
    ///
    /// The minimum over an empty set is undefined; callers decide how to
    /// surface the `None` case rather than receiving a sentinel value.
    pub fn minimum_start(&self) -> Option<Number> {
        self.0.iter().map(|interval| interval.start).min()
    }

    /// Sort the intervals and merge any that overlap or sit adjacent, leaving
    /// a minimal disjoint representation of the same set of integers.
    pub fn normalize(&mut self) {
        self.0.sort_unstable();
        let mut merged: Vec<Interval> = Vec::with_capacity(self.0.len());
        for interval in self.0.drain(..) {
            match merged.last_mut() {
                // adjacency check saturates so an end at the numeric maximum
                // still compares
                Some(last) if interval.start <= last.end.saturating_add(1) => {
                    if interval.end > last.end {
                        last.end = interval.end;
                    }
                }
                _ => merged.push(interval),
            }
        }
        self.0 = merged;
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
