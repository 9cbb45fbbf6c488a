//! Offset-rule mapping tables over one source category.

use thiserror::Error;

use crate::Number;
use crate::interval::Interval;

/// An error related to constructing a [`MapRule`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// A raw rule line has a non-positive length. Displays the associated
    /// destination & source starts to locate in input.
    #[error("range length must be > 0 (destination_start = {destination_start}, source_start = {source_start})")]
    EmptyRangeLength {
        destination_start: Number,
        source_start: Number,
    },

    /// A rule's half-open source range is empty or reversed.
    #[error("rule source range must have start < end (source_start = {source_start}, source_end = {source_end})")]
    EmptySourceRange {
        source_start: Number,
        source_end: Number,
    },

    /// Integer overflow occurred when calculating a rule's source end from
    /// the given start & length.
    #[error("source end overflow when calculating start + length (start = {start}, length = {length})")]
    SourceEndOverflow { start: Number, length: Number },

    /// Integer overflow occurred when calculating the offset from the given
    /// destination & source starts.
    #[error("offset overflow when computing destination_start - source_start (destination_start = {destination_start}, source_start = {source_start})")]
    OffsetOverflow {
        destination_start: Number,
        source_start: Number,
    },

    /// Applying the rule's offset to an endpoint of its own source range
    /// would overflow, so the rule could never map a value safely.
    #[error("mapped value overflow when applying offset {offset} to {value}")]
    MappedValueOverflow { value: Number, offset: Number },
}

/// One offset-mapping rule: any value `v` with
/// `source_start <= v < source_end` maps to `v + offset`.
///
/// Invariant: `source_start < source_end`, and both mapped endpoints are
/// representable, enforced at construction. Mapping any in-range value after
/// that cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapRule {
    source_start: Number,
    /// Exclusive end of the source range.
    source_end: Number,
    offset: Number,
}

impl MapRule {
    /// Create a rule from a half-open source range and an additive offset.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptySourceRange`] if `source_start >= source_end`,
    /// or [`RuleError::MappedValueOverflow`] if offsetting either end of the
    /// source range overflows.
    pub fn new(source_start: Number, source_end: Number, offset: Number) -> Result<Self, RuleError> {
        if source_start >= source_end {
            return Err(RuleError::EmptySourceRange {
                source_start,
                source_end,
            });
        }
        for value in [source_start, source_end - 1] {
            value
                .checked_add(offset)
                .ok_or(RuleError::MappedValueOverflow { value, offset })?;
        }
        Ok(Self {
            source_start,
            source_end,
            offset,
        })
    }

    /// Create a rule from a raw puzzle triple of destination start, source
    /// start, and range length.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if the length is non-positive or any derived
    /// bound or offset overflows.
    pub fn from_raw(
        destination_start: Number,
        source_start: Number,
        length: Number,
    ) -> Result<Self, RuleError> {
        if length <= 0 {
            return Err(RuleError::EmptyRangeLength {
                destination_start,
                source_start,
            });
        }
        let source_end =
            source_start
                .checked_add(length)
                .ok_or(RuleError::SourceEndOverflow {
                    start: source_start,
                    length,
                })?;
        let offset =
            destination_start
                .checked_sub(source_start)
                .ok_or(RuleError::OffsetOverflow {
                    destination_start,
                    source_start,
                })?;
        Self::new(source_start, source_end, offset)
    }

    /// The start of the source range, inclusive.
    pub fn source_start(self) -> Number {
        self.source_start
    }

    /// The end of the source range, exclusive.
    pub fn source_end_exclusive(self) -> Number {
        self.source_end
    }

    /// The additive offset applied to mapped values.
    pub fn offset(self) -> Number {
        self.offset
    }

    /// Whether the rule's source range contains the given value.
    pub fn contains(self, value: Number) -> bool {
        self.source_start <= value && value < self.source_end
    }

    /// Map a value with this rule.
    /// If the value is outside the source range, returns `None`.
    pub fn try_map(self, value: Number) -> Option<Number> {
        // in-range additions cannot overflow, checked at construction
        self.contains(value).then(|| value + self.offset)
    }

    /// The part of the given interval covered by this rule's source range,
    /// still in source coordinates, or `None` if they do not intersect.
    fn intersection(self, interval: Interval) -> Option<Interval> {
        let start = interval.start().max(self.source_start);
        let end = interval.end().min(self.source_end - 1);
        (start <= end).then(|| Interval::new_unchecked(start, end))
    }
}

/// One sub-interval produced by splitting a query interval against a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPiece {
    /// The covered part of the query interval, in source coordinates.
    pub source: Interval,
    /// Where that part lands after the table is applied. Equal to `source`
    /// for unmapped pieces.
    pub destination: Interval,
    /// Whether a rule matched this piece.
    pub mapped: bool,
}

/// The first structural match of an interval against a table's rule list.
pub(crate) struct RuleOverlap {
    /// The matched part, already translated to destination coordinates.
    pub(crate) mapped: Interval,
    /// The matched part in source coordinates.
    pub(crate) mapped_source: Interval,
    /// Uncovered parts of the query interval, at most one on each side, to
    /// be re-matched against the table.
    pub(crate) remainders: Vec<Interval>,
}

/// An ordered list of [`MapRule`]s defining one category-to-category mapping.
///
/// Rules keep their input order and are never sorted: when ranges overlap,
/// the first matching rule in table order wins. Valid puzzle input keeps
/// source ranges disjoint, which is an assumed precondition, not enforced.
#[derive(Debug, Clone)]
pub struct RangeTable {
    source_category: String,
    destination_category: String,
    rules: Vec<MapRule>,
}

impl RangeTable {
    /// Create a table from already-constructed rules.
    pub fn new(
        source_category: impl Into<String>,
        destination_category: impl Into<String>,
        rules: Vec<MapRule>,
    ) -> Self {
        Self {
            source_category: source_category.into(),
            destination_category: destination_category.into(),
            rules,
        }
    }

    /// Create a table from an iterator of raw puzzle triples of
    /// `(destination_start, source_start, length)`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] raised by a triple.
    pub fn from_raw_rules<I>(
        source_category: impl Into<String>,
        destination_category: impl Into<String>,
        raw_rules: I,
    ) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (Number, Number, Number)>,
    {
        let rules = raw_rules
            .into_iter()
            .map(|(destination_start, source_start, length)| {
                MapRule::from_raw(destination_start, source_start, length)
            })
            .collect::<Result<_, _>>()?;
        Ok(Self::new(source_category, destination_category, rules))
    }

    /// The category this table maps from.
    pub fn source_category(&self) -> &str {
        &self.source_category
    }

    /// The category this table maps to.
    pub fn destination_category(&self) -> &str {
        &self.destination_category
    }

    /// Map a single value to the destination category.
    ///
    /// The first rule in table order whose source range contains the value
    /// maps it; when no rule matches, the value passes through unchanged.
    pub fn lookup_point(&self, value: Number) -> Number {
        self.rules
            .iter()
            .find_map(|rule| rule.try_map(value))
            .unwrap_or(value)
    }

    /// Find the first rule in table order intersecting the interval anywhere,
    /// returning the mapped part and the uncovered remainders.
    ///
    /// Intersecting the full interval, not only its endpoints, means a rule
    /// nested strictly inside the query interval is still split out.
    pub(crate) fn first_overlap(&self, interval: Interval) -> Option<RuleOverlap> {
        self.rules.iter().find_map(|rule| {
            let covered = rule.intersection(interval)?;
            // in-range additions cannot overflow, checked at rule construction
            let mapped =
                Interval::new_unchecked(covered.start() + rule.offset, covered.end() + rule.offset);

            let mut remainders = Vec::with_capacity(2);
            if interval.start() < covered.start() {
                remainders.push(Interval::new_unchecked(
                    interval.start(),
                    covered.start() - 1,
                ));
            }
            if covered.end() < interval.end() {
                remainders.push(Interval::new_unchecked(covered.end() + 1, interval.end()));
            }

            Some(RuleOverlap {
                mapped,
                mapped_source: covered,
                remainders,
            })
        })
    }

    /// Split one interval into the minimal partition of sub-intervals, each
    /// fully mapped by a single rule or untouched by every rule.
    ///
    /// Pieces are produced with an explicit worklist: a partial match emits
    /// the mapped part and re-queues the uncovered remainders for further
    /// matching against the same table, so no element of the query interval
    /// is lost or mapped twice.
    pub fn split(&self, interval: Interval) -> Vec<SplitPiece> {
        let mut pending = vec![interval];
        let mut pieces = Vec::new();

        while let Some(current) = pending.pop() {
            match self.first_overlap(current) {
                Some(overlap) => {
                    pieces.push(SplitPiece {
                        source: overlap.mapped_source,
                        destination: overlap.mapped,
                        mapped: true,
                    });
                    pending.extend(overlap.remainders);
                }
                None => pieces.push(SplitPiece {
                    source: current,
                    destination: current,
                    mapped: false,
                }),
            }
        }

        pieces
    }
}
