//! Chaining mapping tables into a multi-stage transformation.

use thiserror::Error;

use crate::Number;
use crate::interval::{Interval, IntervalSet};
use crate::table::RangeTable;

/// An error related to assembling a [`Pipeline`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// Consecutive tables do not chain: a table's source category must equal
    /// the previous table's destination category.
    #[error("table {position} maps from {found:?} but the previous table maps to {expected:?}")]
    CategoryMismatch {
        /// Zero-based position of the offending table.
        position: usize,
        expected: String,
        found: String,
    },
}

/// An ordered chain of [`RangeTable`]s defining a multi-stage category
/// transformation, such as seed through soil, fertilizer, and on to location.
///
/// Built once from input and read-only afterwards; every run is a pure
/// function of its input set.
#[derive(Debug, Clone)]
pub struct Pipeline {
    tables: Vec<RangeTable>,
}

impl Pipeline {
    /// Assemble a pipeline, validating that consecutive tables chain by
    /// category.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::CategoryMismatch`] naming the first table
    /// whose source category differs from its predecessor's destination.
    pub fn new(tables: Vec<RangeTable>) -> Result<Self, PipelineError> {
        for (index, pair) in tables.windows(2).enumerate() {
            if pair[0].destination_category() != pair[1].source_category() {
                return Err(PipelineError::CategoryMismatch {
                    position: index + 1,
                    expected: pair[0].destination_category().to_owned(),
                    found: pair[1].source_category().to_owned(),
                });
            }
        }
        Ok(Self { tables })
    }

    /// The tables in chain order.
    pub fn tables(&self) -> &[RangeTable] {
        &self.tables
    }

    /// Map a single value through every table in sequence.
    pub fn lookup_point(&self, value: Number) -> Number {
        self.tables
            .iter()
            .fold(value, |acc, table| table.lookup_point(acc))
    }

    /// Transform a set of source intervals through every table in sequence,
    /// returning the final destination set.
    ///
    /// Each table drains a worklist seeded with the current working set: a
    /// popped interval either passes through unmatched, maps fully via one
    /// rule, or maps partially, in which case the uncovered remainders
    /// re-enter the same table's worklist. Only when the worklist is empty
    /// does the (normalized) output become the next table's input.
    pub fn run(&self, sources: IntervalSet) -> IntervalSet {
        let mut current = sources;
        for table in &self.tables {
            let mut pending: Vec<Interval> = current.into_iter().collect();
            let mut output = IntervalSet::new();

            while let Some(interval) = pending.pop() {
                match table.first_overlap(interval) {
                    Some(overlap) => {
                        output.push(overlap.mapped);
                        pending.extend(overlap.remainders);
                    }
                    None => output.push(interval),
                }
            }

            output.normalize();
            current = output;
        }
        current
    }
}
