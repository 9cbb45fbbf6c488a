//! Engine for the seed almanac's interval-remapping pipeline.
//!
//! The almanac puzzle maps numbers from one category to another (seed to
//! soil, soil to fertilizer, and so on) through tables of piecewise-offset
//! rules. This crate provides the pieces to run that translation over whole
//! ranges of numbers at once instead of value-by-value: [`Interval`] sets,
//! offset-rule [`RangeTable`]s that split intervals at rule boundaries, and a
//! [`Pipeline`] chaining tables into a multi-stage transformation.
//!
//! # Quick Start
//!
//! 1. Build a table of offset rules from raw `(destination_start,
//!    source_start, length)` triples and look up single values:
//!
//! ```
//! # use almanac_engine::DynamicResult;
//! use almanac_engine::table::RangeTable;
//!
//! # fn main() -> DynamicResult<()> {
//! // the "50 98 2" and "52 50 48" rules from the worked puzzle example
//! let table = RangeTable::from_raw_rules("seed", "soil", [(50, 98, 2), (52, 50, 48)])?;
//!
//! assert_eq!(table.lookup_point(79), 81);
//! assert_eq!(table.lookup_point(14), 14); // no rule matches, identity
//! # Ok(())
//! # }
//! ```
//!
//! 2. Chain tables into a [`Pipeline`] and push interval sets through it:
//!
//! ```
//! # use almanac_engine::DynamicResult;
//! use almanac_engine::interval::{Interval, IntervalSet};
//! use almanac_engine::pipeline::Pipeline;
//! use almanac_engine::table::RangeTable;
//!
//! # fn main() -> DynamicResult<()> {
//! let table = RangeTable::from_raw_rules("seed", "soil", [(50, 98, 2), (52, 50, 48)])?;
//! let pipeline = Pipeline::new(vec![table])?;
//!
//! let seeds = IntervalSet::from_iter([Interval::new(79, 92)?]);
//! let soil = pipeline.run(seeds);
//! assert_eq!(soil.minimum_start(), Some(81));
//! # Ok(())
//! # }
//! ```
//!
//! 3. Or parse a full almanac document and solve both puzzle variants with
//!    [`almanac::Almanac`], optionally through [`runner::run`] for timed,
//!    event-driven output.
//!
//! [`Interval`]: interval::Interval
//! [`RangeTable`]: table::RangeTable
//! [`Pipeline`]: pipeline::Pipeline

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod almanac;
pub mod interval;
pub mod parsing;
pub mod pipeline;
pub mod runner;
pub mod table;

/// The integer type for almanac values and offsets.
///
/// Signed, as offsets translate forward or backward, and wide enough for the
/// 10-digit values observed in puzzle input. The remapping core itself makes
/// no assumption about sign or magnitude beyond fitting this type.
pub type Number = i64;

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// An enum to identify a solution part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}
