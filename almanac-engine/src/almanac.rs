//! The parsed almanac document and its two solve variants.

use thiserror::Error;

use crate::interval::{Interval, IntervalSet};
use crate::parsing::{InputScanner, parse_with_context};
use crate::pipeline::Pipeline;
use crate::table::RangeTable;
use crate::{DynamicResult, Number};

/*
Input is an almanac, formatted as multiple blocks separated by blank lines.

The first block is a `seeds: ` line with a space-separated list of numbers.

Following are map blocks, each headed by a `<source>-to-<destination> map:`
line and holding one rule per line: three numbers for the destination range
start, the source range start, and the range length. The maps are defined in
chain order, one's destination category feeding the next's source category.

Any source number outside every rule's range maps one-to-one.
*/

/// An error when parsing an [`Almanac`] from text.
#[derive(Error, Debug)]
pub enum AlmanacParseError {
    #[error("expected a seeds line to start the almanac")]
    MissingSeedsLine,

    #[error("expected seeds line to start with \"seeds: \"")]
    MissingSeedsPrefix,

    /// Expected a map header line, with the found line.
    #[error("expected header line of the form \"<source>-to-<destination> map:\", found: {0:?}")]
    ExpectedMapHeader(String),

    /// Expected a line formatted with three numbers for a range, with the
    /// found line.
    #[error("expected three space-separated numbers as a map range, found: {0:?}")]
    ExpectedRangeFormat(String),
}

/// An error when solving an [`Almanac`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The almanac lists no seeds, so a lowest location is undefined.
    #[error("almanac lists no seeds to map")]
    NoSeeds,

    /// The seeds line cannot pair into ranges, with the found count.
    #[error("seed ranges require an even count of seed values, found {0}")]
    UnpairedSeedRange(usize),
}

/// Parse a `<source>-to-<destination> map:` header into its category names.
fn parse_map_header(line: &str) -> Result<(String, String), AlmanacParseError> {
    let header_error = || AlmanacParseError::ExpectedMapHeader(line.to_owned());

    let categories = line.strip_suffix(" map:").ok_or_else(header_error)?;
    let (source, destination) = categories.split_once("-to-").ok_or_else(header_error)?;
    if source.is_empty() || destination.is_empty() {
        return Err(header_error());
    }
    Ok((source.to_owned(), destination.to_owned()))
}

/// The parsed almanac: seed numbers plus the chain of category maps.
///
/// Immutable once parsed; both solve variants are pure reads.
pub struct Almanac {
    /// Seed numbers parsed from input. Part one reads them as individual
    /// seeds, part two as `(start, length)` pairs.
    seed_values: Vec<Number>,

    /// The chain of category maps, in input order.
    pipeline: Pipeline,
}

impl Almanac {
    /// Parse an almanac from its text form.
    ///
    /// # Errors
    ///
    /// Returns a dynamic error for any malformed line ([`AlmanacParseError`]
    /// or a numeric parse failure with the offending string), an invalid rule
    /// triple, or a map-block sequence whose categories do not chain. All of
    /// these are configuration errors surfaced before any computation.
    pub fn parse(input: &str) -> DynamicResult<Self> {
        let mut scanner = InputScanner::new(input);

        let seed_values = scanner
            .next_in_sequence(|_, line| -> DynamicResult<_> {
                let seeds_list = line
                    .strip_prefix("seeds: ")
                    .ok_or(AlmanacParseError::MissingSeedsPrefix)?;
                let seed_values = seeds_list
                    .split_whitespace()
                    .map(parse_with_context)
                    .collect::<Result<_, _>>()?;
                Ok(seed_values)
            })?
            .ok_or(AlmanacParseError::MissingSeedsLine)?;

        let mut tables = Vec::new();
        while let Some((source, destination)) =
            scanner.next_item(|_, line| parse_map_header(line))?
        {
            let raw_rules = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
                let values: Vec<_> = line.split_whitespace().collect();

                if values.len() != 3 {
                    return Err(AlmanacParseError::ExpectedRangeFormat(line.to_owned()).into());
                }

                let destination_start: Number = parse_with_context(values[0])?;
                let source_start: Number = parse_with_context(values[1])?;
                let range_length: Number = parse_with_context(values[2])?;

                Ok((destination_start, source_start, range_length))
            })?;

            tables.push(RangeTable::from_raw_rules(source, destination, raw_rules)?);
        }

        let pipeline = Pipeline::new(tables)?;
        Ok(Self {
            seed_values,
            pipeline,
        })
    }

    /// The seed numbers as listed in input.
    pub fn seed_values(&self) -> &[Number] {
        &self.seed_values
    }

    /// The chain of category maps.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

/*
Part one reads the seeds line as individual seed numbers. Map each through
the full chain and return the smallest resulting location number.
*/

impl Almanac {
    /// Find the lowest location number over the individual seed numbers.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NoSeeds`] for an empty seed list: the minimum
    /// over nothing is undefined and is reported rather than defaulted.
    pub fn lowest_location(&self) -> Result<Number, SolveError> {
        self.seed_values
            .iter()
            .map(|&seed| self.pipeline.lookup_point(seed))
            .min()
            .ok_or(SolveError::NoSeeds)
    }
}

/*
Part two reads the seeds line as pairs of range start & length. The ranges
are far too wide to map seed-by-seed, so whole intervals are pushed through
the pipeline, splitting at rule boundaries, and only the interval starts of
the final set are examined.
*/

impl Almanac {
    /// Interpret the seed values as `(start, length)` pairs of ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::UnpairedSeedRange`] for an odd count of seed
    /// values, or an interval construction error for a non-positive or
    /// overflowing length.
    fn seeds_as_ranges(&self) -> DynamicResult<IntervalSet> {
        if self.seed_values.len() % 2 != 0 {
            return Err(SolveError::UnpairedSeedRange(self.seed_values.len()).into());
        }
        let sources = self
            .seed_values
            .chunks_exact(2)
            .map(|pair| Interval::from_start_and_length(pair[0], pair[1]))
            .collect::<Result<IntervalSet, _>>()?;
        Ok(sources)
    }

    /// Find the lowest location number reachable from the seed ranges.
    ///
    /// # Errors
    ///
    /// Returns a dynamic error for a malformed seeds line (see
    /// [`Almanac::seeds_as_ranges`]) or [`SolveError::NoSeeds`] when the
    /// seeds line lists no ranges at all.
    pub fn lowest_location_for_seed_ranges(&self) -> DynamicResult<Number> {
        let sources = self.seeds_as_ranges()?;
        let locations = self.pipeline.run(sources);
        locations
            .minimum_start()
            .ok_or_else(|| SolveError::NoSeeds.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::pipeline::PipelineError;

    const EXAMPLE_INPUT: &str = r"seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn parses_seeds_and_maps() -> DynamicResult<()> {
        let almanac = Almanac::parse(EXAMPLE_INPUT)?;
        assert_eq!(almanac.seed_values(), [79, 14, 55, 13]);
        assert_eq!(almanac.pipeline().tables().len(), 7);
        assert_eq!(almanac.pipeline().tables()[0].source_category(), "seed");
        assert_eq!(
            almanac.pipeline().tables()[6].destination_category(),
            "location"
        );
        Ok(())
    }

    #[test]
    fn maps_each_example_seed_to_its_location() -> DynamicResult<()> {
        let almanac = Almanac::parse(EXAMPLE_INPUT)?;
        let locations: Vec<_> = almanac
            .seed_values()
            .iter()
            .map(|&seed| almanac.pipeline().lookup_point(seed))
            .collect();
        assert_eq!(locations, vec![82, 43, 86, 35]);
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let almanac = Almanac::parse(EXAMPLE_INPUT)?;
        assert_eq!(almanac.lowest_location()?, 35);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let almanac = Almanac::parse(EXAMPLE_INPUT)?;
        assert_eq!(almanac.lowest_location_for_seed_ranges()?, 46);
        Ok(())
    }

    #[test]
    fn rejects_input_without_seeds_prefix() {
        let result = Almanac::parse("79 14 55 13\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_map_header() {
        let input = "seeds: 1 2\n\nsoil map:\n50 98 2\n";
        let error = match Almanac::parse(input) {
            Err(error) => error,
            Ok(_) => panic!("header must not parse"),
        };
        assert!(error.downcast_ref::<AlmanacParseError>().is_some());
    }

    #[test]
    fn rejects_short_rule_line() {
        let input = "seeds: 1 2\n\nseed-to-soil map:\n50 98\n";
        assert!(Almanac::parse(input).is_err());
    }

    #[test]
    fn rejects_unchained_map_categories() {
        let input = "seeds: 1 2\n\nseed-to-soil map:\n50 98 2\n\nwater-to-light map:\n88 18 7\n";
        let error = match Almanac::parse(input) {
            Err(error) => error,
            Ok(_) => panic!("broken chain must not parse"),
        };
        assert!(error.downcast_ref::<PipelineError>().is_some());
    }

    #[test]
    fn empty_seed_list_is_an_explicit_error() -> DynamicResult<()> {
        let almanac = Almanac::parse("seeds: \n\nseed-to-soil map:\n50 98 2\n")?;
        assert_eq!(almanac.lowest_location(), Err(SolveError::NoSeeds));
        assert!(almanac.lowest_location_for_seed_ranges().is_err());
        Ok(())
    }

    #[test]
    fn odd_seed_count_cannot_form_ranges() -> DynamicResult<()> {
        let almanac = Almanac::parse("seeds: 79 14 55\n\nseed-to-soil map:\n50 98 2\n")?;
        let error = match almanac.lowest_location_for_seed_ranges() {
            Err(error) => error,
            Ok(_) => panic!("odd seed count must not solve"),
        };
        assert_eq!(
            error.downcast_ref::<SolveError>(),
            Some(&SolveError::UnpairedSeedRange(3))
        );
        Ok(())
    }
}
