//! Running the almanac solution with output events.
//!
//! [`run`] parses an almanac and solves both parts, reporting progress and
//! results through an [`OutputHandler`] so callers own all presentation. The
//! handler optionally receives measured durations when timing is requested.

use std::fmt::Display;
use std::time::Duration;

use crate::almanac::Almanac;
use crate::{DynamicResult, PartKind};

/// The display name of the solution, passed to handlers before any event.
pub const SOLUTION_NAME: &str = "Day 5: If You Give A Seed A Fertilizer";

/// A trait for an output events handler.
///
/// When the solution runs, the steps of running it lead to events to output
/// through a handler as feedback and logging.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of the run.
    fn solution_name(&mut self, name: &str);

    /// Called when the run starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts, with a [`PartKind`] to identify
    /// the part.
    fn part_start(&mut self, part: PartKind);

    /// Called when a part finishes to output the result, with a [`PartKind`]
    /// to identify the part.
    ///
    /// The duration taken to run the part is optionally passed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);
}

/// Measure the duration of an expression.
///
/// The macro evaluates the given expression once and returns a tuple of the
/// expression's result and the elapsed [`Duration`][std::time::Duration].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// A macro to optionally measure the duration of an expression.
///
/// Evaluates the given expression and returns a tuple of the expression's
/// result and an optional [`Duration`][std::time::Duration]: the measured
/// duration if the `$timed` flag evaluates to `true`, `None` otherwise.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// Parse an almanac and solve both parts, outputting events through the
/// handler.
///
/// # Arguments
///
/// - `input` - The almanac text to parse and solve.
/// - `handler` - The output handler to output events to.
/// - `timed` - A flag to measure the time to parse & solve then output the
///   elapsed times to the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or solving is propagated;
/// nothing is retried, as a repeated identical run repeats the identical
/// result.
pub fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()> {
    handler.solution_name(SOLUTION_NAME);

    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(Almanac::parse(input), timed);
    let almanac = result?;
    handler.parse_end(duration_opt);

    handler.part_start(PartKind::One);
    let (result, duration_opt) =
        measure_with_optional_duration!(almanac.lowest_location(), timed);
    let output = result?;
    handler.part_output(PartKind::One, &output, duration_opt);

    handler.part_start(PartKind::Two);
    let (result, duration_opt) =
        measure_with_optional_duration!(almanac.lowest_location_for_seed_ranges(), timed);
    let output = result?;
    handler.part_output(PartKind::Two, &output, duration_opt);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str =
        "seeds: 79 14 55 13\n\nseed-to-soil map:\n50 98 2\n52 50 48\n";

    /// A handler recording every event for assertions.
    #[derive(Default)]
    struct RecordingHandler {
        names: Vec<String>,
        parse_events: Vec<&'static str>,
        part_outputs: Vec<(PartKind, String, bool)>,
    }

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.names.push(name.to_owned());
        }

        fn parse_start(&mut self) {
            self.parse_events.push("start");
        }

        fn parse_end(&mut self, _duration_opt: Option<Duration>) {
            self.parse_events.push("end");
        }

        fn part_start(&mut self, _part: PartKind) {
            // outputs are recorded with their part already
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.part_outputs
                .push((part, output.to_string(), duration_opt.is_some()));
        }
    }

    #[test]
    fn run_emits_name_parse_events_and_both_answers() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        run(EXAMPLE_INPUT, &mut handler, false)?;

        assert_eq!(handler.names, vec![SOLUTION_NAME.to_owned()]);
        assert_eq!(handler.parse_events, vec!["start", "end"]);
        // seeds 79, 14, 55, 13 map to soil 81, 14, 57, 13; ranges (79, 14)
        // and (55, 13) map to soil starting at 81 and 57
        assert_eq!(
            handler.part_outputs,
            vec![
                (PartKind::One, "13".to_owned(), false),
                (PartKind::Two, "57".to_owned(), false),
            ]
        );
        Ok(())
    }

    #[test]
    fn run_with_timing_passes_durations() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        run(EXAMPLE_INPUT, &mut handler, true)?;

        assert!(handler.part_outputs.iter().all(|(_, _, timed)| *timed));
        Ok(())
    }

    #[test]
    fn run_propagates_parse_errors() {
        let mut handler = RecordingHandler::default();
        assert!(run("not an almanac", &mut handler, false).is_err());
        assert!(handler.part_outputs.is_empty());
    }
}
