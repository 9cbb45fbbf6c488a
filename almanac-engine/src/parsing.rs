//! Utility functions and errors for parsing almanac input.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::{DynamicError, DynamicResult};

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the
/// string into the desired type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line-oriented scanner over input split into sequences by blank lines.
///
/// Almanac input frames its blocks with blank lines: the seeds line stands
/// alone, then each map block holds a header line and its rule lines. The
/// scanner walks that framing: sequence-scoped methods stop at the blank
/// line ending the current sequence, while [`InputScanner::next_item`] skips
/// ahead over any blank lines to the next piece of content.
///
/// Parser closures receive the zero-based line index alongside the line, for
/// error reporting.
pub struct InputScanner<'input> {
    lines: Peekable<Enumerate<Lines<'input>>>,
}

impl<'input> InputScanner<'input> {
    /// Create a scanner at the start of the input.
    pub fn new(input: &'input str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// Parse the next line within the current sequence.
    ///
    /// Returns `Ok(None)` when the input is exhausted or a blank line ends
    /// the sequence; the blank line is consumed, leaving the scanner at the
    /// start of the next sequence.
    ///
    /// # Errors
    ///
    /// Any error from the parser closure is propagated as a dynamic error.
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> DynamicResult<Option<T>>
    where
        F: FnOnce(usize, &'input str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        match self.lines.next() {
            None => Ok(None),
            Some((_, line)) if line.trim().is_empty() => Ok(None),
            Some((index, line)) => parser(index, line).map(Some).map_err(Into::into),
        }
    }

    /// Skip any blank lines, then parse the next content line.
    ///
    /// Returns `Ok(None)` only when no content remains in the input.
    ///
    /// # Errors
    ///
    /// Any error from the parser closure is propagated as a dynamic error.
    pub fn next_item<T, E, F>(&mut self, parser: F) -> DynamicResult<Option<T>>
    where
        F: FnOnce(usize, &'input str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        while matches!(self.lines.peek(), Some((_, line)) if line.trim().is_empty()) {
            self.lines.next();
        }
        self.next_in_sequence(parser)
    }

    /// Parse every remaining line of the current sequence, collecting the
    /// results in order.
    ///
    /// # Errors
    ///
    /// Stops at the first error from the parser closure and propagates it as
    /// a dynamic error.
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> DynamicResult<Vec<T>>
    where
        F: FnMut(usize, &'input str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: &str = "alpha\n\nbeta\ngamma\n\n\ndelta\n";

    #[test]
    fn next_in_sequence_stops_at_blank_line() -> DynamicResult<()> {
        let mut scanner = InputScanner::new(BLOCKS);

        let first = scanner.next_in_sequence(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(first.as_deref(), Some("alpha"));

        // the blank line ends the sequence
        let end = scanner.next_in_sequence(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(end, None);
        Ok(())
    }

    #[test]
    fn next_item_skips_blank_lines_between_sequences() -> DynamicResult<()> {
        let mut scanner = InputScanner::new(BLOCKS);
        scanner.next_in_sequence(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        scanner.next_in_sequence(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;

        let item = scanner.next_item(|index, line| Ok::<_, DynamicError>((index, line.to_owned())))?;
        assert_eq!(item, Some((2, "beta".to_owned())));
        Ok(())
    }

    #[test]
    fn collect_sequence_gathers_lines_until_blank() -> DynamicResult<()> {
        let mut scanner = InputScanner::new(BLOCKS);

        let first = scanner.collect_sequence(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(first, vec!["alpha".to_owned()]);

        let lines = scanner.collect_sequence(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(lines, vec!["beta".to_owned(), "gamma".to_owned()]);

        // consecutive blank lines are crossed by the next item lookup
        let next = scanner.next_item(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(next.as_deref(), Some("delta"));

        let exhausted = scanner.next_item(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(exhausted, None);
        Ok(())
    }

    #[test]
    fn parse_with_context_names_the_failing_string() {
        let result: Result<i64, _> = parse_with_context("soil");
        let message = match result {
            Err(error) => error.to_string(),
            Ok(_) => String::new(),
        };
        assert_eq!(message, "failed to parse string: \"soil\"");
    }
}
