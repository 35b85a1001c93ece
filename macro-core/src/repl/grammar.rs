//! Parser for the macro console.
//!
//! Lines are short and bounded, so the grammar is a keyword followed by at
//! most one argument. `winnow` handles the lexical pieces (keywords,
//! whitespace, arguments); validation of the argument happens here and
//! produces a [`CommandError`].

use core::fmt;

use winnow::ascii::{space0, space1};
use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::scripts::Phase;

type Parsed<O> = Result<O, ErrMode<ContextError>>;

/// Help text for every console command, in display order.
pub const HELP_TOPICS: &[(&str, &str)] = &[
    ("tick", "tick [count]         - play `count` ticks (default 1)"),
    ("cycle", "cycle [count]        - play until `count` more script passes finish"),
    ("until", "until <phase>        - play until sync|buy|feed|after-feed is entered"),
    ("status", "status               - show phase, step, and counters"),
    ("log", "log                  - list recent cycle-completion pulses"),
    ("reset", "reset                - restart the macro from the sync phase"),
    ("help", "help [topic]         - show help for a command"),
];

/// Structured commands produced by the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Tick(u32),
    Cycle(u32),
    Until(Phase),
    Status,
    Log,
    Reset,
    Help(Option<&'a str>),
}

/// Reasons a console line is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError<'a> {
    Empty,
    UnknownCommand(&'a str),
    MissingArgument { expected: &'static str },
    InvalidCount(&'a str),
    UnknownPhase(&'a str),
    TrailingInput(&'a str),
}

impl fmt::Display for CommandError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => f.write_str("empty command"),
            CommandError::UnknownCommand(word) => write!(f, "unknown command `{word}`"),
            CommandError::MissingArgument { expected } => write!(f, "expected {expected}"),
            CommandError::InvalidCount(text) => {
                write!(f, "invalid count `{text}` (expected 1..={})", u32::MAX)
            }
            CommandError::UnknownPhase(text) => write!(
                f,
                "unknown phase `{text}` (expected sync, buy, feed, or after-feed)"
            ),
            CommandError::TrailingInput(text) => write!(f, "unexpected input `{text}`"),
        }
    }
}

fn keyword<'a>(input: &mut &'a str) -> Parsed<&'a str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    })
    .parse_next(input)
}

fn argument<'a>(input: &mut &'a str) -> Parsed<&'a str> {
    preceded(space1, take_while(1.., |c: char| !c.is_ascii_whitespace())).parse_next(input)
}

fn optional_argument<'a>(input: &mut &'a str) -> Option<&'a str> {
    opt(argument).parse_next(input).ok().flatten()
}

fn count(text: &str) -> Result<u32, CommandError<'_>> {
    match text.parse::<u32>() {
        Ok(0) | Err(_) => Err(CommandError::InvalidCount(text)),
        Ok(value) => Ok(value),
    }
}

fn optional_count<'a>(input: &mut &'a str) -> Result<u32, CommandError<'a>> {
    optional_argument(input).map_or(Ok(1), count)
}

/// Parses one console line.
///
/// # Errors
///
/// Returns a [`CommandError`] describing the first problem in `line`.
pub fn parse(line: &str) -> Result<Command<'_>, CommandError<'_>> {
    let mut input = line.trim();
    if input.is_empty() {
        return Err(CommandError::Empty);
    }

    let first_word = input.split_ascii_whitespace().next().unwrap_or(input);
    let word = keyword
        .parse_next(&mut input)
        .map_err(|_| CommandError::UnknownCommand(first_word))?;
    if word.len() != first_word.len() {
        return Err(CommandError::UnknownCommand(first_word));
    }

    let command = if word.eq_ignore_ascii_case("tick") {
        Command::Tick(optional_count(&mut input)?)
    } else if word.eq_ignore_ascii_case("cycle") {
        Command::Cycle(optional_count(&mut input)?)
    } else if word.eq_ignore_ascii_case("until") {
        let tag = optional_argument(&mut input).ok_or(CommandError::MissingArgument {
            expected: "phase name",
        })?;
        Command::Until(Phase::from_tag(tag).ok_or(CommandError::UnknownPhase(tag))?)
    } else if word.eq_ignore_ascii_case("status") {
        Command::Status
    } else if word.eq_ignore_ascii_case("log") {
        Command::Log
    } else if word.eq_ignore_ascii_case("reset") {
        Command::Reset
    } else if word.eq_ignore_ascii_case("help") {
        Command::Help(optional_argument(&mut input))
    } else {
        return Err(CommandError::UnknownCommand(word));
    };

    let _: Parsed<&str> = space0.parse_next(&mut input);
    if input.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::TrailingInput(input))
    }
}

/// Help line for `topic`, matched case-insensitively.
#[must_use]
pub fn help_for(topic: &str) -> Option<&'static str> {
    HELP_TOPICS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(topic))
        .map(|(_, detail)| *detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_defaults_to_one() {
        assert_eq!(parse("tick"), Ok(Command::Tick(1)));
        assert_eq!(parse("  TICK 250  "), Ok(Command::Tick(250)));
        assert_eq!(parse("cycle 3"), Ok(Command::Cycle(3)));
    }

    #[test]
    fn counts_must_be_positive_integers() {
        assert_eq!(parse("tick 0"), Err(CommandError::InvalidCount("0")));
        assert_eq!(parse("tick -4"), Err(CommandError::InvalidCount("-4")));
        assert_eq!(
            parse("cycle 99999999999"),
            Err(CommandError::InvalidCount("99999999999"))
        );
    }

    #[test]
    fn until_requires_a_known_phase() {
        assert_eq!(parse("until feed"), Ok(Command::Until(Phase::Feed)));
        assert_eq!(parse("until after_feed"), Ok(Command::Until(Phase::AfterFeed)));
        assert_eq!(
            parse("until"),
            Err(CommandError::MissingArgument {
                expected: "phase name"
            })
        );
        assert_eq!(parse("until lunch"), Err(CommandError::UnknownPhase("lunch")));
    }

    #[test]
    fn bare_commands_reject_trailing_input() {
        assert_eq!(parse("status"), Ok(Command::Status));
        assert_eq!(parse("log"), Ok(Command::Log));
        assert_eq!(parse("reset"), Ok(Command::Reset));
        assert_eq!(parse("status now"), Err(CommandError::TrailingInput("now")));
        assert_eq!(parse("tick 2 3"), Err(CommandError::TrailingInput("3")));
    }

    #[test]
    fn help_accepts_an_optional_topic() {
        assert_eq!(parse("help"), Ok(Command::Help(None)));
        assert_eq!(parse("help until"), Ok(Command::Help(Some("until"))));
        assert!(help_for("UNTIL").is_some());
        assert!(help_for("jump").is_none());
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("jump 3"), Err(CommandError::UnknownCommand("jump")));
        assert_eq!(parse("!tick"), Err(CommandError::UnknownCommand("!tick")));
        assert_eq!(parse("tick!"), Err(CommandError::UnknownCommand("tick!")));
    }
}
