//! Input commands
//!
//! Each line read from stdin is parsed into a [`Command`]. Most commands map
//! straight to an action; `slow` starts an asynchronous increment instead.

use std::time::Duration;

use crate::actions::Action;

const DEFAULT_SLOW_DELAY: Duration = Duration::from_millis(1000);

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Action),
    SlowIncrement(Duration),
    Help,
}

/// Help text listing all commands
pub const HELP: &str = "\
commands:
  + | inc          increment
  - | dec          decrement (never below zero)
  add <n>          add n (rejected if the result would be negative or overflow)
  reset            back to zero
  slow [ms]        increment from a worker thread after a delay (default 1000ms)
  help             show this help
  q | quit         exit";

/// Parse an input line, returning `None` for unknown or malformed input
pub fn parse(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let argument = words.next();

    let parsed = match (command.to_lowercase().as_str(), argument) {
        ("+" | "inc", None) => Command::Dispatch(Action::Increment),
        ("-" | "dec", None) => Command::Dispatch(Action::Decrement),
        ("add", Some(n)) => Command::Dispatch(Action::Add(n.parse().ok()?)),
        ("reset", None) => Command::Dispatch(Action::Reset),
        ("slow", None) => Command::SlowIncrement(DEFAULT_SLOW_DELAY),
        ("slow", Some(ms)) => Command::SlowIncrement(Duration::from_millis(ms.parse().ok()?)),
        ("help" | "?", None) => Command::Help,
        ("q" | "quit", None) => Command::Dispatch(Action::Quit),
        _ => return None,
    };

    // Trailing words are a typo, not an argument
    words.next().is_none().then_some(parsed)
}
