//! Typed script commands.
//!
//! # Syntax
//!
//! One call per line, `name(arg, arg, ...)`, integer arguments:
//!
//! | Line                                          | Command                     |
//! |-----------------------------------------------|-----------------------------|
//! | `createOrder(id, createdAt, value, duration)` | [`Command::Create`]         |
//! | `print(id)`                                   | [`Command::Print`]          |
//! | `print(start, end)`                           | [`Command::PrintRange`]     |
//! | `getRankOfOrder(id)`                          | [`Command::Rank`]           |
//! | `cancelOrder(id, now)`                        | [`Command::Cancel`]         |
//! | `updateTime(id, now, newDuration)`            | [`Command::UpdateTime`]     |
//! | `Quit()`                                      | [`Command::Quit`]           |
//!
//! Whitespace around the name and each argument is ignored, and so are empty
//! argument slots (`f(1,,2)` is `f(1, 2)`).

use std::fmt;

use dd_core::{OrderId, Tick};

use crate::{DriverError, DriverResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Create {
        id:         OrderId,
        created_at: Tick,
        value:      i64,
        duration:   i64,
    },
    Print { id: OrderId },
    PrintRange { start: Tick, end: Tick },
    Rank { id: OrderId },
    Cancel { id: OrderId, now: Tick },
    UpdateTime {
        id:       OrderId,
        now:      Tick,
        duration: i64,
    },
    Quit,
}

impl Command {
    /// Parse one script line.  `line` is the 1-based line number used in
    /// error messages.
    pub fn parse(text: &str, line: usize) -> DriverResult<Self> {
        let syntax = |reason: &str| DriverError::Parse { line, reason: reason.to_owned() };

        let text = text.trim();
        let open = text.find('(').ok_or_else(|| syntax("missing `(`"))?;
        let body = text[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| syntax("missing closing `)`"))?;
        let name = text[..open].trim();

        let args = body
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(|a| {
                a.parse::<i64>().map_err(|e| DriverError::Parse {
                    line,
                    reason: format!("argument `{a}`: {e}"),
                })
            })
            .collect::<DriverResult<Vec<i64>>>()?;

        let arity = |expected: &'static str| DriverError::Arity {
            command: name.to_owned(),
            expected,
            found: args.len(),
        };

        let cmd = match (name, args.as_slice()) {
            ("createOrder", &[id, created_at, value, duration]) => Command::Create {
                id: OrderId(id),
                created_at: Tick(created_at),
                value,
                duration,
            },
            ("createOrder", _) => return Err(arity("4")),
            ("print", &[id]) => Command::Print { id: OrderId(id) },
            ("print", &[start, end]) => Command::PrintRange { start: Tick(start), end: Tick(end) },
            ("print", _) => return Err(arity("1 or 2")),
            ("getRankOfOrder", &[id]) => Command::Rank { id: OrderId(id) },
            ("getRankOfOrder", _) => return Err(arity("1")),
            ("cancelOrder", &[id, now]) => Command::Cancel { id: OrderId(id), now: Tick(now) },
            ("cancelOrder", _) => return Err(arity("2")),
            ("updateTime", &[id, now, duration]) => Command::UpdateTime {
                id: OrderId(id),
                now: Tick(now),
                duration,
            },
            ("updateTime", _) => return Err(arity("3")),
            ("Quit", &[]) => Command::Quit,
            ("Quit", _) => return Err(arity("0")),
            _ => return Err(DriverError::UnknownCommand(name.to_owned())),
        };
        Ok(cmd)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Create { id, created_at, value, duration } => {
                write!(f, "createOrder({id}, {created_at}, {value}, {duration})")
            }
            Command::Print { id } => write!(f, "print({id})"),
            Command::PrintRange { start, end } => write!(f, "print({start}, {end})"),
            Command::Rank { id } => write!(f, "getRankOfOrder({id})"),
            Command::Cancel { id, now } => write!(f, "cancelOrder({id}, {now})"),
            Command::UpdateTime { id, now, duration } => {
                write!(f, "updateTime({id}, {now}, {duration})")
            }
            Command::Quit => f.write_str("Quit()"),
        }
    }
}
