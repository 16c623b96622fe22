use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use minefield_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` takes {expected} arguments, got {found}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid coordinate `{0}`")]
    InvalidCoordinate(String),
}

/// Coordinates as typed by a client. They may point anywhere, including off the field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub x: i64,
    pub y: i64,
}

impl Target {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Engine coordinates, or `None` when they cannot name any cell.
    pub fn coords(self) -> Option<Coord2> {
        Some((Coord::try_from(self.x).ok()?, Coord::try_from(self.y).ok()?))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Look,
    Help,
    Bye,
    Dig(Target),
    Flag(Target),
    Deflag(Target),
}

impl Command {
    pub const fn name(self) -> &'static str {
        use Command::*;
        match self {
            Look => "look",
            Help => "help",
            Bye => "bye",
            Dig(_) => "dig",
            Flag(_) => "flag",
            Deflag(_) => "deflag",
        }
    }
}

/// Formats the line a client would send for this command.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Command::*;
        match self {
            Look | Help | Bye => f.write_str(self.name()),
            Dig(target) | Flag(target) | Deflag(target) => {
                write!(f, "{} {} {}", self.name(), target.x, target.y)
            }
        }
    }
}

fn check_arity(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CommandError::WrongArity {
            command,
            expected,
            found: args.len(),
        })
    }
}

/// Integers too large for `i64` saturate; they are off the field either way.
fn parse_coordinate(token: &str) -> Result<i64, CommandError> {
    token.parse::<i64>().or_else(|err| match err.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(CommandError::InvalidCoordinate(token.to_string())),
    })
}

fn parse_target(command: &'static str, args: &[&str]) -> Result<Target, CommandError> {
    check_arity(command, args, 2)?;
    Ok(Target::new(parse_coordinate(args[0])?, parse_coordinate(args[1])?))
}

/// Whitespace-separated tokens: a command name, then column and row where needed.
impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        match name {
            "look" => check_arity("look", &args, 0).map(|()| Command::Look),
            "help" => check_arity("help", &args, 0).map(|()| Command::Help),
            "bye" => check_arity("bye", &args, 0).map(|()| Command::Bye),
            "dig" => parse_target("dig", &args).map(Command::Dig),
            "flag" => parse_target("flag", &args).map(Command::Flag),
            "deflag" => parse_target("deflag", &args).map(Command::Deflag),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
