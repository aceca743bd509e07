use std::{error::Error, fmt, num::ParseIntError};

use cops_and_robber_core::{AiMode, CellIndex, CopId};

/// Help text listing every interactive command.
pub(crate) const HELP: &str = "\
commands:
  cop <0|1>        select a cop
  cell <index>     move the selected cop, or acknowledge a move
  at <row> <col>   same as `cell`, addressed by coordinates
  finish           finish the current turn
  again            start a new game
  mode <random|smart>
                   choose the robber policy before play starts
  show             print the board
  help             print this text
  quit             leave the game";

/// Player intent decoded from one line of interactive input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerInput {
    SelectCop(CopId),
    SelectCell(CellIndex),
    FinishTurn,
    PlayAgain,
    SetAiMode(AiMode),
    Show,
    Help,
    Quit,
}

/// Board extent used to validate cell addresses while parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BoardExtent {
    pub(crate) rows: u32,
    pub(crate) columns: u32,
}

impl BoardExtent {
    fn cell_count(self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }
}

impl PlayerInput {
    /// Decodes a line typed by the player.
    pub(crate) fn parse(line: &str, extent: BoardExtent) -> Result<Self, InputError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Err(InputError::Empty);
        };

        let input = match keyword.to_ascii_lowercase().as_str() {
            "cop" | "c" => {
                let raw = parse_number(words.next(), "cop")?;
                let cop = CopId::from_index(raw as usize).ok_or(InputError::UnknownCop(raw))?;
                Self::SelectCop(cop)
            }
            "cell" | "x" => {
                let raw = parse_number(words.next(), "cell")?;
                if raw >= extent.cell_count() {
                    return Err(InputError::CellOutOfRange {
                        cell: raw,
                        cell_count: extent.cell_count(),
                    });
                }
                Self::SelectCell(CellIndex::new(raw))
            }
            "at" => {
                let row = parse_number(words.next(), "row")?;
                let column = parse_number(words.next(), "column")?;
                if row >= extent.rows || column >= extent.columns {
                    return Err(InputError::CoordinatesOutOfRange { row, column });
                }
                Self::SelectCell(CellIndex::new(row * extent.columns + column))
            }
            "finish" | "f" => Self::FinishTurn,
            "again" => Self::PlayAgain,
            "mode" => match words.next() {
                Some("random") => Self::SetAiMode(AiMode::Random),
                Some("smart") => Self::SetAiMode(AiMode::Smart),
                Some(other) => return Err(InputError::UnknownMode(other.to_owned())),
                None => return Err(InputError::MissingArgument("mode")),
            },
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(InputError::UnknownCommand(keyword.to_owned())),
        };

        if let Some(extra) = words.next() {
            return Err(InputError::TrailingInput(extra.to_owned()));
        }
        Ok(input)
    }
}

fn parse_number(word: Option<&str>, name: &'static str) -> Result<u32, InputError> {
    let word = word.ok_or(InputError::MissingArgument(name))?;
    word.parse()
        .map_err(|error| InputError::InvalidNumber(word.to_owned(), error))
}

/// Errors that can occur while decoding interactive input.
#[derive(Debug)]
pub(crate) enum InputError {
    /// The line was empty or contained only whitespace.
    Empty,
    /// The keyword did not name a known command.
    UnknownCommand(String),
    /// A required argument was missing.
    MissingArgument(&'static str),
    /// An argument that should be a number was not.
    InvalidNumber(String, ParseIntError),
    /// The cop index does not name one of the two cops.
    UnknownCop(u32),
    /// The cell index lies outside the board.
    CellOutOfRange { cell: u32, cell_count: u32 },
    /// The coordinates lie outside the board.
    CoordinatesOutOfRange { row: u32, column: u32 },
    /// The robber policy name was not recognised.
    UnknownMode(String),
    /// The line continued after a complete command.
    TrailingInput(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "type a command, or `help` to list them"),
            Self::UnknownCommand(keyword) => write!(f, "unknown command '{keyword}'"),
            Self::MissingArgument(name) => write!(f, "missing {name} argument"),
            Self::InvalidNumber(word, error) => write!(f, "'{word}' is not a number: {error}"),
            Self::UnknownCop(raw) => write!(f, "there is no cop {raw}; use 0 or 1"),
            Self::CellOutOfRange { cell, cell_count } => {
                write!(f, "cell {cell} is off the board of {cell_count} cells")
            }
            Self::CoordinatesOutOfRange { row, column } => {
                write!(f, "row {row}, column {column} is off the board")
            }
            Self::UnknownMode(mode) => write!(f, "unknown robber mode '{mode}'"),
            Self::TrailingInput(extra) => write!(f, "unexpected '{extra}' after the command"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidNumber(_, error) => Some(error),
            _ => None,
        }
    }
}
