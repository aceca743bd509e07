#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Vocabulary of the cops and robber engine.
//!
//! Player intents travel to the world as [`Command`]s and every state change
//! comes back as an [`Event`]. Board cells are addressed by [`CellIndex`] in
//! row-major order, turn progress is a [`Phase`], and a game is described by
//! a [`GameConfig`] that must pass [`GameConfig::validate`] before play.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label prefix shown next to the round counter.
pub const ROUNDS_LABEL: &str = "Rounds: ";

/// Terminal message shown to the cop player when the robber is caught.
pub const WIN_MESSAGE: &str = "You Win!";

/// Terminal message shown to the cop player when the robber survives.
pub const LOSE_MESSAGE: &str = "You Lose!";

const DEFAULT_ROWS: u32 = 8;
const DEFAULT_COLUMNS: u32 = 8;
const DEFAULT_MOVE_DISTANCE: u32 = 2;
const DEFAULT_MAX_ROUNDS: u32 = 10;
const DEFAULT_INITIAL_COPS: [u32; 2] = [0, 7];
const DEFAULT_INITIAL_ROBBER: u32 = 60;
const DEFAULT_SEED: u64 = 0x6c62_272e_07bb_0142;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Activates one of the cops and marks the cells it may move to.
    SelectCop {
        /// Cop the player clicked on.
        cop: CopId,
    },
    /// Reports that the player clicked on a board cell.
    SelectCell {
        /// Cell the player clicked on.
        cell: CellIndex,
    },
    /// Ends the current half of the round.
    FinishTurn,
    /// Requests that the robber resolve its pending move onto the provided cell.
    MoveRobber {
        /// Cell chosen by the robber policy. Staying on the origin is allowed.
        destination: CellIndex,
    },
    /// Terminates the game with the provided outcome.
    EndGame {
        /// Result announced to the player.
        outcome: Outcome,
    },
    /// Returns every piece to its starting cell and clears the round counter.
    PlayAgain,
    /// Signals that the presentation layer finished re-initialising after a reset.
    InitGame,
    /// Selects the robber policy used for subsequent robber turns.
    SetAiMode {
        /// Policy the robber should adopt.
        mode: AiMode,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Announces that the turn state machine entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing the command.
        phase: Phase,
    },
    /// Reports the cells marked selectable by a bounded reachability pass.
    SelectableTilesMarked {
        /// Cell the pass started from.
        origin: CellIndex,
        /// Selectable cells in ascending index order.
        cells: Vec<CellIndex>,
    },
    /// Confirms that a cop moved between two cells.
    CopMoved {
        /// Cop that moved.
        cop: CopId,
        /// Cell the cop occupied before moving.
        from: CellIndex,
        /// Cell the cop occupies after moving.
        to: CellIndex,
        /// Cells visited along the breadth-first path, inclusive of both ends.
        path: Vec<CellIndex>,
    },
    /// Announces that the robber must choose a destination.
    RobberTurnStarted {
        /// Cell the robber occupies at the start of its turn.
        origin: CellIndex,
    },
    /// Confirms that the robber resolved its move.
    RobberMoved {
        /// Cell the robber occupied before moving.
        from: CellIndex,
        /// Cell the robber occupies after moving.
        to: CellIndex,
        /// Cells visited along the breadth-first path, inclusive of both ends.
        path: Vec<CellIndex>,
    },
    /// Reports that a full round completed.
    RoundCompleted {
        /// Number of rounds completed so far.
        round: u32,
    },
    /// Announces that the game reached a terminal outcome.
    GameEnded {
        /// Result of the game.
        outcome: Outcome,
    },
    /// Confirms that pieces, flags, and counters returned to their initial values.
    GameReset,
    /// Announces that the robber policy changed.
    AiModeChanged {
        /// Policy that became active.
        mode: AiMode,
    },
}

/// Flat row-major index of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Creates a new cell index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize` suitable for slice access.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identifies one of the two cops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CopId {
    /// Cop with index 0.
    First,
    /// Cop with index 1.
    Second,
}

impl CopId {
    /// Both cops in index order.
    pub const ALL: [CopId; 2] = [CopId::First, CopId::Second];

    /// Converts a raw cop index into an identifier.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    /// Zero-based index of the cop.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The cop that is not `self`.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Kinds of pieces placed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// One of the two pursuing cops.
    Cop(CopId),
    /// The single evading robber.
    Robber,
}

/// Policy used by the robber to pick its destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    /// Uniformly random choice among the reachable cells.
    #[default]
    Random,
    /// Maximin choice that keeps the robber as far from the nearest cop as possible.
    Smart,
}

/// Terminal result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A cop and the robber ended up on the same cell.
    CopsWin,
    /// The robber survived the round budget.
    RobberWins,
}

impl Outcome {
    /// Message presented to the cop player.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::CopsWin => WIN_MESSAGE,
            Self::RobberWins => LOSE_MESSAGE,
        }
    }
}

/// Phases of the turn state machine together with their phase-local data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the player to pick a cop.
    #[default]
    Idle,
    /// A cop is active and its legal destinations are marked.
    CopSelected {
        /// Cop the player picked.
        cop: CopId,
        /// Cell the cop occupied when it was picked.
        origin: CellIndex,
    },
    /// The active cop moved and the player may finish the turn.
    DestinationConfirmed {
        /// Cop that moved.
        cop: CopId,
        /// Cell the cop moved onto.
        destination: CellIndex,
    },
    /// The robber is moving or has just moved.
    RobberTurn {
        /// Cell the robber occupied when its turn started.
        origin: CellIndex,
        /// Cell the robber moved onto, once the move resolved.
        destination: Option<CellIndex>,
    },
    /// The game finished.
    GameOver {
        /// Result of the game.
        outcome: Outcome,
    },
    /// Pieces were reset and the presentation layer is re-initialising.
    Resetting,
}

/// Static configuration describing the board and the rules of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of board rows.
    pub rows: u32,
    /// Number of board columns.
    pub columns: u32,
    /// Depth bound of the breadth-first search that produces legal moves.
    pub move_distance: u32,
    /// Number of rounds the robber must survive to win.
    pub max_rounds: u32,
    /// Starting cells of the two cops.
    pub initial_cops: [CellIndex; 2],
    /// Starting cell of the robber.
    pub initial_robber: CellIndex,
    /// Policy used by the robber.
    pub ai_mode: AiMode,
    /// Seed for the robber's random source.
    pub seed: u64,
    /// Ends the game as soon as a cop and the robber share a cell.
    pub capture_ends_game: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            move_distance: DEFAULT_MOVE_DISTANCE,
            max_rounds: DEFAULT_MAX_ROUNDS,
            initial_cops: [
                CellIndex::new(DEFAULT_INITIAL_COPS[0]),
                CellIndex::new(DEFAULT_INITIAL_COPS[1]),
            ],
            initial_robber: CellIndex::new(DEFAULT_INITIAL_ROBBER),
            ai_mode: AiMode::Random,
            seed: DEFAULT_SEED,
            capture_ends_game: true,
        }
    }
}

impl GameConfig {
    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }

    /// Starting cell of the provided piece.
    #[must_use]
    pub const fn initial_cell(&self, piece: PieceKind) -> CellIndex {
        match piece {
            PieceKind::Cop(cop) => self.initial_cops[cop.index()],
            PieceKind::Robber => self.initial_robber,
        }
    }

    /// Checks that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if self.rows.checked_mul(self.columns).is_none() {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if self.move_distance == 0 {
            return Err(ConfigError::ZeroMoveDistance);
        }

        let pieces = [
            PieceKind::Cop(CopId::First),
            PieceKind::Cop(CopId::Second),
            PieceKind::Robber,
        ];
        let cell_count = self.cell_count();
        for piece in pieces {
            let cell = self.initial_cell(piece);
            if cell.get() >= cell_count {
                return Err(ConfigError::StartOutOfRange {
                    piece,
                    cell,
                    cell_count,
                });
            }
        }

        for (index, first) in pieces.iter().enumerate() {
            for second in &pieces[index + 1..] {
                if self.initial_cell(*first) == self.initial_cell(*second) {
                    return Err(ConfigError::SharedStart {
                        first: *first,
                        second: *second,
                        cell: self.initial_cell(*first),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Reasons a [`GameConfig`] cannot be used to start a game.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid has no cells.
    #[error("grid of {rows}x{columns} cells is empty")]
    EmptyGrid {
        /// Configured number of rows.
        rows: u32,
        /// Configured number of columns.
        columns: u32,
    },
    /// The grid has more cells than a [`CellIndex`] can address.
    #[error("grid of {rows}x{columns} cells exceeds the addressable cell range")]
    GridTooLarge {
        /// Configured number of rows.
        rows: u32,
        /// Configured number of columns.
        columns: u32,
    },
    /// The move distance would leave every piece without legal moves.
    #[error("move distance must be at least 1")]
    ZeroMoveDistance,
    /// A starting cell lies outside the grid.
    #[error("{piece:?} starts on cell {} but the grid only has {cell_count} cells", .cell.get())]
    StartOutOfRange {
        /// Piece whose starting cell is invalid.
        piece: PieceKind,
        /// Configured starting cell.
        cell: CellIndex,
        /// Number of cells on the board.
        cell_count: u32,
    },
    /// Two pieces were configured to start on the same cell.
    #[error("{first:?} and {second:?} both start on cell {}", .cell.get())]
    SharedStart {
        /// First piece placed on the cell.
        first: PieceKind,
        /// Second piece placed on the cell.
        second: PieceKind,
        /// Shared starting cell.
        cell: CellIndex,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_grid() {
        let config = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                rows: 0,
                columns: 8
            })
        );
    }

    #[test]
    fn validate_rejects_start_outside_grid() {
        let config = GameConfig {
            rows: 5,
            columns: 5,
            initial_cops: [CellIndex::new(0), CellIndex::new(4)],
            initial_robber: CellIndex::new(25),
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::StartOutOfRange {
                piece: PieceKind::Robber,
                cell: CellIndex::new(25),
                cell_count: 25,
            })
        );
    }

    #[test]
    fn validate_rejects_shared_start() {
        let config = GameConfig {
            initial_cops: [CellIndex::new(3), CellIndex::new(3)],
            ..GameConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::SharedStart {
                first: PieceKind::Cop(CopId::First),
                second: PieceKind::Cop(CopId::Second),
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_zero_move_distance() {
        let config = GameConfig {
            move_distance: 0,
            ..GameConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroMoveDistance));
    }

    #[test]
    fn cop_ids_convert_from_raw_indices() {
        assert_eq!(CopId::from_index(0), Some(CopId::First));
        assert_eq!(CopId::from_index(1), Some(CopId::Second));
        assert_eq!(CopId::from_index(2), None);
        assert_eq!(CopId::First.other(), CopId::Second);
        assert_eq!(CopId::Second.other().index(), 0);
    }

    #[test]
    fn outcome_messages_match_player_perspective() {
        assert_eq!(Outcome::CopsWin.message(), "You Win!");
        assert_eq!(Outcome::RobberWins.message(), "You Lose!");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            rows = 5
            columns = 5
            initial_cops = [0, 4]
            initial_robber = 12
            ai_mode = "smart"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.rows, 5);
        assert_eq!(config.initial_cops, [CellIndex::new(0), CellIndex::new(4)]);
        assert_eq!(config.initial_robber, CellIndex::new(12));
        assert_eq!(config.ai_mode, AiMode::Smart);
        assert_eq!(config.move_distance, 2);
        assert_eq!(config.max_rounds, 10);
        assert!(config.capture_ends_game);
        assert_eq!(config.validate(), Ok(()));
    }
}
