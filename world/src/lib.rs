#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the cops and robber engine.
//!
//! The world owns the board graph, the piece positions, the per-tile scratch
//! flags, and the turn state machine. It is the only component that mutates
//! any of them; everything else observes it through [`query`].

pub mod board;
pub mod reachability;

use cops_and_robber_core::{
    AiMode, CellIndex, Command, ConfigError, CopId, Event, GameConfig, Outcome, PieceKind, Phase,
};
use tracing::{debug, trace};

use crate::board::BoardGraph;
use crate::reachability::TileFlags;

/// Cells occupied by the two cops and the robber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pieces {
    cops: [CellIndex; 2],
    robber: CellIndex,
}

impl Pieces {
    fn from_config(config: &GameConfig) -> Self {
        Self {
            cops: config.initial_cops,
            robber: config.initial_robber,
        }
    }

    /// Cell occupied by the provided cop.
    #[must_use]
    pub const fn cop(&self, cop: CopId) -> CellIndex {
        self.cops[cop.index()]
    }

    /// Cells occupied by both cops in index order.
    #[must_use]
    pub const fn cops(&self) -> [CellIndex; 2] {
        self.cops
    }

    /// Cell occupied by the robber.
    #[must_use]
    pub const fn robber(&self) -> CellIndex {
        self.robber
    }

    /// Cell occupied by the provided piece.
    #[must_use]
    pub const fn cell_of(&self, piece: PieceKind) -> CellIndex {
        match piece {
            PieceKind::Cop(cop) => self.cop(cop),
            PieceKind::Robber => self.robber,
        }
    }

    /// Reports whether any cop shares the robber's cell.
    #[must_use]
    pub fn robber_caught(&self) -> bool {
        self.cops.contains(&self.robber)
    }

    fn move_cop(&mut self, cop: CopId, cell: CellIndex) {
        self.cops[cop.index()] = cell;
    }

    fn move_robber(&mut self, cell: CellIndex) {
        self.robber = cell;
    }
}

/// Represents the authoritative cops and robber world state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    board: BoardGraph,
    tiles: TileFlags,
    pieces: Pieces,
    phase: Phase,
    round: u32,
    ai_mode: AiMode,
}

impl World {
    /// Creates a world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(GameConfig::default())
    }

    /// Creates a world for the provided configuration.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GameConfig) -> Self {
        let board = BoardGraph::build(config.rows, config.columns);
        let tiles = TileFlags::new(board.cell_count());
        Self {
            pieces: Pieces::from_config(&config),
            ai_mode: config.ai_mode,
            phase: Phase::Idle,
            round: 0,
            board,
            tiles,
            config,
        }
    }

    fn enter(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn mark_reachable(
        &mut self,
        origin: CellIndex,
        blocked: Option<CellIndex>,
        out_events: &mut Vec<Event>,
    ) {
        self.tiles.compute_selectable(
            &self.board,
            origin,
            self.config.move_distance,
            blocked,
            true,
        );
        self.tiles.mark_current(origin);
        out_events.push(Event::SelectableTilesMarked {
            origin,
            cells: self.tiles.selectable_cells().collect(),
        });
    }

    fn end_game(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        out_events.push(Event::GameEnded { outcome });
        self.enter(Phase::GameOver { outcome }, out_events);
    }

    fn capture_resolved(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.config.capture_ends_game && self.pieces.robber_caught() {
            self.end_game(Outcome::CopsWin, out_events);
            return true;
        }
        false
    }

    fn select_cop(&mut self, cop: CopId, out_events: &mut Vec<Event>) {
        let origin = self.pieces.cop(cop);
        let blocked = self.pieces.cop(cop.other());
        self.mark_reachable(origin, Some(blocked), out_events);
        self.enter(Phase::CopSelected { cop, origin }, out_events);
    }

    fn confirm_destination(
        &mut self,
        cop: CopId,
        destination: CellIndex,
        out_events: &mut Vec<Event>,
    ) {
        let from = self.pieces.cop(cop);
        let path = self.tiles.path_to(destination);
        self.pieces.move_cop(cop, destination);
        self.tiles.mark_current(destination);
        out_events.push(Event::CopMoved {
            cop,
            from,
            to: destination,
            path,
        });

        if self.capture_resolved(out_events) {
            return;
        }
        self.enter(Phase::DestinationConfirmed { cop, destination }, out_events);
    }

    fn start_robber_turn(&mut self, out_events: &mut Vec<Event>) {
        self.tiles.reset();
        let origin = self.pieces.robber();
        self.enter(
            Phase::RobberTurn {
                origin,
                destination: None,
            },
            out_events,
        );
        self.mark_reachable(origin, None, out_events);
        out_events.push(Event::RobberTurnStarted { origin });
    }

    fn resolve_robber_move(
        &mut self,
        origin: CellIndex,
        destination: CellIndex,
        out_events: &mut Vec<Event>,
    ) {
        let path = self.tiles.path_to(destination);
        self.pieces.move_robber(destination);
        self.tiles.mark_current(destination);
        out_events.push(Event::RobberMoved {
            from: origin,
            to: destination,
            path,
        });

        if self.capture_resolved(out_events) {
            return;
        }
        self.enter(
            Phase::RobberTurn {
                origin,
                destination: Some(destination),
            },
            out_events,
        );
    }

    fn complete_round(&mut self, out_events: &mut Vec<Event>) {
        self.tiles.reset();
        self.round = self.round.saturating_add(1);
        out_events.push(Event::RoundCompleted { round: self.round });

        if self.round <= self.config.max_rounds {
            self.enter(Phase::Idle, out_events);
        } else {
            self.end_game(Outcome::RobberWins, out_events);
        }
    }

    fn play_again(&mut self, out_events: &mut Vec<Event>) {
        self.pieces = Pieces::from_config(&self.config);
        self.tiles.reset();
        self.round = 0;
        out_events.push(Event::GameReset);
        self.enter(Phase::Resetting, out_events);
    }

    fn set_ai_mode(&mut self, mode: AiMode, out_events: &mut Vec<Event>) {
        self.ai_mode = mode;
        out_events.push(Event::AiModeChanged { mode });
    }

    fn accepts_ai_mode(&self) -> bool {
        match self.phase {
            Phase::Idle => self.round == 0,
            Phase::Resetting | Phase::GameOver { .. } => true,
            _ => false,
        }
    }

    fn assert_on_board(&self, cell: CellIndex) {
        assert!(
            self.board.contains(cell),
            "cell {} lies outside the {}x{} board",
            cell.get(),
            self.board.rows(),
            self.board.columns()
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that the current phase does not define are ignored and leave the
/// world untouched.
///
/// # Panics
///
/// Panics if a command names a cell outside the board.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if let Command::SelectCell { cell } | Command::MoveRobber { destination: cell } = command {
        world.assert_on_board(cell);
    }

    match (world.phase, command) {
        (Phase::Idle | Phase::CopSelected { .. }, Command::SelectCop { cop }) => {
            world.select_cop(cop, out_events);
        }
        (Phase::CopSelected { cop, .. }, Command::SelectCell { cell }) => {
            if world.tiles.is_selectable(cell) {
                world.confirm_destination(cop, cell, out_events);
            } else {
                trace!(cell = cell.get(), "ignored selection of a non-selectable cell");
            }
        }
        (
            Phase::DestinationConfirmed { .. } | Phase::RobberTurn { .. },
            Command::SelectCell { cell },
        ) => {
            world.enter(Phase::Idle, out_events);
        }
        (Phase::DestinationConfirmed { .. }, Command::FinishTurn) => {
            world.start_robber_turn(out_events);
        }
        (Phase::RobberTurn { .. }, Command::FinishTurn) => {
            world.complete_round(out_events);
        }
        (
            Phase::RobberTurn {
                origin,
                destination: None,
            },
            Command::MoveRobber { destination },
        ) => {
            if destination == origin || world.tiles.is_selectable(destination) {
                world.resolve_robber_move(origin, destination, out_events);
            } else {
                trace!(
                    destination = destination.get(),
                    "ignored robber move outside the reachable set"
                );
            }
        }
        (phase, Command::EndGame { outcome }) if !matches!(phase, Phase::GameOver { .. }) => {
            world.end_game(outcome, out_events);
        }
        (_, Command::PlayAgain) => {
            world.play_again(out_events);
        }
        (Phase::Resetting, Command::InitGame) => {
            world.enter(Phase::Idle, out_events);
        }
        (_, Command::SetAiMode { mode }) if world.accepts_ai_mode() => {
            world.set_ai_mode(mode, out_events);
        }
        (phase, command) => {
            trace!(?phase, ?command, "ignored command");
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use cops_and_robber_core::{
        AiMode, CellIndex, GameConfig, Outcome, Phase, PieceKind, ROUNDS_LABEL,
    };

    use super::{Pieces, World};
    use crate::board::BoardGraph;
    use crate::reachability::{TileFlags, TileState};

    /// Provides read-only access to the configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the board graph.
    #[must_use]
    pub fn board(world: &World) -> &BoardGraph {
        &world.board
    }

    /// Exposes a read-only view of the per-tile flags.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView<'_> {
        TileView {
            flags: &world.tiles,
        }
    }

    /// Captures the cells currently occupied by every piece.
    #[must_use]
    pub fn pieces(world: &World) -> Pieces {
        world.pieces
    }

    /// Cell currently occupied by the provided piece.
    #[must_use]
    pub fn piece_cell(world: &World, piece: PieceKind) -> CellIndex {
        world.pieces.cell_of(piece)
    }

    /// Active phase of the turn state machine.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Number of completed rounds.
    #[must_use]
    pub fn round_count(world: &World) -> u32 {
        world.round
    }

    /// Round counter label as shown to the player.
    #[must_use]
    pub fn rounds_label(world: &World) -> String {
        if world.round == 0 {
            ROUNDS_LABEL.to_owned()
        } else {
            format!("{ROUNDS_LABEL}{}", world.round)
        }
    }

    /// Outcome of the game, once it ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        match world.phase {
            Phase::GameOver { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Terminal message shown to the player, once the game ended.
    #[must_use]
    pub fn game_over_message(world: &World) -> Option<&'static str> {
        outcome(world).map(|outcome| outcome.message())
    }

    /// Reports whether the play-again affordance should be enabled.
    #[must_use]
    pub fn restart_enabled(world: &World) -> bool {
        matches!(world.phase, Phase::GameOver { .. })
    }

    /// Robber policy recorded by the world.
    #[must_use]
    pub fn ai_mode(world: &World) -> AiMode {
        world.ai_mode
    }

    /// Read-only view into the per-tile flags.
    #[derive(Clone, Copy, Debug)]
    pub struct TileView<'a> {
        flags: &'a TileFlags,
    }

    impl<'a> TileView<'a> {
        /// Flags recorded for the tile.
        #[must_use]
        pub fn tile(&self, cell: CellIndex) -> TileState {
            self.flags.tile(cell)
        }

        /// Reports whether the tile is a legal destination.
        #[must_use]
        pub fn is_selectable(&self, cell: CellIndex) -> bool {
            self.flags.is_selectable(cell)
        }

        /// Reports whether the tile is highlighted as current.
        #[must_use]
        pub fn is_current(&self, cell: CellIndex) -> bool {
            self.flags.tile(cell).current
        }

        /// Iterates selectable tiles in ascending index order.
        pub fn selectable_cells(&self) -> impl Iterator<Item = CellIndex> + 'a {
            self.flags.selectable_cells()
        }

        /// Dense flags stored in cell index order.
        #[must_use]
        pub fn tiles(&self) -> &'a [TileState] {
            self.flags.tiles()
        }
    }
}
