#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation-facing session that composes the world with the robber AI.
//!
//! A presentation layer forwards player intents through the `on_*` methods
//! and reads back state through the query methods. Every intent is applied
//! to the world and the resulting events are pumped through the robber AI
//! synchronously until no further commands are produced.

use cops_and_robber_core::{
    AiMode, CellIndex, Command, ConfigError, CopId, Event, GameConfig, Outcome, Phase, PieceKind,
};
use cops_and_robber_system_robber_ai::RobberAi;
use cops_and_robber_world::{self as world, query, reachability::TileState, World};
use tracing::{debug, info};

/// Composes the authoritative world with the robber policy system.
#[derive(Debug)]
pub struct Session {
    world: World,
    robber_ai: RobberAi,
    journal: Vec<Event>,
}

impl Session {
    /// Creates a session for the provided configuration.
    ///
    /// The robber AI starts in the configured mode and draws from a generator
    /// seeded with the configured seed.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let robber_ai = RobberAi::new(config.ai_mode, config.seed);
        let world = World::with_config(config)?;
        Ok(Self {
            world,
            robber_ai,
            journal: Vec::new(),
        })
    }

    /// Player picked one of the two cops.
    pub fn on_select_cop(&mut self, cop: CopId) {
        self.dispatch(Command::SelectCop { cop });
    }

    /// Player clicked a board cell.
    pub fn on_select_cell(&mut self, cell: CellIndex) {
        self.dispatch(Command::SelectCell { cell });
    }

    /// Player pressed the finish-turn control.
    pub fn on_finish_turn(&mut self) {
        self.dispatch(Command::FinishTurn);
    }

    /// Player pressed the play-again control.
    pub fn on_play_again(&mut self) {
        self.dispatch(Command::PlayAgain);
    }

    /// Presentation finished re-initialising after a reset.
    pub fn on_init_game(&mut self) {
        self.dispatch(Command::InitGame);
    }

    /// Ends the game with the provided outcome.
    pub fn on_end_game(&mut self, outcome: Outcome) {
        self.dispatch(Command::EndGame { outcome });
    }

    /// Requests a different robber policy.
    pub fn set_ai_mode(&mut self, mode: AiMode) {
        self.dispatch(Command::SetAiMode { mode });
    }

    /// Read-only access to the composed world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Flags recorded for the tile.
    #[must_use]
    pub fn tile(&self, cell: CellIndex) -> TileState {
        query::tile_view(&self.world).tile(cell)
    }

    /// Reports whether the tile is a legal destination right now.
    #[must_use]
    pub fn is_selectable(&self, cell: CellIndex) -> bool {
        query::tile_view(&self.world).is_selectable(cell)
    }

    /// Reports whether the tile is highlighted as current.
    #[must_use]
    pub fn is_current(&self, cell: CellIndex) -> bool {
        query::tile_view(&self.world).is_current(cell)
    }

    /// Selectable tiles in ascending index order.
    #[must_use]
    pub fn selectable_cells(&self) -> Vec<CellIndex> {
        query::tile_view(&self.world).selectable_cells().collect()
    }

    /// Cell occupied by the provided cop.
    #[must_use]
    pub fn cop_cell(&self, cop: CopId) -> CellIndex {
        query::piece_cell(&self.world, PieceKind::Cop(cop))
    }

    /// Cell occupied by the robber.
    #[must_use]
    pub fn robber_cell(&self) -> CellIndex {
        query::piece_cell(&self.world, PieceKind::Robber)
    }

    /// Number of completed rounds.
    #[must_use]
    pub fn round_count(&self) -> u32 {
        query::round_count(&self.world)
    }

    /// Round counter label.
    #[must_use]
    pub fn rounds_label(&self) -> String {
        query::rounds_label(&self.world)
    }

    /// Active phase of the turn state machine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        query::phase(&self.world)
    }

    /// Terminal message, once the game ended.
    #[must_use]
    pub fn game_over_message(&self) -> Option<&'static str> {
        query::game_over_message(&self.world)
    }

    /// Reports whether the play-again control should be enabled.
    #[must_use]
    pub fn restart_enabled(&self) -> bool {
        query::restart_enabled(&self.world)
    }

    /// Drains every event emitted since the previous call, in order.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.journal)
    }

    fn dispatch(&mut self, command: Command) {
        let mut pending = vec![command];

        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                debug!(?command, phase = ?query::phase(&self.world), "dispatching command");
                world::apply(&mut self.world, command, &mut events);
            }

            if events.is_empty() {
                break;
            }

            for event in &events {
                if let Event::GameEnded { outcome } = event {
                    info!(
                        ?outcome,
                        rounds = query::round_count(&self.world),
                        "game ended"
                    );
                }
            }

            self.robber_ai.handle(
                &events,
                query::board(&self.world),
                query::tile_view(&self.world),
                query::pieces(&self.world),
                query::config(&self.world).move_distance,
                &mut pending,
            );
            self.journal.extend(events);
        }
    }
}
