#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Robber policy system that answers robber turns with a destination.
//!
//! The system never mutates the world. It observes [`Event::RobberTurnStarted`]
//! together with read-only views of the board, the tile flags, and the piece
//! positions, and replies with a single [`Command::MoveRobber`].

use cops_and_robber_core::{AiMode, CellIndex, Command, Event};
use cops_and_robber_world::{board::BoardGraph, query::TileView, reachability::TileFlags, Pieces};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Pure system that reacts to robber turns and emits robber moves.
#[derive(Debug)]
pub struct RobberAi {
    mode: AiMode,
    rng: ChaCha8Rng,
    scratch: TileFlags,
}

impl RobberAi {
    /// Creates a robber policy using the provided mode and random seed.
    #[must_use]
    pub fn new(mode: AiMode, seed: u64) -> Self {
        Self {
            mode,
            rng: ChaCha8Rng::seed_from_u64(seed),
            scratch: TileFlags::new(0),
        }
    }

    /// Policy currently used to choose destinations.
    #[must_use]
    pub const fn mode(&self) -> AiMode {
        self.mode
    }

    /// Consumes world events and immutable views to emit robber commands.
    ///
    /// `move_distance` must match the depth bound the world used to mark the
    /// robber's reachable tiles.
    pub fn handle(
        &mut self,
        events: &[Event],
        board: &BoardGraph,
        tiles: TileView<'_>,
        pieces: Pieces,
        move_distance: u32,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::AiModeChanged { mode } => self.mode = *mode,
                Event::RobberTurnStarted { origin } => {
                    let destination =
                        self.choose(board, tiles, *origin, pieces.cops(), move_distance);
                    out.push(Command::MoveRobber { destination });
                }
                _ => {}
            }
        }
    }

    /// Picks the robber's destination according to the active mode.
    ///
    /// `tiles` must hold the robber's bounded reachability pass, computed
    /// from `robber` with no blocked cell.
    pub fn choose(
        &mut self,
        board: &BoardGraph,
        tiles: TileView<'_>,
        robber: CellIndex,
        cops: [CellIndex; 2],
        move_distance: u32,
    ) -> CellIndex {
        match self.mode {
            AiMode::Random => {
                let destination = choose_random(tiles, robber, &mut self.rng);
                debug!(
                    robber = robber.get(),
                    destination = destination.get(),
                    "random robber destination chosen"
                );
                destination
            }
            AiMode::Smart => {
                let choice =
                    choose_smart(board, &mut self.scratch, robber, &cops, move_distance);
                debug!(
                    robber = robber.get(),
                    destination = choice.cell.get(),
                    distance_to_cops = choice.distance_to_cops,
                    distance_from_robber = choice.distance_from_robber,
                    "smart robber destination chosen"
                );
                choice.cell
            }
        }
    }
}

/// Picks a selectable tile other than `robber` uniformly at random, or stays
/// put when there is none.
pub fn choose_random<R>(tiles: TileView<'_>, robber: CellIndex, rng: &mut R) -> CellIndex
where
    R: rand::Rng + ?Sized,
{
    let candidates: Vec<CellIndex> = tiles
        .selectable_cells()
        .filter(|cell| *cell != robber)
        .collect();
    candidates.choose(rng).copied().unwrap_or(robber)
}

/// Destination picked by the maximin policy together with its scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmartChoice {
    /// Chosen destination.
    pub cell: CellIndex,
    /// Distance from the destination to the nearest cop.
    pub distance_to_cops: u32,
    /// Distance from the robber's current cell to the destination.
    pub distance_from_robber: u32,
}

/// Picks the reachable tile that maximises the distance to the nearest cop.
///
/// Ties are broken by the larger distance from the robber's current cell,
/// and remaining ties by the lowest cell index. When no tile is reachable the
/// robber stays put. `scratch` is reset and refilled with the robber's bounded
/// reachability pass.
pub fn choose_smart(
    board: &BoardGraph,
    scratch: &mut TileFlags,
    robber: CellIndex,
    cops: &[CellIndex],
    move_distance: u32,
) -> SmartChoice {
    let from_robber = board.distances_from(robber);
    let to_cops = board.min_distances_from(cops);

    if scratch.tiles().len() != board.cell_count() {
        *scratch = TileFlags::new(board.cell_count());
    }
    scratch.compute_selectable(board, robber, move_distance, None, true);

    let mut best: Option<SmartChoice> = None;
    for cell in scratch.selectable_cells() {
        if cell == robber {
            continue;
        }

        let candidate = SmartChoice {
            cell,
            distance_to_cops: to_cops[cell.index()],
            distance_from_robber: from_robber[cell.index()],
        };
        let improves = match best {
            None => true,
            Some(incumbent) => {
                candidate.distance_to_cops > incumbent.distance_to_cops
                    || (candidate.distance_to_cops == incumbent.distance_to_cops
                        && candidate.distance_from_robber > incumbent.distance_from_robber)
            }
        };
        if improves {
            best = Some(candidate);
        }
    }

    best.unwrap_or(SmartChoice {
        cell: robber,
        distance_to_cops: to_cops.get(robber.index()).copied().unwrap_or(0),
        distance_from_robber: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: u32) -> CellIndex {
        CellIndex::new(value)
    }

    #[test]
    fn smart_prefers_the_tile_farthest_from_the_nearest_cop() {
        let board = BoardGraph::build(5, 5);
        let mut scratch = TileFlags::new(board.cell_count());

        let choice = choose_smart(&board, &mut scratch, cell(12), &[cell(0), cell(4)], 2);

        assert_eq!(choice.cell, cell(22));
        assert_eq!(choice.distance_to_cops, 6);
        assert_eq!(choice.distance_from_robber, 2);
    }

    #[test]
    fn smart_stays_put_without_candidates() {
        let board = BoardGraph::build(1, 1);
        let mut scratch = TileFlags::new(board.cell_count());

        let choice = choose_smart(&board, &mut scratch, cell(0), &[], 2);

        assert_eq!(choice.cell, cell(0));
    }

    #[test]
    fn smart_resizes_an_undersized_scratch_buffer() {
        let board = BoardGraph::build(3, 3);
        let mut scratch = TileFlags::new(0);

        let choice = choose_smart(&board, &mut scratch, cell(4), &[cell(0)], 1);

        assert_eq!(scratch.tiles().len(), 9);
        assert_eq!(choice.cell, cell(5));
    }

    #[test]
    fn random_stays_put_without_candidates() {
        let world = cops_and_robber_world::World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let destination = choose_random(
            cops_and_robber_world::query::tile_view(&world),
            cell(60),
            &mut rng,
        );

        assert_eq!(destination, cell(60));
    }

    #[test]
    fn mode_follows_world_events() {
        let world = cops_and_robber_world::World::new();
        let mut ai = RobberAi::new(AiMode::Random, 1);
        let mut commands = Vec::new();

        ai.handle(
            &[Event::AiModeChanged { mode: AiMode::Smart }],
            cops_and_robber_world::query::board(&world),
            cops_and_robber_world::query::tile_view(&world),
            cops_and_robber_world::query::pieces(&world),
            2,
            &mut commands,
        );

        assert_eq!(ai.mode(), AiMode::Smart);
        assert!(commands.is_empty());
    }
}
