//! Bounded breadth-first reachability over per-tile scratch flags.

use std::collections::VecDeque;

use cops_and_robber_core::CellIndex;

use crate::board::BoardGraph;

/// Transient per-tile flags written by a reachability pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileState {
    /// Set once the search discovered the tile.
    pub visited: bool,
    /// Set when the tile is a legal destination of the pass.
    pub selectable: bool,
    /// Breadth-first depth at which the tile was discovered.
    pub distance: u32,
    /// Tile the search expanded to discover this one.
    pub parent: Option<CellIndex>,
    /// Marks the tile currently highlighted for the player.
    pub current: bool,
}

/// Scratch buffer holding one [`TileState`] per board cell.
///
/// Every logically distinct pass must start from the canonical empty state:
/// stale `visited` or `distance` values left by a previous pass corrupt the
/// next one. [`TileFlags::compute_selectable`] performs the reset itself when
/// asked to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileFlags {
    tiles: Vec<TileState>,
}

impl TileFlags {
    /// Creates a buffer of `cell_count` tiles in the canonical empty state.
    #[must_use]
    pub fn new(cell_count: usize) -> Self {
        Self {
            tiles: vec![TileState::default(); cell_count],
        }
    }

    /// Returns every tile to the canonical empty state.
    pub fn reset(&mut self) {
        self.tiles.fill(TileState::default());
    }

    /// Reports whether every tile is in the canonical empty state.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.tiles.iter().all(|tile| *tile == TileState::default())
    }

    /// Flags recorded for the tile.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the buffer.
    #[must_use]
    pub fn tile(&self, cell: CellIndex) -> TileState {
        self.tiles[cell.index()]
    }

    /// Dense flags stored in cell index order.
    #[must_use]
    pub fn tiles(&self) -> &[TileState] {
        &self.tiles
    }

    /// Reports whether the tile is a legal destination of the last pass.
    #[must_use]
    pub fn is_selectable(&self, cell: CellIndex) -> bool {
        self.tiles
            .get(cell.index())
            .is_some_and(|tile| tile.selectable)
    }

    /// Iterates selectable tiles in ascending index order.
    pub fn selectable_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.selectable)
            .map(|(index, _)| CellIndex::new(index as u32))
    }

    /// Highlights the tile as the current one.
    pub fn mark_current(&mut self, cell: CellIndex) {
        self.tiles[cell.index()].current = true;
    }

    /// Marks the tiles reachable from `source` within `max_depth` steps.
    ///
    /// Tiles are discovered breadth-first; a tile at depth `max_depth` is
    /// never expanded. `blocked` is excluded from the search entirely, so it
    /// is neither marked nor used as a stepping stone. The source itself is
    /// never selectable.
    pub fn compute_selectable(
        &mut self,
        board: &BoardGraph,
        source: CellIndex,
        max_depth: u32,
        blocked: Option<CellIndex>,
        reset_first: bool,
    ) {
        if reset_first {
            self.reset();
        }

        let mut queue = VecDeque::new();
        let origin = &mut self.tiles[source.index()];
        origin.visited = true;
        origin.distance = 0;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let depth = self.tiles[current.index()].distance;
            if depth >= max_depth {
                continue;
            }

            for &neighbor in board.neighbors(current) {
                if Some(neighbor) == blocked {
                    continue;
                }

                let tile = &mut self.tiles[neighbor.index()];
                if tile.visited {
                    continue;
                }

                tile.visited = true;
                tile.distance = depth + 1;
                tile.parent = Some(current);
                tile.selectable = true;
                queue.push_back(neighbor);
            }
        }
    }

    /// Walks parent pointers back from `cell` and returns the path from the
    /// pass's source to `cell`, inclusive of both ends.
    ///
    /// A cell the pass did not visit yields a single-element path.
    #[must_use]
    pub fn path_to(&self, cell: CellIndex) -> Vec<CellIndex> {
        let mut path = vec![cell];
        let mut cursor = cell;
        while let Some(parent) = self.tiles.get(cursor.index()).and_then(|tile| tile.parent) {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        path
    }
}
