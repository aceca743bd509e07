//! Static adjacency graph over the rectangular board.

use std::collections::VecDeque;

use cops_and_robber_core::CellIndex;

/// Distance reported for cells a breadth-first search never reached.
pub const UNREACHABLE: u32 = u32::MAX;

/// Orthogonal adjacency table over a `rows` by `columns` grid.
///
/// Neighbours of each cell are stored in ascending index order, which fixes
/// the expansion order of every breadth-first search run over the board and
/// therefore the parent pointers and tie-breaking that depend on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardGraph {
    rows: u32,
    columns: u32,
    adjacency: Vec<Vec<CellIndex>>,
}

impl BoardGraph {
    /// Builds the adjacency table for the provided grid dimensions.
    #[must_use]
    pub fn build(rows: u32, columns: u32) -> Self {
        let cell_count = rows.saturating_mul(columns);
        let adjacency = (0..cell_count)
            .map(|cell| neighbors(cell, rows, columns).collect())
            .collect();

        Self {
            rows,
            columns,
            adjacency,
        }
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.index() < self.adjacency.len()
    }

    /// Orthogonal neighbours of the cell in ascending index order.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the board.
    #[must_use]
    pub fn neighbors(&self, cell: CellIndex) -> &[CellIndex] {
        &self.adjacency[cell.index()]
    }

    /// Row and column of the cell.
    #[must_use]
    pub fn coordinates(&self, cell: CellIndex) -> (u32, u32) {
        (cell.get() / self.columns, cell.get() % self.columns)
    }

    /// Iterates every cell of the board in ascending index order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        (0..self.rows.saturating_mul(self.columns)).map(CellIndex::new)
    }

    /// Unbounded breadth-first search returning the shortest distance from
    /// `source` to every cell, or [`UNREACHABLE`] for cells it never reached.
    #[must_use]
    pub fn distances_from(&self, source: CellIndex) -> Vec<u32> {
        let mut distances = vec![UNREACHABLE; self.cell_count()];
        if !self.contains(source) {
            return distances;
        }

        let mut queue = VecDeque::new();
        distances[source.index()] = 0;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let next_distance = distances[current.index()] + 1;
            for &neighbor in self.neighbors(current) {
                if distances[neighbor.index()] != UNREACHABLE {
                    continue;
                }

                distances[neighbor.index()] = next_distance;
                queue.push_back(neighbor);
            }
        }

        distances
    }

    /// Pointwise minimum of the distances from every source.
    #[must_use]
    pub fn min_distances_from(&self, sources: &[CellIndex]) -> Vec<u32> {
        let mut combined = vec![UNREACHABLE; self.cell_count()];
        for &source in sources {
            let distances = self.distances_from(source);
            for (best, distance) in combined.iter_mut().zip(distances) {
                *best = (*best).min(distance);
            }
        }
        combined
    }
}

fn neighbors(cell: u32, rows: u32, columns: u32) -> impl Iterator<Item = CellIndex> {
    let row = cell / columns;
    let column = cell % columns;
    let mut candidates = [None; 4];
    let mut count = 0;

    if row > 0 {
        candidates[count] = Some(cell - columns);
        count += 1;
    }

    if column > 0 {
        candidates[count] = Some(cell - 1);
        count += 1;
    }

    if column + 1 < columns {
        candidates[count] = Some(cell + 1);
        count += 1;
    }

    if row + 1 < rows {
        candidates[count] = Some(cell + columns);
        count += 1;
    }

    candidates
        .into_iter()
        .take(count)
        .flatten()
        .map(CellIndex::new)
}
