use core::fmt;
use core::ops::Index;
use ndarray::{Array2, ArrayViewMut1, Axis};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Row-major plain-integer view of the board, `rows[y][x]`.
pub type Rows = [[u32; SIDE as usize]; SIDE as usize];

/// Empty cells collected without touching the heap.
pub type FreeCells = SmallVec<[Coord2; CELL_COUNT]>;

/// The 4x4 grid of tiles, indexed by `(x, y)`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Tile>,
}

impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.cells.clone_from(&source.cells);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: Array2::default((SIDE, SIDE).to_nd_index()),
        }
    }

    pub fn from_rows(rows: Rows) -> Result<Self> {
        let mut board = Self::new();
        for coords in iter_coords() {
            let (x, y) = coords;
            board.cells[coords.to_nd_index()] = Tile::new(rows[y as usize][x as usize])?;
        }
        Ok(board)
    }

    pub fn from_array(cells: Array2<Tile>) -> Result<Self> {
        if cells.dim() != (SIDE as usize, SIDE as usize) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    pub fn to_rows(&self) -> Rows {
        let mut rows = Rows::default();
        for coords in iter_coords() {
            let (x, y) = coords;
            rows[y as usize][x as usize] = self[coords].value();
        }
        rows
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < SIDE && coords.1 < SIDE {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.cells[coords.to_nd_index()]
    }

    /// Puts a tile into an empty cell.
    pub fn place(&mut self, coords: Coord2, tile: Tile) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_empty() {
            return Err(GameError::CellOccupied);
        }
        *cell = tile;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Tile::EMPTY);
    }

    pub fn free_cells(&self) -> FreeCells {
        iter_coords().filter(|&coords| self[coords].is_empty()).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|tile| !tile.is_empty())
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|tile| !tile.is_empty()).count()
    }

    /// Sum of every tile on the board.
    pub fn score(&self) -> u64 {
        self.cells.iter().map(|tile| u64::from(tile.value())).sum()
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or_default()
    }

    /// Whether any swipe could still change the board: an empty cell or two orthogonally adjacent equal tiles
    /// that still have room to double.
    pub fn has_any_move(&self) -> bool {
        iter_coords().any(|coords| {
            let tile = self[coords];
            tile.is_empty()
                || (tile.doubled().is_some() && NeighborIter::new(coords).any(|pos| self[pos] == tile))
        })
    }

    /// Pushes every tile towards the edge named by `direction`, returns whether anything changed.
    ///
    /// Each row or column is compacted on its own.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let mut changed = false;
        for mut lane in self.cells.lanes_mut(direction.axis()) {
            if direction.towards_end() {
                lane.invert_axis(Axis(0));
            }
            changed |= compact_lane(lane);
        }
        log::trace!("move {:?} changed: {}", direction, changed);
        changed
    }
}

/// Slides and merges a single lane towards index 0.
///
/// Tiles are visited from the edge outwards and compared with the cell right before them. An empty cell is slid
/// into, an equal tile is merged into unless either side already took part in a merge during this move or the sum
/// would not fit a tile. Passes repeat until the lane settles, which takes at most one pass per cell.
fn compact_lane(mut lane: ArrayViewMut1<'_, Tile>) -> bool {
    let len = lane.len();
    let mut merged = [false; SIDE as usize];
    let mut changed = false;

    for _ in 0..len {
        let mut pass_changed = false;
        for i in 1..len {
            let moving = lane[i];
            if moving.is_empty() {
                continue;
            }

            let target = lane[i - 1];
            if target.is_empty() {
                lane[i - 1] = moving;
                lane[i] = Tile::EMPTY;
                // a merged tile keeps its marker while it keeps sliding
                merged[i - 1] = merged[i];
                merged[i] = false;
                pass_changed = true;
            } else if target == moving && !merged[i - 1] && !merged[i] {
                if let Some(sum) = moving.doubled() {
                    lane[i - 1] = sum;
                    lane[i] = Tile::EMPTY;
                    merged[i - 1] = true;
                    pass_changed = true;
                }
            }
        }

        if !pass_changed {
            break;
        }
        changed = true;
    }

    changed
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIDE {
            for x in 0..SIDE {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>5}", self[(x, y)])?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn board(rows: Rows) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn moved(rows: Rows, direction: Direction) -> (Rows, bool) {
        let mut board = board(rows);
        let changed = board.apply_move(direction);
        (board.to_rows(), changed)
    }

    const EMPTY_ROW: [u32; 4] = [0; 4];

    #[test]
    fn merge_cap_keeps_pairs_apart() {
        let (rows, changed) = moved([[2, 2, 2, 2], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);

        assert!(changed);
        assert_eq!(rows[0], [4, 4, 0, 0]);
    }

    #[test]
    fn single_tile_slides_to_edge() {
        let (rows, changed) = moved([[0, 2, 0, 0], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);

        assert!(changed);
        assert_eq!(rows[0], [2, 0, 0, 0]);
    }

    #[test]
    fn tile_slides_across_several_gaps() {
        let (rows, _) = moved([[0, 0, 0, 8], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);

        assert_eq!(rows[0], [8, 0, 0, 0]);
    }

    #[test]
    fn merge_happens_nearest_the_edge_first() {
        let (rows, _) = moved([[2, 2, 2, 0], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);
        assert_eq!(rows[0], [4, 2, 0, 0]);

        let (rows, _) = moved([[0, 2, 2, 2], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Right);
        assert_eq!(rows[0], [0, 0, 2, 4]);
    }

    #[test]
    fn merged_tile_does_not_merge_again() {
        let (rows, _) = moved([[4, 4, 8, 8], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);
        assert_eq!(rows[0], [8, 16, 0, 0]);

        let (rows, _) = moved([[8, 0, 4, 4], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);
        assert_eq!(rows[0], [8, 8, 0, 0]);

        let (rows, _) = moved([[2, 2, 4, 0], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);
        assert_eq!(rows[0], [4, 4, 0, 0]);
    }

    #[test]
    fn merges_after_sliding_over_gaps() {
        let (rows, _) = moved([[2, 0, 0, 2], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);
        assert_eq!(rows[0], [4, 0, 0, 0]);

        let (rows, _) = moved([[0, 2, 2, 4], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);
        assert_eq!(rows[0], [4, 4, 0, 0]);
    }

    #[test]
    fn vertical_moves_work_on_columns() {
        let start = [[2, 0, 0, 0], [2, 0, 0, 4], [0, 0, 0, 0], [4, 0, 0, 4]];

        let (up, _) = moved(start, Direction::Up);
        assert_eq!(up, [[4, 0, 0, 8], [4, 0, 0, 0], EMPTY_ROW, EMPTY_ROW]);

        let (down, _) = moved(start, Direction::Down);
        assert_eq!(down, [EMPTY_ROW, EMPTY_ROW, [4, 0, 0, 0], [4, 0, 0, 8]]);
    }

    #[test]
    fn blocked_move_reports_no_change() {
        let (rows, changed) = moved([[2, 4, 0, 0], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);

        assert!(!changed);
        assert_eq!(rows[0], [2, 4, 0, 0]);
    }

    #[test]
    fn second_move_after_settling_is_a_no_op() {
        let start = [[0, 2, 0, 8], [8, 0, 8, 2], [0, 0, 0, 2], [16, 2, 0, 0]];

        for direction in Direction::ALL {
            let mut board = board(start);
            assert!(board.apply_move(direction));
            assert!(!board.apply_move(direction), "{:?} changed twice", direction);
        }
    }

    #[test]
    fn pairs_left_by_merge_cap_merge_on_the_next_move() {
        let mut board = board([[2, 2, 2, 2], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW]);

        assert!(board.apply_move(Direction::Left));
        assert!(board.apply_move(Direction::Left));
        assert_eq!(board.to_rows()[0], [8, 0, 0, 0]);
    }

    #[test]
    fn moves_conserve_value_sum() {
        let start = [[2, 2, 4, 8], [4, 0, 4, 4], [2, 2, 2, 2], [0, 16, 16, 0]];
        let before = board(start).score();

        for direction in Direction::ALL {
            let mut board = board(start);
            board.apply_move(direction);
            assert_eq!(board.score(), before);
        }
    }

    #[test]
    fn slide_without_merge_keeps_tile_multiset() {
        let mut board = board([[0, 2, 0, 4], [8, 0, 0, 0], [0, 0, 32, 0], [0, 0, 0, 2]]);

        assert!(board.apply_move(Direction::Down));

        let mut values: alloc::vec::Vec<_> = board
            .to_rows()
            .iter()
            .flatten()
            .copied()
            .filter(|&value| value != 0)
            .collect();
        values.sort_unstable();
        assert_eq!(values, [2, 2, 4, 8, 32]);
    }

    #[test]
    fn checkerboard_has_no_moves() {
        let board = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);

        assert!(board.is_full());
        assert!(!board.has_any_move());
        for direction in Direction::ALL {
            assert!(!board.clone().apply_move(direction));
        }
    }

    #[test]
    fn full_board_with_pair_on_last_row_has_moves() {
        let board = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]]);

        assert!(board.has_any_move());
    }

    #[test]
    fn full_board_with_pair_on_last_column_has_moves() {
        let board = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [4, 2, 4, 8]]);

        assert!(board.has_any_move());
    }

    #[test]
    fn board_with_empty_cell_has_moves() {
        let board = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);

        assert!(board.has_any_move());
        assert_eq!(board.free_cells().as_slice(), [(2, 2)]);
    }

    #[test]
    fn largest_tiles_do_not_merge() {
        let max = Tile::MAX.value();
        let (rows, changed) = moved([[max, max, 0, 0], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);

        assert!(!changed);
        assert_eq!(rows[0], [max, max, 0, 0]);

        let (rows, changed) = moved([[0, max, 0, max], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW], Direction::Left);
        assert!(changed);
        assert_eq!(rows[0], [max, max, 0, 0]);
    }

    #[test]
    fn pair_of_largest_tiles_is_not_a_move() {
        let max = Tile::MAX.value();
        let board = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, max, max]]);

        assert!(!board.has_any_move());
    }

    #[test]
    fn clone_from_copies_cells() {
        let source = board([[2, 0, 0, 0], EMPTY_ROW, EMPTY_ROW, [0, 0, 0, 8]]);
        let mut target = board([[4, 4, 4, 4], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW]);

        target.clone_from(&source);

        assert_eq!(target, source);
    }

    #[test]
    fn from_rows_rejects_non_tiles() {
        assert_eq!(
            Board::from_rows([[3, 0, 0, 0], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW]),
            Err(GameError::InvalidTile(3))
        );
    }

    #[test]
    fn from_array_rejects_wrong_shape() {
        let cells = Array2::default([3, 4]);

        assert_eq!(Board::from_array(cells), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn place_refuses_occupied_and_out_of_range_cells() {
        let mut board = board([[2, 0, 0, 0], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW]);

        assert_eq!(board.place((0, 0), Tile::FOUR), Err(GameError::CellOccupied));
        assert_eq!(board.place((4, 0), Tile::FOUR), Err(GameError::InvalidCoords));
        assert_eq!(board.place((1, 0), Tile::FOUR), Ok(()));
        assert_eq!(board.tile_at((1, 0)), Tile::FOUR);
    }

    #[test]
    fn score_and_max_tile() {
        let board = board([[2, 0, 0, 0], [0, 64, 0, 0], EMPTY_ROW, [0, 0, 0, 4]]);

        assert_eq!(board.score(), 70);
        assert_eq!(board.max_tile().value(), 64);
        assert_eq!(board.tile_count(), 3);
    }

    #[test]
    fn display_renders_rows() {
        let board = board([[2, 0, 0, 0], EMPTY_ROW, EMPTY_ROW, [0, 0, 0, 1024]]);
        let text = board.to_string();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("    2     .     .     ."));
        assert_eq!(lines.nth(2), Some("    .     .     .  1024"));
    }
}
