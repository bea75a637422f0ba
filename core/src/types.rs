use ndarray::Axis;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`, `x` being the column and `y` the row.
pub type Coord2 = (Coord, Coord);

/// Width and height of the board.
pub const SIDE: Coord = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = (SIDE as usize) * (SIDE as usize);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Edge of the board that a swipe pushes tiles towards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Axis along which tiles travel for this direction.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis(0),
            Self::Up | Self::Down => Axis(1),
        }
    }

    /// Whether the target edge sits at the high end of the axis.
    pub const fn towards_end(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }
}

const DISPLACEMENTS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize)) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= SIDE {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= SIDE {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the orthogonal neighbors of a cell that lie on the board.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize]);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Iterates every board coordinate in row-major order.
pub fn iter_coords() -> impl Iterator<Item = Coord2> {
    (0..SIDE).flat_map(|y| (0..SIDE).map(move |x| (x, y)))
}
