use std::fmt;

use crate::units::{ColumnIndex, RowIndex, RowLength};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: RowLength) -> Cartesian2DCoordinate {
        let RowLength(width) = row_length;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// Grid adjacency: the two coordinates differ by exactly one step along one axis.
    pub fn is_adjacent(&self, other: Cartesian2DCoordinate) -> bool {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx + dy == 1
    }

    /// Which of our walls faces `other`, if `other` is adjacent.
    pub fn wall_towards(&self, other: Cartesian2DCoordinate) -> Option<Wall> {
        Wall::ALL
            .iter()
            .cloned()
            .find(|wall| wall.offset(*self) == Some(other))
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four sides of a square cell. `Top` faces row `y - 1`, `Left` faces column `x - 1`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Wall {
    Top,
    Right,
    Bottom,
    Left,
}

impl Wall {
    /// Fixed probing order, also the bit order of a cell's wall flags.
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Right, Wall::Bottom, Wall::Left];

    #[inline]
    pub fn bit_offset(self) -> usize {
        match self {
            Wall::Top => 0,
            Wall::Right => 1,
            Wall::Bottom => 2,
            Wall::Left => 3,
        }
    }

    /// The side of the neighbouring cell that shares this wall.
    pub fn opposite(self) -> Wall {
        match self {
            Wall::Top => Wall::Bottom,
            Wall::Right => Wall::Left,
            Wall::Bottom => Wall::Top,
            Wall::Left => Wall::Right,
        }
    }

    /// Creates a new coordinate offset 1 cell away through this wall.
    /// Returns None if the coordinate is not representable. Grid bounds are not checked here.
    pub fn offset(self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            Wall::Top => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            Wall::Right => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            Wall::Bottom => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            Wall::Left => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }
}
