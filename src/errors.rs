use std::error::Error;
use std::fmt;

use crate::cells::Cartesian2DCoordinate;

/// Conditions reported back to the caller of `generate` and `solve`.
///
/// A search that finds no path is not an error, `solve` returns `Ok(None)` for it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// Zero sized, or too large to index with `u32` coordinates.
    InvalidDimension { width: usize, height: usize },
    InvalidEndpoint(Cartesian2DCoordinate),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidDimension { width, height } => {
                write!(f, "invalid maze dimensions {}x{}", width, height)
            }
            MazeError::InvalidEndpoint(coord) => {
                write!(f, "endpoint {} is outside the grid", coord)
            }
        }
    }
}

impl Error for MazeError {}
