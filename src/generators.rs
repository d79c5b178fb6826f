use bit_set::BitSet;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::MazeError;
use crate::grid::Grid;
use crate::units::{ColumnLength, RowLength};

/// A freshly carved perfect maze and the two cells a path should join.
#[derive(Debug, Clone)]
pub struct Maze {
    pub grid: Grid,
    pub start: Cartesian2DCoordinate,
    pub finish: Cartesian2DCoordinate,
}

/// Carve a perfect maze of the given size and pick its endpoints.
///
/// Dimensions are checked before anything is allocated.
pub fn generate<R: Rng>(row_width: RowLength,
                        column_height: ColumnLength,
                        rng: &mut R)
                        -> Result<Maze, MazeError> {
    let mut grid = Grid::new(row_width, column_height)?;
    recursive_backtracker(&mut grid, rng);
    let (start, finish) = choose_endpoints(&grid, rng);

    debug!("Generated {}x{} maze with {} passages, start {} finish {}",
           row_width.0,
           column_height.0,
           grid.passages_count(),
           start,
           finish);

    Ok(Maze { grid, start, finish })
}

/// `generate` driven by the thread local generator.
pub fn generate_with_thread_rng(row_width: RowLength,
                                column_height: ColumnLength)
                                -> Result<Maze, MazeError> {
    generate(row_width, column_height, &mut rand::thread_rng())
}

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid.
///
/// A random walk that never steps onto a visited cell, carving as it goes. When the walk is
/// boxed in it backs up along its own path until it finds a cell that still has an unvisited
/// neighbour, and resumes from there. The walk path lives on an explicit stack rather than the
/// call stack so large grids cannot overflow.
///
/// Every cell is entered exactly once, so the carved passages form a spanning tree: exactly
/// `size - 1` open wall-pairs and one simple route between any two cells.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let mut visited = BitSet::with_capacity(grid.size());
    let start = grid.random_cell(rng);
    mark_visited(grid, &mut visited, start);

    let mut path = vec![start];

    while let Some(&current) = path.last() {

        match unvisited_neighbours(grid, &visited, current).choose(rng) {
            Some(&next) => {
                grid.open_wall(current, next)
                    .expect("carving between adjacent in-grid cells cannot fail");
                mark_visited(grid, &mut visited, next);
                path.push(next);
            }
            None => {
                trace!("Backtracking from {}", current);
                let _ = path.pop();
            }
        }
    }
}

/// Start somewhere on the top row, finish somewhere on the bottom row.
///
/// Both columns are uniform over the full row width. A single row grid can produce the same
/// cell for both.
pub fn choose_endpoints<R: Rng>(grid: &Grid,
                                rng: &mut R)
                                -> (Cartesian2DCoordinate, Cartesian2DCoordinate) {
    let RowLength(width) = grid.row_length();
    let ColumnLength(height) = grid.column_length();

    let start = Cartesian2DCoordinate::new(rng.gen_range(0..width) as u32, 0);
    let finish = Cartesian2DCoordinate::new(rng.gen_range(0..width) as u32,
                                            (height - 1) as u32);
    (start, finish)
}

// All walls start closed, so only the visited marks matter when choosing where to go.
fn unvisited_neighbours(grid: &Grid,
                        visited: &BitSet,
                        coord: Cartesian2DCoordinate)
                        -> SmallVec<[Cartesian2DCoordinate; 4]> {
    grid.neighbours(coord)
        .iter()
        .map(|neighbour| neighbour.coord)
        .filter(|neighbour_coord| !is_visited(grid, visited, *neighbour_coord))
        .collect()
}

#[inline]
fn mark_visited(grid: &Grid, visited: &mut BitSet, coord: Cartesian2DCoordinate) {
    if let Some(index) = grid.grid_coordinate_to_index(coord) {
        let _ = visited.insert(index);
    }
}

#[inline]
fn is_visited(grid: &Grid, visited: &BitSet, coord: Cartesian2DCoordinate) -> bool {
    grid.grid_coordinate_to_index(coord)
        .map_or(true, |index| visited.contains(index))
}
