use bit_set::BitSet;
use log::debug;

use crate::cells::{Cartesian2DCoordinate, Wall};
use crate::errors::MazeError;
use crate::grid::Grid;

/// One frame of the depth first search: a cell on the current path and the index into
/// `Wall::ALL` of the next wall to probe from it.
type SearchFrame = (Cartesian2DCoordinate, usize);

/// Find a path from `start` to `finish` through open walls with a depth first search.
///
/// Walls are probed in the fixed order top, right, bottom, left, so a given grid and pair of
/// endpoints always produce the same path. On a perfect maze that is the only simple path; on
/// any other grid it is *a* path, not necessarily the shortest.
///
/// `Ok(None)` means the search was exhausted without reaching `finish`, which can only happen
/// on a grid that is not fully connected. Endpoints outside the grid are `InvalidEndpoint`.
pub fn solve(grid: &Grid,
             start: Cartesian2DCoordinate,
             finish: Cartesian2DCoordinate)
             -> Result<Option<Vec<Cartesian2DCoordinate>>, MazeError> {

    let (start_index, _) = match (grid.grid_coordinate_to_index(start),
                                  grid.grid_coordinate_to_index(finish)) {
        (Some(s), Some(f)) => (s, f),
        (None, _) => return Err(MazeError::InvalidEndpoint(start)),
        (_, None) => return Err(MazeError::InvalidEndpoint(finish)),
    };

    if start == finish {
        return Ok(Some(vec![start]));
    }

    let mut visited = BitSet::with_capacity(grid.size());
    let _ = visited.insert(start_index);

    // The frames double as the path: backtracking pops the last cell off both.
    let mut frames: Vec<SearchFrame> = vec![(start, 0)];

    while let Some(frame) = frames.last_mut() {
        let (current, wall_index) = *frame;

        let wall = match Wall::ALL.get(wall_index) {
            Some(&wall) => wall,
            None => {
                let _ = frames.pop();
                continue;
            }
        };
        frame.1 += 1;

        let next = match grid.passage_neighbour(current, wall) {
            Some(next) => next,
            None => continue,
        };
        let newly_visited = grid.grid_coordinate_to_index(next)
            .map_or(false, |index| visited.insert(index));

        if newly_visited {
            frames.push((next, 0));
            if next == finish {
                return Ok(Some(frames.into_iter().map(|(coord, _)| coord).collect()));
            }
        }
    }

    debug!("No path found from {} to {}", start, finish);
    Ok(None)
}

/// Does `path` only step between adjacent cells with the wall between them open?
///
/// An empty path is trivially valid. Any coordinate outside the grid makes it invalid.
pub fn is_valid_path(grid: &Grid, path: &[Cartesian2DCoordinate]) -> bool {
    path.iter().all(|&coord| grid.is_valid_coordinate(coord)) &&
    path.windows(2).all(|step| step[0].is_adjacent(step[1]) && grid.is_linked(step[0], step[1]))
}
