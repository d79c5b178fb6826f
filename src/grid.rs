use bit_set::BitSet;
use bit_vec::BitVec;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use rand::Rng;
use smallvec::SmallVec;
use std::error::Error;
use std::fmt;
use std::io;

use crate::cells::{Cartesian2DCoordinate, Wall};
use crate::errors::MazeError;
use crate::grid_iterators::{RectBatchIter, RectGridCellIter};
use crate::units::{ColumnLength, NodesCount, RowLength};

const WALLS_PER_CELL: usize = 4;

/// Largest grid, in cells, that `Grid::new` accepts: 4096 x 4096.
///
/// Generation keeps a visited bit and up to one path stack entry per cell on top of the wall
/// bits, so this keeps a single maze to a few hundred megabytes at most.
pub const MAX_CELLS: usize = 1 << 24;

/// A rectangular grid of square cells, each with four wall flags.
///
/// A set bit is a wall that blocks passage. Every wall starts set and the only way to clear one
/// is `open_wall`, which clears the pair of flags either side of a shared edge together.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    row_width: RowLength,
    column_height: ColumnLength,
    walls: BitSet,
}

/// An in-bounds cell next to some other cell, and the two wall flags they share.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Neighbour {
    pub coord: Cartesian2DCoordinate,
    /// The wall on the originating cell's side.
    pub wall: Wall,
    /// The same edge seen from the neighbour.
    pub neighbour_wall: Wall,
}

pub type NeighboursSmallVec = SmallVec<[Neighbour; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            CellLinkError::InvalidGridCoordinate => "coordinate outside of the grid",
            CellLinkError::SelfLink => "a cell cannot be linked to itself",
            CellLinkError::NotAdjacent => "cells do not share a wall",
        };
        f.write_str(reason)
    }
}

impl Error for CellLinkError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: row_length: {:?}, column_length: {:?}, passages: {}",
               self.row_width,
               self.column_height,
               self.passages_count())
    }
}

impl Grid {
    /// A fully walled grid. Fails with `InvalidDimension` before allocating if either side is
    /// zero or the grid has more than `MAX_CELLS` cells.
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<Grid, MazeError> {
        let (RowLength(width), ColumnLength(height)) = (row_width, column_height);
        let invalid = MazeError::InvalidDimension { width, height };

        if width == 0 || height == 0 || width > u32::MAX as usize || height > u32::MAX as usize {
            return Err(invalid);
        }
        let cells = width.checked_mul(height)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or(invalid)?;

        Ok(Grid {
            row_width,
            column_height,
            walls: BitSet::from_bit_vec(BitVec::from_elem(cells * WALLS_PER_CELL, true)),
        })
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.nodes_count().0
    }

    #[inline]
    pub fn nodes_count(&self) -> NodesCount {
        NodesCount(self.row_width.0 * self.column_height.0)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.row_width.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let index = rng.gen_range(0..self.size());
        Cartesian2DCoordinate::from_row_major_index(index, self.row_width)
    }

    /// Cells above, right, below and left of `coord` (in that order) that lie inside the grid,
    /// whether or not a wall separates them.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> NeighboursSmallVec {
        Wall::ALL
            .iter()
            .filter_map(|&wall| {
                self.neighbour_at_direction(coord, wall)
                    .map(|neighbour_coord| {
                        Neighbour {
                            coord: neighbour_coord,
                            wall,
                            neighbour_wall: wall.opposite(),
                        }
                    })
            })
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  wall: Wall)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        wall.offset(coord).filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Is the wall flag set on this side of the cell? Invalid coordinates are all wall.
    pub fn has_wall(&self, coord: Cartesian2DCoordinate, wall: Wall) -> bool {
        self.wall_bit(coord, wall).map_or(true, |bit| self.walls.contains(bit))
    }

    #[inline]
    pub fn is_open(&self, coord: Cartesian2DCoordinate, wall: Wall) -> bool {
        !self.has_wall(coord, wall)
    }

    /// The neighbour on the other side of `wall`, provided that wall has been carved open.
    pub fn passage_neighbour(&self,
                             coord: Cartesian2DCoordinate,
                             wall: Wall)
                             -> Option<Cartesian2DCoordinate> {
        if self.is_open(coord, wall) {
            self.neighbour_at_direction(coord, wall)
        } else {
            None
        }
    }

    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        a.wall_towards(b)
            .map_or(false, |wall| self.passage_neighbour(a, wall) == Some(b))
    }

    /// Carve a passage between two adjacent cells, clearing both flags of the shared wall.
    pub fn open_wall(&mut self,
                     a: Cartesian2DCoordinate,
                     b: Cartesian2DCoordinate)
                     -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let wall = a.wall_towards(b).ok_or(CellLinkError::NotAdjacent)?;

        match (self.wall_bit(a, wall), self.wall_bit(b, wall.opposite())) {
            (Some(a_bit), Some(b_bit)) => {
                self.walls.remove(a_bit);
                self.walls.remove(b_bit);
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Number of open wall-pairs. Each shared edge is counted once.
    pub fn passages_count(&self) -> usize {
        self.iter_passages().count()
    }

    /// Every open wall-pair as `(cell, neighbour)`, neighbour being right of or below the cell.
    pub fn iter_passages(&self) -> impl Iterator<Item = (Cartesian2DCoordinate,
                                                         Cartesian2DCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [Wall::Right, Wall::Bottom]
                .iter()
                .filter_map(|&wall| self.passage_neighbour(coord, wall))
                .map(|neighbour| (coord, neighbour))
                .collect::<SmallVec<[_; 2]>>()
        })
    }

    /// Write the passages as an edge list: `cells passages` on the first line, then one line per
    /// passage naming its two cells by 1-based row-major index.
    pub fn write_edge_list<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{} {}", self.size(), self.passages_count())?;
        for (a, b) in self.iter_passages() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                writeln!(out, "{} {}", a_index + 1, b_index + 1)?;
            }
        }
        Ok(())
    }

    /// The carved passages as an undirected graph. Node `i` is the cell at row-major index `i`.
    pub fn passage_graph(&self) -> Graph<Cartesian2DCoordinate, (), Undirected> {
        let mut graph = Graph::with_capacity(self.size(), self.size().saturating_sub(1));
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_passages() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(self.row_width, self.nodes_count())
    }

    #[inline]
    pub fn iter_row(&self) -> RectBatchIter {
        RectBatchIter::new(self.row_width, self.column_height)
    }

    #[inline]
    fn wall_bit(&self, coord: Cartesian2DCoordinate, wall: Wall) -> Option<usize> {
        self.grid_coordinate_to_index(coord)
            .map(|index| index * WALLS_PER_CELL + wall.bit_offset())
    }
}
