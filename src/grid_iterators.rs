use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{ColumnIndex, ColumnLength, NodesCount, RowIndex, RowLength};

/// Row-major walk over every cell of a rectangular grid.
#[derive(Clone)]
pub struct RectGridCellIter {
    row_length: RowLength,
    current_cell_number: usize,
    cells_count: usize,
}

impl RectGridCellIter {
    pub fn new(row_length: RowLength, cells_count: NodesCount) -> RectGridCellIter {
        RectGridCellIter {
            row_length,
            current_cell_number: 0,
            cells_count: cells_count.0,
        }
    }
}

impl fmt::Debug for RectGridCellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for RectGridCellIter {} // default impl using size_hint()
impl Iterator for RectGridCellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.row_length);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// Yields each row of the grid in turn, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RectBatchIter {
    current_index: usize,
    row_length: RowLength,
    rows_count: usize,
}

impl RectBatchIter {
    pub fn new(row_length: RowLength, column_length: ColumnLength) -> RectBatchIter {
        RectBatchIter {
            current_index: 0,
            row_length,
            rows_count: column_length.0,
        }
    }
}

impl ExactSizeIterator for RectBatchIter {}
impl Iterator for RectBatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.rows_count {
            let RowLength(length) = self.row_length;
            let row = RowIndex(self.current_index);
            let coords = (0..length)
                .map(|i| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i), row))
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_count - self.current_index;
        (remaining, Some(remaining))
    }
}
