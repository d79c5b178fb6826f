use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Wall};
use crate::grid::Grid;
use crate::units::{ColumnLength, RowLength};
use crate::utils::{self, FnvHashSet};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: Cartesian2DCoordinate,
    end: Cartesian2DCoordinate,
}
impl StartEndPointsDisplay {
    pub fn new(start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Box drawing text view of a grid, with an optional cell body renderer.
pub struct TextView<'a> {
    grid: &'a Grid,
    display: Option<&'a dyn GridDisplay>,
}

impl<'a> TextView<'a> {
    pub fn new(grid: &'a Grid) -> TextView<'a> {
        TextView {
            grid,
            display: None,
        }
    }

    pub fn with_display(grid: &'a Grid, display: &'a dyn GridDisplay) -> TextView<'a> {
        TextView {
            grid,
            display: Some(display),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&TextView::new(self), f)
    }
}

impl<'a> fmt::Display for TextView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let grid = self.grid;
        let RowLength(columns_count) = grid.row_length();
        let ColumnLength(rows_count) = grid.column_length();

        // The top boundary of row 0 is drawn on its own, every row after draws only its
        // middle and bottom sections.
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            let coord = Cartesian2DCoordinate::new(column as u32, 0);
            output.push_str(WALL_LR_3);
            if grid.is_open(coord, Wall::Right) {
                output.push_str(WALL_LR);
            } else if column == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for (index_row, row) in grid.iter_row().enumerate() {

            let is_last_row = index_row == rows_count - 1;
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let render_cell_side = |wall, passage_clear_text, blocking_wall_text| {
                    if grid.is_open(cell_coord, wall) {
                        passage_clear_text
                    } else {
                        blocking_wall_text
                    }
                };
                let is_first_column = index_column == 0;
                let is_last_column = index_column == columns_count - 1;
                let right_open = grid.is_open(cell_coord, Wall::Right);
                let bottom_open = grid.is_open(cell_coord, Wall::Bottom);

                let body = self.display
                    .map_or_else(|| String::from("   "), |d| d.render_cell_body(cell_coord));
                row_middle_section_render.push_str(&body);
                row_middle_section_render.push_str(render_cell_side(Wall::Right, " ", WALL_UD));

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if bottom_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(render_cell_side(Wall::Bottom,
                                                                    "   ",
                                                                    WALL_LR_3));

                // The corner at the bottom right of this cell joins up to four wall pieces.
                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if right_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if bottom_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let right_cell_bottom_open =
                            grid.neighbour_at_direction(cell_coord, Wall::Right)
                                .map_or(false, |c| grid.is_open(c, Wall::Bottom));
                        let lower_cell_right_open =
                            grid.neighbour_at_direction(cell_coord, Wall::Bottom)
                                .map_or(false, |c| grid.is_open(c, Wall::Right));
                        let show_left = !bottom_open;
                        let show_right = !right_cell_bottom_open;
                        let show_up = !right_open;
                        let show_down = !lower_cell_right_open;

                        match (show_left, show_right, show_up, show_down) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            (false, false, false, false) => " ",
                        }
                    }
                };
                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        f.write_str(&output)
    }
}
