//! Maps grid cells into a normalized `[-1, 1] x [-1, 1]` draw space.
//!
//! Cell `(x, y)` covers `[x * cw - 1, (x + 1) * cw - 1] x [y * ch - 1, (y + 1) * ch - 1]` where
//! `cw = 2 / width` and `ch = 2 / height`. Row 0 therefore sits at `-1` on the y axis, which is
//! the bottom of the viewport for a y-up renderer.

use std::f32::consts::PI;

use crate::cells::{Cartesian2DCoordinate, Wall};
use crate::grid::Grid;
use crate::units::PixelLength;

pub const DEFAULT_MARKER_SEGMENTS: usize = 200;
pub const DEFAULT_MARKER_RADIUS_RATIO: f32 = 0.3;
const MIN_MARKER_SEGMENTS: usize = 3;

#[derive(PartialEq, Copy, Clone, Debug, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Point2D {
        Point2D { x, y }
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct LineSegment {
    pub from: Point2D,
    pub to: Point2D,
}

/// Everything needed to draw a maze, with no ties to any particular renderer.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct MazeGeometry {
    /// One segment for every wall flag that is still set, per cell. A wall shared by two cells
    /// shows up once from each side.
    pub wall_segments: Vec<LineSegment>,
    /// Cell centres along the solution, empty when there is no solution to show.
    pub path_polyline: Vec<Point2D>,
    /// Triangle fan: the centre first, then the ring with its first vertex repeated at the end.
    pub start_marker: Vec<Point2D>,
    pub end_marker: Vec<Point2D>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutOptions {
    pub cell_pixel_width: PixelLength,
    pub cell_pixel_height: PixelLength,
    pub marker_segments: usize,
    /// Marker radius as a fraction of the shorter on-screen cell side.
    pub marker_radius_ratio: f32,
}

impl LayoutOptions {
    pub fn new(cell_pixel_width: PixelLength, cell_pixel_height: PixelLength) -> LayoutOptions {
        LayoutOptions {
            cell_pixel_width,
            cell_pixel_height,
            marker_segments: DEFAULT_MARKER_SEGMENTS,
            marker_radius_ratio: DEFAULT_MARKER_RADIUS_RATIO,
        }
    }

    pub fn marker_segments(mut self, segments: usize) -> LayoutOptions {
        self.marker_segments = segments;
        self
    }

    pub fn marker_radius_ratio(mut self, ratio: f32) -> LayoutOptions {
        self.marker_radius_ratio = ratio;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> LayoutOptions {
        LayoutOptions::new(PixelLength(10), PixelLength(10))
    }
}

/// Size of one cell in normalized units.
#[derive(Debug, Copy, Clone, PartialEq)]
struct CellExtent {
    width: f32,
    height: f32,
}

impl CellExtent {
    fn of(grid: &Grid) -> CellExtent {
        CellExtent {
            width: 2.0 / grid.row_length().0 as f32,
            height: 2.0 / grid.column_length().0 as f32,
        }
    }

    /// Bottom left and top right corners of a cell's rectangle.
    fn corners(&self, coord: Cartesian2DCoordinate) -> (Point2D, Point2D) {
        let (x, y) = (coord.x as f32, coord.y as f32);
        (Point2D::new(x * self.width - 1.0, y * self.height - 1.0),
         Point2D::new((x + 1.0) * self.width - 1.0, (y + 1.0) * self.height - 1.0))
    }

    fn centre(&self, coord: Cartesian2DCoordinate) -> Point2D {
        let (low, high) = self.corners(coord);
        Point2D::new((low.x + high.x) / 2.0, (low.y + high.y) / 2.0)
    }

    fn wall_segment(&self, coord: Cartesian2DCoordinate, wall: Wall) -> LineSegment {
        let (low, high) = self.corners(coord);
        let (from, to) = match wall {
            // Top faces row y - 1, which is the low y edge in draw space.
            Wall::Top => (Point2D::new(low.x, low.y), Point2D::new(high.x, low.y)),
            Wall::Right => (Point2D::new(high.x, low.y), Point2D::new(high.x, high.y)),
            Wall::Bottom => (Point2D::new(low.x, high.y), Point2D::new(high.x, high.y)),
            Wall::Left => (Point2D::new(low.x, low.y), Point2D::new(low.x, high.y)),
        };
        LineSegment { from, to }
    }
}

/// Turn a grid, a solution path and its endpoints into draw-space geometry.
///
/// Pure: the same inputs always give the same output. Coordinates outside the grid are
/// extrapolated rather than rejected.
pub fn layout(grid: &Grid,
              path: &[Cartesian2DCoordinate],
              start: Cartesian2DCoordinate,
              finish: Cartesian2DCoordinate,
              options: &LayoutOptions)
              -> MazeGeometry {
    let extent = CellExtent::of(grid);

    let mut wall_segments = Vec::with_capacity(grid.size() * 2);
    for coord in grid.iter() {
        for &wall in Wall::ALL.iter() {
            if grid.has_wall(coord, wall) {
                wall_segments.push(extent.wall_segment(coord, wall));
            }
        }
    }

    let path_polyline = path.iter().map(|&coord| extent.centre(coord)).collect();

    MazeGeometry {
        wall_segments,
        path_polyline,
        start_marker: marker(&extent, start, options),
        end_marker: marker(&extent, finish, options),
    }
}

fn marker(extent: &CellExtent,
          coord: Cartesian2DCoordinate,
          options: &LayoutOptions)
          -> Vec<Point2D> {
    let segments = options.marker_segments.max(MIN_MARKER_SEGMENTS);
    let (radius_x, radius_y) = marker_radii(extent, options);
    let centre = extent.centre(coord);

    let mut fan = Vec::with_capacity(segments + 2);
    fan.push(centre);
    fan.extend((0..=segments).map(|i| {
        // The last vertex closes the ring exactly on the first one.
        let angle = 2.0 * PI * (i % segments) as f32 / segments as f32;
        Point2D::new(centre.x + radius_x * angle.cos(),
                     centre.y + radius_y * angle.sin())
    }));
    fan
}

// Keep the marker round on screen when cells are not square in pixels.
fn marker_radii(extent: &CellExtent, options: &LayoutOptions) -> (f32, f32) {
    let (PixelLength(px_width), PixelLength(px_height)) = (options.cell_pixel_width,
                                                            options.cell_pixel_height);
    if px_width == 0 || px_height == 0 {
        return (options.marker_radius_ratio * extent.width,
                options.marker_radius_ratio * extent.height);
    }
    let radius_pixels = options.marker_radius_ratio * px_width.min(px_height) as f32;
    (radius_pixels / px_width as f32 * extent.width,
     radius_pixels / px_height as f32 * extent.height)
}

#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::generators::generate;
    use crate::pathing::solve;
    use crate::units::{ColumnLength, RowLength};

    const EPSILON: f32 = 1e-5;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn close(a: Point2D, b: Point2D) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    fn segment_matches(segment: &LineSegment, a: Point2D, b: Point2D) -> bool {
        (close(segment.from, a) && close(segment.to, b)) ||
        (close(segment.from, b) && close(segment.to, a))
    }

    #[test]
    fn single_cell_draws_its_four_walls() {
        let grid = Grid::new(RowLength(1), ColumnLength(1)).unwrap();
        let geometry = layout(&grid, &[], gc(0, 0), gc(0, 0), &LayoutOptions::default());

        assert_eq!(geometry.wall_segments.len(), 4);
        let (bl, br) = (Point2D::new(-1.0, -1.0), Point2D::new(1.0, -1.0));
        let (tl, tr) = (Point2D::new(-1.0, 1.0), Point2D::new(1.0, 1.0));
        for &(a, b) in &[(bl, br), (br, tr), (tl, tr), (bl, tl)] {
            assert!(geometry.wall_segments.iter().any(|s| segment_matches(s, a, b)));
        }
        assert!(geometry.path_polyline.is_empty());
    }

    #[test]
    fn open_walls_are_not_drawn() {
        let mut grid = Grid::new(RowLength(2), ColumnLength(1)).unwrap();
        assert_eq!(layout(&grid, &[], gc(0, 0), gc(1, 0), &LayoutOptions::default())
                       .wall_segments
                       .len(),
                   8);

        grid.open_wall(gc(0, 0), gc(1, 0)).unwrap();
        let geometry = layout(&grid, &[], gc(0, 0), gc(1, 0), &LayoutOptions::default());
        assert_eq!(geometry.wall_segments.len(), 6);

        // The shared edge is x = 0
        let middle = |s: &LineSegment| s.from.x.abs() < EPSILON && s.to.x.abs() < EPSILON;
        assert!(!geometry.wall_segments.iter().any(middle));
    }

    #[test]
    fn shared_walls_line_up() {
        let grid = Grid::new(RowLength(3), ColumnLength(4)).unwrap();
        let extent = CellExtent::of(&grid);
        for coord in grid.iter() {
            for neighbour in grid.neighbours(coord).iter() {
                let mine = extent.wall_segment(coord, neighbour.wall);
                let theirs = extent.wall_segment(neighbour.coord, neighbour.neighbour_wall);
                assert!(segment_matches(&mine, theirs.from, theirs.to));
            }
        }
    }

    #[test]
    fn path_follows_cell_centres() {
        let mut grid = Grid::new(RowLength(2), ColumnLength(2)).unwrap();
        grid.open_wall(gc(0, 0), gc(1, 0)).unwrap();
        grid.open_wall(gc(1, 0), gc(1, 1)).unwrap();
        let path = vec![gc(0, 0), gc(1, 0), gc(1, 1)];
        let geometry = layout(&grid, &path, gc(0, 0), gc(1, 1), &LayoutOptions::default());

        let expected = [Point2D::new(-0.5, -0.5), Point2D::new(0.5, -0.5), Point2D::new(0.5, 0.5)];
        assert_eq!(geometry.path_polyline.len(), expected.len());
        for (point, want) in geometry.path_polyline.iter().zip(expected.iter()) {
            assert!(close(*point, *want), "{:?} != {:?}", point, want);
        }
    }

    #[test]
    fn markers_are_closed_fans() {
        let grid = Grid::new(RowLength(4), ColumnLength(4)).unwrap();
        let geometry = layout(&grid, &[], gc(0, 0), gc(3, 3), &LayoutOptions::default());

        assert_eq!(geometry.start_marker.len(), DEFAULT_MARKER_SEGMENTS + 2);
        assert!(close(geometry.start_marker[0], Point2D::new(-0.75, -0.75)));
        assert!(close(geometry.end_marker[0], Point2D::new(0.75, 0.75)));
        assert!(close(geometry.start_marker[1], *geometry.start_marker.last().unwrap()));

        // Square cells, so the ring is a circle of 0.3 of a cell side (0.5 normalized).
        let radius = DEFAULT_MARKER_RADIUS_RATIO * 0.5;
        let centre = geometry.end_marker[0];
        for point in &geometry.end_marker[1..] {
            let distance = ((point.x - centre.x).powi(2) + (point.y - centre.y).powi(2)).sqrt();
            assert!((distance - radius).abs() < EPSILON);
        }
    }

    #[test]
    fn marker_segments_are_configurable_with_a_floor() {
        let grid = Grid::new(RowLength(2), ColumnLength(2)).unwrap();
        let options = LayoutOptions::default().marker_segments(8);
        assert_eq!(layout(&grid, &[], gc(0, 0), gc(1, 1), &options).start_marker.len(), 10);

        let options = LayoutOptions::default().marker_segments(0);
        assert_eq!(layout(&grid, &[], gc(0, 0), gc(1, 1), &options).start_marker.len(), 5);
    }

    #[test]
    fn markers_stay_round_on_stretched_cells() {
        // 2 x 1 grid drawn with cells 40 px wide and 20 px tall.
        let grid = Grid::new(RowLength(2), ColumnLength(1)).unwrap();
        let options = LayoutOptions::new(PixelLength(40), PixelLength(20))
            .marker_radius_ratio(0.5)
            .marker_segments(4);
        let marker = layout(&grid, &[], gc(0, 0), gc(1, 0), &options).start_marker;

        // radius 10 px: a quarter of the cell width (1.0 normalized), half of its height (2.0)
        let centre = marker[0];
        assert!(close(marker[1], Point2D::new(centre.x + 0.25, centre.y)));
        assert!(close(marker[2], Point2D::new(centre.x, centre.y + 1.0)));
    }

    #[test]
    fn layout_is_repeatable() {
        let maze = generate(RowLength(6), ColumnLength(5), &mut XorShiftRng::seed_from_u64(21))
            .unwrap();
        let path = solve(&maze.grid, maze.start, maze.finish).unwrap().unwrap();
        let options = LayoutOptions::new(PixelLength(12), PixelLength(9));
        let first = layout(&maze.grid, &path, maze.start, maze.finish, &options);
        let second = layout(&maze.grid, &path, maze.start, maze.finish, &options);
        assert_eq!(first, second);
        assert_eq!(first.path_polyline.len(), path.len());

        // 4 walls per cell, less 2 flags per carved passage
        let expected_segments = 4 * 30 - 2 * (30 - 1);
        assert_eq!(first.wall_segments.len(), expected_segments);
    }
}
