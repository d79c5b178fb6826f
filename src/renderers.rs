use std::path::Path;

use image::{ImageFormat, ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use itertools::Itertools;

use crate::layout::{MazeGeometry, Point2D};

pub type Colour = Rgb<u8>;

pub const BLACK: Colour = Rgb([0, 0, 0]);
pub const WHITE: Colour = Rgb([0xff, 0xff, 0xff]);
pub const RED: Colour = Rgb([0xff, 0, 0]);
pub const GREEN: Colour = Rgb([0, 0xff, 0]);
pub const BLUE: Colour = Rgb([0, 0, 0xff]);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderOptions {
    image_width: u32,
    image_height: u32,
}

#[derive(Debug, Copy, Clone)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                image_width: 512,
                image_height: 512,
            },
        }
    }
    pub fn image_size(mut self, width: u32, height: u32) -> RenderOptionsBuilder {
        self.options.image_width = width.max(1);
        self.options.image_height = height.max(1);
        self
    }
    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }
}

/// Rasterize maze geometry: white walls, then the red solution path, then the green start and
/// blue end markers, all on black.
///
/// Normalized space has y pointing up, images have it pointing down, so rows are flipped.
pub fn render_geometry(geometry: &MazeGeometry, options: &RenderOptions) -> RgbImage {
    let mut image = RgbImage::from_pixel(options.image_width, options.image_height, BLACK);

    for segment in &geometry.wall_segments {
        let (from, to) = (to_pixel(&image, segment.from), to_pixel(&image, segment.to));
        draw_line_segment_mut(&mut image, from, to, WHITE);
    }

    let path: Vec<(f32, f32)> = geometry.path_polyline
        .iter()
        .map(|p| to_pixel(&image, *p))
        .collect();
    for (&a, &b) in path.iter().tuple_windows() {
        draw_line_segment_mut(&mut image, a, b, RED);
    }
    if let [only] = path.as_slice() {
        draw_line_segment_mut(&mut image, *only, *only, RED);
    }

    fill_marker(&mut image, &geometry.start_marker, GREEN);
    fill_marker(&mut image, &geometry.end_marker, BLUE);

    image
}

pub fn save_png<P: AsRef<Path>>(image: &RgbImage, path: P) -> ImageResult<()> {
    image.save_with_format(path, ImageFormat::Png)
}

// Snapped to whole pixels so shared cell edges land on the same row or column.
fn to_pixel(image: &RgbImage, point: Point2D) -> (f32, f32) {
    let max_x = (image.width() - 1) as f32;
    let max_y = (image.height() - 1) as f32;
    (((point.x + 1.0) / 2.0 * max_x).round(), ((1.0 - (point.y + 1.0) / 2.0) * max_y).round())
}

/// The ring of a triangle fan as a pixel polygon: no repeated neighbours and no closing vertex.
fn marker_polygon(image: &RgbImage, fan: &[Point2D]) -> Vec<Point<i32>> {
    let mut ring: Vec<Point<i32>> = fan.iter()
        .skip(1)
        .map(|p| {
            let (x, y) = to_pixel(image, *p);
            Point::new(x as i32, y as i32)
        })
        .dedup()
        .collect();
    while ring.len() > 1 && ring.first() == ring.last() {
        let _ = ring.pop();
    }
    ring
}

fn fill_marker(image: &mut RgbImage, fan: &[Point2D], colour: Colour) {
    let centre = match fan.first() {
        Some(centre) => to_pixel(image, *centre),
        None => return,
    };
    let ring = marker_polygon(image, fan);
    if ring.len() >= 3 {
        draw_polygon_mut(image, &ring, colour);
    }
    // Markers smaller than a pixel still show up.
    draw_line_segment_mut(image, centre, centre, colour);
}

#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::cells::Cartesian2DCoordinate;
    use crate::generators::generate;
    use crate::grid::Grid;
    use crate::layout::{layout, LayoutOptions};
    use crate::pathing::solve;
    use crate::units::{ColumnLength, PixelLength, RowLength};

    fn options(width: u32, height: u32) -> RenderOptions {
        RenderOptionsBuilder::new().image_size(width, height).build()
    }

    #[test]
    fn single_cell_image() {
        let grid = Grid::new(RowLength(1), ColumnLength(1)).unwrap();
        let cell = Cartesian2DCoordinate::new(0, 0);
        let geometry = layout(&grid, &[cell], cell, cell, &LayoutOptions::default());
        let image = render_geometry(&geometry, &options(21, 21));

        assert_eq!(image.dimensions(), (21, 21));
        // Border walls
        for i in 0..21 {
            assert_eq!(*image.get_pixel(i, 0), WHITE);
            assert_eq!(*image.get_pixel(i, 20), WHITE);
            assert_eq!(*image.get_pixel(0, i), WHITE);
            assert_eq!(*image.get_pixel(20, i), WHITE);
        }
        // End marker is drawn last over the start marker in the same cell
        assert_eq!(*image.get_pixel(10, 10), BLUE);
        // Between the marker and the walls is background
        assert_eq!(*image.get_pixel(2, 2), BLACK);
    }

    #[test]
    fn row_zero_is_at_the_bottom_of_the_image() {
        let grid = Grid::new(RowLength(1), ColumnLength(2)).unwrap();
        let first_row = Cartesian2DCoordinate::new(0, 0);
        let second_row = Cartesian2DCoordinate::new(0, 1);
        let geometry = layout(&grid,
                              &[],
                              first_row,
                              second_row,
                              &LayoutOptions::new(PixelLength(20), PixelLength(20)));
        let image = render_geometry(&geometry, &options(21, 41));

        assert_eq!(*image.get_pixel(10, 30), GREEN);
        assert_eq!(*image.get_pixel(10, 10), BLUE);
        // The closed wall between the two cells
        assert_eq!(*image.get_pixel(5, 20), WHITE);
    }

    #[test]
    fn solution_path_is_drawn() {
        let maze = generate(RowLength(5), ColumnLength(5), &mut XorShiftRng::seed_from_u64(3))
            .unwrap();
        let path = solve(&maze.grid, maze.start, maze.finish).unwrap().unwrap();
        let geometry = layout(&maze.grid, &path, maze.start, maze.finish, &LayoutOptions::default());
        let image = render_geometry(&geometry, &options(101, 101));
        assert!(image.pixels().any(|p| *p == RED));
    }

    #[test]
    fn marker_ring_drops_the_closing_vertex() {
        let grid = Grid::new(RowLength(1), ColumnLength(1)).unwrap();
        let cell = Cartesian2DCoordinate::new(0, 0);
        let geometry = layout(&grid,
                              &[],
                              cell,
                              cell,
                              &LayoutOptions::default().marker_segments(4).marker_radius_ratio(0.5));
        let image = RgbImage::new(21, 21);
        let ring = marker_polygon(&image, &geometry.start_marker);

        assert_eq!(ring.len(), 4);
        assert_ne!(ring.first(), ring.last());
        assert_eq!(ring[0], Point::new(20, 10));
        assert_eq!(ring[1], Point::new(10, 0));
    }

    #[test]
    fn tiny_markers_still_mark_their_centre() {
        let grid = Grid::new(RowLength(1), ColumnLength(1)).unwrap();
        let cell = Cartesian2DCoordinate::new(0, 0);
        let geometry = layout(&grid,
                              &[],
                              cell,
                              cell,
                              &LayoutOptions::default().marker_radius_ratio(0.01));
        let image = render_geometry(&geometry, &options(21, 21));
        assert_eq!(*image.get_pixel(10, 10), BLUE);
        assert_eq!(*image.get_pixel(9, 10), BLACK);
    }
}
