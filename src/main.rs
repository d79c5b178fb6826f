use docopt::Docopt;
use log::{info, warn};
use perfect_maze::{
    cells::Cartesian2DCoordinate,
    generators::{self, Maze},
    grid::Grid,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay, TextView},
    layout::{self, LayoutOptions},
    pathing,
    renderers,
    units,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::{self, File},
    io::{prelude::*, BufWriter},
};

const USAGE: &str = "Perfect Maze

Usage:
    maze_driver -h | --help
    maze_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--no-solve] [--text] [--text-out=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--marker-segments=<n>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed the maze generator so the same maze comes out every run.
    --no-solve             Do not search for a path from the start to the finish.
    --text                 Print a textual rendering of the maze to stdout.
    --text-out=<path>      Output file path for a textual rendering of the maze.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format.
    --cell-pixels=<n>      Pixel count along one cell side in an image rendering [default: 10].
    --marker-segments=<n>  Ring segment count for the start and finish markers [default: 200].
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_no_solve: bool,
    flag_text: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u32,
    flag_marker_segments: usize,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageSaveError(::image::ImageError);
            Io(::std::io::Error);
            Maze(::perfect_maze::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let maze = generate_maze(&args, width, height)?;
    info!("Generated a {}x{} maze, start {} finish {}", width, height, maze.start, maze.finish);

    let path = if args.flag_no_solve {
        None
    } else {
        let path_opt = pathing::solve(&maze.grid, maze.start, maze.finish)?;
        match path_opt {
            Some(ref path) => info!("Solved in {} steps", path.len() - 1),
            // Not a perfect maze, generation broke its invariant.
            None => warn!("No path from {} to {}", maze.start, maze.finish),
        }
        path_opt
    };

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze.grid, &args.flag_save_edges)?;
    }

    if args.flag_text || !args.flag_text_out.is_empty() {

        let text = maze_text(&maze, path.as_deref());

        if args.flag_text_out.is_empty() {
            print!("{}", text);
        } else {
            fs::write(&args.flag_text_out, text)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if !args.flag_image_out.is_empty() {

        save_maze_image(&maze, path.as_deref().unwrap_or(&[]), &args)?;
    }

    Ok(())
}

fn generate_maze(maze_args: &MazeArgs, width: usize, height: usize) -> Result<Maze> {

    let (row_width, column_height) = (units::RowLength(width), units::ColumnLength(height));
    let maze = if let Some(seed) = maze_args.flag_seed {
        generators::generate(row_width, column_height, &mut XorShiftRng::seed_from_u64(seed))?
    } else {
        generators::generate_with_thread_rng(row_width, column_height)?
    };
    Ok(maze)
}

/// Show the path through the maze if there is one, otherwise just mark where it should start
/// and end.
fn maze_text(maze: &Maze, path: Option<&[Cartesian2DCoordinate]>) -> String {

    let display: Box<dyn GridDisplay> = match path {
        Some(path) => Box::new(PathDisplay::new(path)),
        None => Box::new(StartEndPointsDisplay::new(maze.start, maze.finish)),
    };
    TextView::with_display(&maze.grid, display.as_ref()).to_string()
}

fn save_maze_image(maze: &Maze,
                   path: &[Cartesian2DCoordinate],
                   maze_args: &MazeArgs)
                   -> Result<()> {

    let cell_pixels = maze_args.flag_cell_pixels.max(1);
    let layout_options = LayoutOptions::new(units::PixelLength(cell_pixels),
                                            units::PixelLength(cell_pixels))
        .marker_segments(maze_args.flag_marker_segments);
    let geometry = layout::layout(&maze.grid, path, maze.start, maze.finish, &layout_options);

    let units::RowLength(columns) = maze.grid.row_length();
    let units::ColumnLength(rows) = maze.grid.column_length();
    let image_width = (columns as u32).saturating_mul(cell_pixels).saturating_add(1);
    let image_height = (rows as u32).saturating_mul(cell_pixels).saturating_add(1);

    let render_options = renderers::RenderOptionsBuilder::new()
        .image_size(image_width, image_height)
        .build();
    let image = renderers::render_geometry(&geometry, &render_options);

    renderers::save_png(&image, &maze_args.flag_image_out)
        .chain_err(|| format!("Failed to write maze image {}", maze_args.flag_image_out))?;
    info!("Saved {}x{} image to {}", image_width, image_height, maze_args.flag_image_out);

    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut writer = BufWriter::new(File::create(file_path)
        .chain_err(|| format!("Failed to create maze graph file {}", file_path))?);
    maze_grid.write_edge_list(&mut writer)
        .and_then(|_| writer.flush())
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("Saved {} passages to {}", maze_grid.passages_count(), file_path);

    Ok(())
}
