//! **perfect_maze** carves perfect mazes, finds a route through them and lays them out as
//! line and point geometry for a renderer.
//!
//! The pipeline is `generate` -> `solve` -> `layout`, each step taking and returning plain data.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod layout;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;

pub use crate::errors::MazeError;
pub use crate::generators::{generate, Maze};
pub use crate::layout::{layout, LayoutOptions, MazeGeometry};
pub use crate::pathing::solve;
