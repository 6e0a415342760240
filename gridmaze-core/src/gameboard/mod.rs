pub mod algorithms;
pub mod cell;
pub mod grid;
pub mod maze;

pub use cell::{Cell, CellWall};
pub use grid::Grid;
pub use maze::{generate_maze, generate_maze_seeded, Maze};
