//! Maze engine of gridmaze: grid model, depth-first and Prim's generators,
//! breadth-first solver and the player session built on top of them.

pub mod array;
pub mod dims;
pub mod game;
pub mod gameboard;
pub mod solver;

pub use gameboard::{
    algorithms::{GenAlgorithm, GenerationError},
    generate_maze, generate_maze_seeded, Maze,
};
pub use solver::{solve_maze, SolveError};
