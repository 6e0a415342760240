use super::{
    algorithms::{new_rng, GenAlgorithm, GenerationError, Random},
    cell::{Cell, CellWall},
    grid::Grid,
};
use crate::dims::Dims;

/// Generated maze. Entrance is the top left corner, exit the bottom right one.
///
/// Can only be obtained from the generator entry points and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Dims,
    end: Dims,
    algorithm: GenAlgorithm,
}

impl Maze {
    pub fn generate(
        size: Dims,
        algorithm: GenAlgorithm,
        rng: &mut Random,
    ) -> Result<Maze, GenerationError> {
        let grid = algorithm.generator().generate(size, rng)?;
        log::debug!("generated {} maze of size {}", algorithm, size);

        Ok(Self::from_grid(grid, algorithm))
    }

    pub(crate) fn from_grid(grid: Grid, algorithm: GenAlgorithm) -> Maze {
        let size = grid.size();
        Maze {
            grid,
            start: Dims::ZERO,
            end: size - Dims::ONE,
            algorithm,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Dims {
        self.grid.size()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn end(&self) -> Dims {
        self.end
    }

    pub fn algorithm(&self) -> GenAlgorithm {
        self.algorithm
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.grid.is_in_bounds(pos)
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.grid.get_cell(pos)
    }

    pub fn can_move(&self, pos: Dims, dir: CellWall) -> bool {
        self.grid.can_move(pos, dir)
    }
}

/// Generates a maze with a fresh random seed.
pub fn generate_maze(
    width: i32,
    height: i32,
    algorithm: GenAlgorithm,
) -> Result<Maze, GenerationError> {
    Maze::generate(Dims(width, height), algorithm, &mut new_rng(None))
}

/// Generates a maze deterministically from `seed`.
pub fn generate_maze_seeded(
    width: i32,
    height: i32,
    algorithm: GenAlgorithm,
    seed: u64,
) -> Result<Maze, GenerationError> {
    Maze::generate(Dims(width, height), algorithm, &mut new_rng(Some(seed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners() {
        let maze = generate_maze(7, 3, GenAlgorithm::Prims).unwrap();
        assert_eq!(maze.start(), Dims(0, 0));
        assert_eq!(maze.end(), Dims(6, 2));
        assert_eq!(maze.width(), 7);
        assert_eq!(maze.height(), 3);
        assert_eq!(maze.algorithm(), GenAlgorithm::Prims);
    }

    #[test]
    fn single_cell() {
        let maze = generate_maze(1, 1, GenAlgorithm::Dfs).unwrap();
        assert_eq!(maze.start(), Dims::ZERO);
        assert_eq!(maze.end(), Dims::ZERO);
        assert_eq!(maze.grid().passage_count(), 0);
    }

    #[test]
    fn invalid_dimension() {
        assert_eq!(
            generate_maze(0, 5, GenAlgorithm::Dfs).unwrap_err(),
            GenerationError::InvalidDimension(Dims(0, 5))
        );
        assert_eq!(
            generate_maze(5, -1, GenAlgorithm::Prims).unwrap_err(),
            GenerationError::InvalidDimension(Dims(5, -1))
        );
    }

    #[test]
    fn prims_scenario() {
        let maze = generate_maze(4, 4, GenAlgorithm::Prims).unwrap();
        assert_eq!(maze.grid().passage_count(), 15);
        assert!(maze.grid().is_connected());
    }

    #[test]
    fn connected_up_to_fifty() {
        for algo in GenAlgorithm::ALL {
            for side in (1..=50).step_by(7).chain([50]) {
                let maze = generate_maze_seeded(side, side, algo, side as u64).unwrap();
                assert!(maze.grid().is_connected());
                assert_eq!(
                    maze.grid().passage_count(),
                    (side * side - 1) as usize
                );
            }
        }
    }

    #[test]
    fn seeded_mazes_match() {
        let a = generate_maze_seeded(12, 8, GenAlgorithm::Dfs, 99).unwrap();
        let b = generate_maze_seeded(12, 8, GenAlgorithm::Dfs, 99).unwrap();
        assert_eq!(a, b);
    }
}
