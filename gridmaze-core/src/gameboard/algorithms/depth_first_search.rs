use rand::seq::SliceRandom as _;

use super::{GenerationError, Grid, MazeAlgorithm, Random, VisitMask};
use crate::dims::Dims;

/// Recursive backtracker, carving from the top left corner.
#[derive(Debug)]
pub struct DepthFirstSearch;

impl MazeAlgorithm for DepthFirstSearch {
    fn generate(&self, size: Dims, rng: &mut Random) -> Result<Grid, GenerationError> {
        let mut grid = Grid::new(size)?;
        let mut visited = VisitMask::new(size)?;
        let mut stack = Vec::with_capacity(grid.width() * grid.height());

        visited.visit(Dims::ZERO);
        stack.push(Dims::ZERO);
        while let Some(&current) = stack.last() {
            let unvisited = visited.neighbors(current, false);

            match unvisited.choose(rng) {
                Some(&chosen) => {
                    visited.visit(chosen);
                    grid.remove_wall(current, chosen);
                    stack.push(chosen);
                }
                None => {
                    stack.pop();
                }
            }
        }

        debug_assert!(visited.is_full());
        log::debug!(
            "dfs carved {} passages in {} maze",
            grid.passage_count(),
            size
        );

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameboard::algorithms::new_rng;

    #[test]
    fn corridor_is_straight() {
        let grid = DepthFirstSearch
            .generate(Dims(5, 1), &mut new_rng(Some(3)))
            .unwrap();

        for x in 0..4 {
            assert!(grid.can_move(Dims(x, 0), crate::gameboard::CellWall::Right));
        }
    }

    #[test]
    fn long_thin_mazes() {
        for size in [Dims(4000, 1), Dims(1, 4000), Dims(2000, 2)] {
            let grid = DepthFirstSearch.generate(size, &mut new_rng(Some(5))).unwrap();
            assert!(grid.is_connected());
            assert_eq!(grid.passage_count(), (size.0 * size.1 - 1) as usize);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = DepthFirstSearch.generate(Dims(20, 20), &mut new_rng(Some(1))).unwrap();
        let b = DepthFirstSearch.generate(Dims(20, 20), &mut new_rng(Some(2))).unwrap();
        assert_ne!(a, b);
    }
}
