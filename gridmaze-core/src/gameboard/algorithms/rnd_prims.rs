use rand::Rng as _;

use super::{GenerationError, Grid, MazeAlgorithm, Random, VisitMask};
use crate::dims::Dims;

/// Randomized Prim's algorithm, growing the tree from a random cell.
#[derive(Debug)]
pub struct RndPrims;

impl MazeAlgorithm for RndPrims {
    fn generate(&self, size: Dims, rng: &mut Random) -> Result<Grid, GenerationError> {
        let mut grid = Grid::new(size)?;
        let mut visited = VisitMask::new(size)?;

        let start = Dims(rng.gen_range(0..size.0), rng.gen_range(0..size.1));
        visited.visit(start);

        // (candidate, source) pairs, the same candidate can be present multiple times
        let mut frontier: Vec<(Dims, Dims)> = visited
            .neighbors(start, false)
            .into_iter()
            .map(|n| (n, start))
            .collect();

        let mut discarded = 0usize;
        while !frontier.is_empty() {
            let idx = rng.gen_range(0..frontier.len());
            let (cell, from) = frontier.swap_remove(idx);

            if visited.is_visited(cell) {
                discarded += 1;
                continue;
            }

            visited.visit(cell);
            grid.remove_wall(from, cell);
            frontier.extend(
                visited
                    .neighbors(cell, false)
                    .into_iter()
                    .map(|n| (n, cell)),
            );
        }

        debug_assert!(visited.is_full());
        log::debug!(
            "prims started at {}, carved {} passages in {} maze, {} stale frontier entries",
            start,
            grid.passage_count(),
            size,
            discarded
        );

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameboard::algorithms::new_rng;

    #[test]
    fn visits_every_cell() {
        for seed in 0..20 {
            let grid = RndPrims.generate(Dims(7, 5), &mut new_rng(Some(seed))).unwrap();
            assert!(grid.is_connected());
            assert_eq!(grid.passage_count(), 34);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = RndPrims.generate(Dims(20, 20), &mut new_rng(Some(1))).unwrap();
        let b = RndPrims.generate(Dims(20, 20), &mut new_rng(Some(2))).unwrap();
        assert_ne!(a, b);
    }
}
