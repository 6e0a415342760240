mod depth_first_search;
mod rnd_prims;

use std::{fmt, ops, str::FromStr};

use rand::{thread_rng, Rng as _, SeedableRng as _};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{CellWall, Grid};
use crate::{array::Array2D, dims::Dims};

pub use depth_first_search::DepthFirstSearch;
pub use rnd_prims::RndPrims;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Seeds a [`Random`] from `seed`, or from the thread rng when there is none.
pub fn new_rng(seed: Option<u64>) -> Random {
    Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid maze dimensions {0}, width and height must be positive")]
    InvalidDimension(Dims),
}

/// Scratch visited flags, one per cell, owned by a single generator run.
#[derive(Debug, Clone)]
pub struct VisitMask(Array2D<bool>);

impl VisitMask {
    pub fn new(size: Dims) -> Result<Self, GenerationError> {
        Array2D::new_dims(false, size)
            .map(Self)
            .ok_or(GenerationError::InvalidDimension(size))
    }

    pub fn visit(&mut self, pos: Dims) {
        self.0[pos] = true;
    }

    pub fn is_visited(&self, pos: Dims) -> bool {
        self[pos]
    }

    pub fn visited_count(&self) -> usize {
        self.0.iter().filter(|&&v| v).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.all(|&v| v)
    }

    /// In-bounds orthogonal neighbors of `pos` whose visited flag equals `want_visited`.
    ///
    /// Directions are checked up, right, down, left and the result keeps that order.
    pub fn neighbors(&self, pos: Dims, want_visited: bool) -> SmallVec<[Dims; 4]> {
        CellWall::get_in_order()
            .into_iter()
            .map(|dir| pos + dir.to_coord())
            .filter(|&n| self.0.get(n).is_some_and(|&v| v == want_visited))
            .collect()
    }
}

impl ops::Index<Dims> for VisitMask {
    type Output = bool;

    /// Returns the value at the given index, or `false` if the index is out of bounds.
    fn index(&self, index: Dims) -> &Self::Output {
        self.0.get(index).unwrap_or(&false)
    }
}

/// Spanning tree builder over a rectangular grid.
pub trait MazeAlgorithm: fmt::Debug + Sync + Send {
    /// Returns a grid where every cell is reachable from every other cell by exactly one path.
    fn generate(&self, size: Dims, rng: &mut Random) -> Result<Grid, GenerationError>;
}

/// Algorithm tag selecting a [`MazeAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenAlgorithm {
    #[default]
    Dfs,
    Prims,
}

impl GenAlgorithm {
    pub const ALL: [GenAlgorithm; 2] = [GenAlgorithm::Dfs, GenAlgorithm::Prims];

    pub fn name(&self) -> &'static str {
        match self {
            GenAlgorithm::Dfs => "dfs",
            GenAlgorithm::Prims => "prims",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GenAlgorithm::Dfs => "Depth-first search",
            GenAlgorithm::Prims => "Randomized Prim's",
        }
    }

    pub fn generator(&self) -> &'static dyn MazeAlgorithm {
        match self {
            GenAlgorithm::Dfs => &DepthFirstSearch,
            GenAlgorithm::Prims => &RndPrims,
        }
    }

    /// The following algorithm, wrapping around.
    pub fn next(&self) -> GenAlgorithm {
        match self {
            GenAlgorithm::Dfs => GenAlgorithm::Prims,
            GenAlgorithm::Prims => GenAlgorithm::Dfs,
        }
    }
}

impl fmt::Display for GenAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown maze algorithm '{0}', expected 'dfs' or 'prims'")]
pub struct ParseAlgorithmError(String);

impl FromStr for GenAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth_first_search" | "backtracker" => Ok(GenAlgorithm::Dfs),
            "prims" | "prim" | "rnd_prims" => Ok(GenAlgorithm::Prims),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_spanning_tree(grid: &Grid) {
        let Dims(w, h) = grid.size();
        assert!(grid.is_connected(), "{}x{} maze is not connected", w, h);
        assert_eq!(grid.passage_count(), (w * h - 1) as usize);
        assert!(grid.is_wall_symmetric());
    }

    #[test]
    fn neighbors_filter_and_order() {
        let mut mask = VisitMask::new(Dims(3, 3)).unwrap();
        let center = Dims(1, 1);
        assert_eq!(
            mask.neighbors(center, false).as_slice(),
            &[Dims(1, 0), Dims(2, 1), Dims(1, 2), Dims(0, 1)]
        );
        assert!(mask.neighbors(center, true).is_empty());

        mask.visit(Dims(2, 1));
        mask.visit(Dims(0, 1));
        assert_eq!(mask.neighbors(center, false).as_slice(), &[Dims(1, 0), Dims(1, 2)]);
        assert_eq!(mask.neighbors(center, true).as_slice(), &[Dims(2, 1), Dims(0, 1)]);
        assert_eq!(mask.visited_count(), 2);
        assert!(!mask.is_full());

        for pos in Dims::iter_fill(Dims::ZERO, Dims(3, 3)) {
            mask.visit(pos);
        }
        assert!(mask.is_full());
    }

    #[test]
    fn neighbors_at_corner() {
        let mask = VisitMask::new(Dims(3, 2)).unwrap();
        assert_eq!(
            mask.neighbors(Dims(0, 0), false).as_slice(),
            &[Dims(1, 0), Dims(0, 1)]
        );
        assert_eq!(
            mask.neighbors(Dims(2, 1), false).as_slice(),
            &[Dims(2, 0), Dims(1, 1)]
        );
        assert!(VisitMask::new(Dims(1, 1))
            .unwrap()
            .neighbors(Dims::ZERO, false)
            .is_empty());
    }

    #[test]
    fn generators_build_spanning_trees() {
        for algo in GenAlgorithm::ALL {
            let mut rng = new_rng(Some(42));
            for w in 1..=12 {
                for h in 1..=12 {
                    let grid = algo.generator().generate(Dims(w, h), &mut rng).unwrap();
                    check_spanning_tree(&grid);
                }
            }
        }
    }

    #[test]
    fn generators_large() {
        for algo in GenAlgorithm::ALL {
            for seed in 0..3 {
                let mut rng = new_rng(Some(seed));
                let grid = algo.generator().generate(Dims(50, 50), &mut rng).unwrap();
                check_spanning_tree(&grid);
            }
        }
    }

    #[test]
    fn generators_degenerate() {
        for algo in GenAlgorithm::ALL {
            let mut rng = new_rng(Some(7));

            let single = algo.generator().generate(Dims(1, 1), &mut rng).unwrap();
            assert_eq!(single.passage_count(), 0);
            assert_eq!(single.get_cell(Dims::ZERO).unwrap().walls(), [true; 4]);

            let row = algo.generator().generate(Dims(9, 1), &mut rng).unwrap();
            check_spanning_tree(&row);
            let column = algo.generator().generate(Dims(1, 9), &mut rng).unwrap();
            check_spanning_tree(&column);
        }
    }

    #[test]
    fn generators_reject_invalid_sizes() {
        for algo in GenAlgorithm::ALL {
            let mut rng = new_rng(Some(0));
            for size in [Dims(0, 5), Dims(5, 0), Dims(-2, -2)] {
                assert_eq!(
                    algo.generator().generate(size, &mut rng).unwrap_err(),
                    GenerationError::InvalidDimension(size)
                );
            }
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        for algo in GenAlgorithm::ALL {
            let a = algo.generator().generate(Dims(15, 9), &mut new_rng(Some(1234)));
            let b = algo.generator().generate(Dims(15, 9), &mut new_rng(Some(1234)));
            assert_eq!(a.unwrap(), b.unwrap());
        }
    }

    #[test]
    fn algorithm_names() {
        for algo in GenAlgorithm::ALL {
            assert_eq!(algo.name().parse::<GenAlgorithm>().unwrap(), algo);
            assert_eq!(algo.to_string(), algo.name());
            assert_eq!(algo.next().next(), algo);
        }
        assert_eq!("PRIMS".parse::<GenAlgorithm>().unwrap(), GenAlgorithm::Prims);
        assert!("kruskal".parse::<GenAlgorithm>().is_err());
    }
}
