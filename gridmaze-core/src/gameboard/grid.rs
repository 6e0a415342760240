use smallvec::SmallVec;

use super::{
    algorithms::GenerationError,
    cell::{Cell, CellWall},
};
use crate::{array::Array2D, dims::Dims};

use CellWall::*;

/// Rectangular board of cells, `height` rows of `width` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<Cell>,
}

impl Grid {
    /// Creates a grid of fully walled cells.
    pub fn new(size: Dims) -> Result<Grid, GenerationError> {
        let cells = Array2D::from_fn(size, Cell::new)
            .ok_or(GenerationError::InvalidDimension(size))?;

        Ok(Grid { cells })
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// Returns the wall of `cell` that faces `cell2`, if they are orthogonal neighbors.
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        match (cell2.0 - cell.0, cell2.1 - cell.1) {
            (0, -1) => Some(Top),
            (1, 0) => Some(Right),
            (0, 1) => Some(Bottom),
            (-1, 0) => Some(Left),
            _ => None,
        }
    }

    /// Removes the wall between two adjacent cells on both sides.
    ///
    /// Callers must pass orthogonal neighbors. Anything else trips a debug assertion and is
    /// ignored in release builds.
    pub fn remove_wall(&mut self, a: Dims, b: Dims) {
        let wall = Self::which_wall_between(a, b);
        debug_assert!(wall.is_some(), "cells {} and {} are not adjacent", a, b);

        if let Some(wall) = wall {
            self.remove_wall_dir(a, wall);
        }
    }

    /// Removes `wall` of `cell` and the matching wall of the cell behind it.
    pub(crate) fn remove_wall_dir(&mut self, cell: Dims, wall: CellWall) {
        let neighbor = cell + wall.to_coord();
        if !self.is_in_bounds(cell) || !self.is_in_bounds(neighbor) {
            return;
        }

        self.cells[cell].remove_wall(wall);
        self.cells[neighbor].remove_wall(wall.reverse_wall());
    }

    /// Returns `true` if one can step from `pos` in direction `wall`.
    pub fn can_move(&self, pos: Dims, wall: CellWall) -> bool {
        match self.get_cell(pos) {
            Some(cell) => cell.is_open(wall) && self.is_in_bounds(pos + wall.to_coord()),
            None => false,
        }
    }

    /// Neighbors reachable from `pos` without crossing a wall, in up, right, down, left order.
    pub fn open_neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        CellWall::get_in_order()
            .into_iter()
            .filter(|&wall| self.can_move(pos, wall))
            .map(|wall| pos + wall.to_coord())
            .collect()
    }

    /// Number of removed wall pairs.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.is_open(Right) as usize + cell.is_open(Bottom) as usize)
            .sum()
    }

    /// Returns which cells can be reached from `from` through open walls.
    pub fn reachable_from(&self, from: Dims) -> Array2D<bool> {
        let mut reached = Array2D::new(false, self.width(), self.height());
        if !self.is_in_bounds(from) {
            return reached;
        }

        let mut stack = vec![from];
        reached[from] = true;
        while let Some(pos) = stack.pop() {
            for next in self.open_neighbors(pos) {
                if !reached[next] {
                    reached[next] = true;
                    stack.push(next);
                }
            }
        }

        reached
    }

    pub fn is_connected(&self) -> bool {
        self.reachable_from(Dims::ZERO).all(|&r| r)
    }

    /// Checks that every open wall is open on both sides and that no border wall is open.
    pub fn is_wall_symmetric(&self) -> bool {
        self.cells.iter_pos().all(|pos| {
            CellWall::get_in_order().into_iter().all(|wall| {
                let open = self.cells[pos].is_open(wall);
                match self.get_cell(pos + wall.to_coord()) {
                    Some(other) => open == other.is_open(wall.reverse_wall()),
                    None => !open,
                }
            })
        })
    }
}
