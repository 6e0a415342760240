use std::collections::VecDeque;

use crate::{
    array::Array2D,
    dims::Dims,
    gameboard::{CellWall, Maze},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("no path from start to end")]
    NoPathFound,
}

/// Shortest path from the maze start to its end, both included.
///
/// Breadth-first search over open walls. Neighbors are expanded up, right, down, left, so
/// the same maze always yields the same path.
pub fn solve_maze(maze: &Maze) -> Result<Vec<Dims>, SolveError> {
    solve_between(maze, maze.start(), maze.end())
}

/// Shortest path between two arbitrary cells of the maze.
pub fn solve_between(maze: &Maze, from: Dims, to: Dims) -> Result<Vec<Dims>, SolveError> {
    if !maze.is_in_bounds(from) || !maze.is_in_bounds(to) {
        return Err(SolveError::NoPathFound);
    }

    let grid = maze.grid();
    let mut visited = Array2D::new(false, grid.width(), grid.height());
    let mut parents: Array2D<Option<Dims>> = Array2D::new(None, grid.width(), grid.height());
    let mut queue = VecDeque::new();

    visited[from] = true;
    queue.push_back(from);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        if current == to {
            found = true;
            break;
        }

        for dir in CellWall::get_in_order() {
            let next = current + dir.to_coord();
            if !grid.can_move(current, dir) || visited[next] {
                continue;
            }

            visited[next] = true;
            parents[next] = Some(current);
            queue.push_back(next);
        }
    }

    if !found {
        log::warn!("maze has no path from {} to {}", from, to);
        return Err(SolveError::NoPathFound);
    }

    let mut path = vec![to];
    let mut current = to;
    while let Some(parent) = parents[current] {
        path.push(parent);
        current = parent;
    }
    path.reverse();

    log::trace!("solved {} -> {} in {} steps", from, to, path.len() - 1);

    Ok(path)
}
