use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::dims::Dims;

use CellWall::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
    coord: Dims,
}

impl Cell {
    /// New cell with all four walls present.
    pub fn new(coord: Dims) -> Cell {
        Cell {
            top: true,
            right: true,
            bottom: true,
            left: true,
            coord,
        }
    }

    pub(crate) fn remove_wall(&mut self, wall: CellWall) {
        match wall {
            Top => self.top = false,
            Right => self.right = false,
            Bottom => self.bottom = false,
            Left => self.left = false,
        }
    }

    /// Returns `true` if the wall is present.
    pub fn get_wall(&self, wall: CellWall) -> bool {
        match wall {
            Top => self.top,
            Right => self.right,
            Bottom => self.bottom,
            Left => self.left,
        }
    }

    pub fn is_open(&self, wall: CellWall) -> bool {
        !self.get_wall(wall)
    }

    pub fn walls(&self) -> [bool; 4] {
        CellWall::get_in_order().map(|wall| self.get_wall(wall))
    }

    pub fn open_count(&self) -> usize {
        self.walls().iter().filter(|&&w| !w).count()
    }

    pub fn get_coord(&self) -> Dims {
        self.coord
    }
}

/// One of the four sides of a cell, also used as a movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellWall {
    Top,
    Right,
    Bottom,
    Left,
}

impl CellWall {
    /// Up, right, down, left. Neighbor queries and the solver rely on this order.
    pub const fn get_in_order() -> [CellWall; 4] {
        [Top, Right, Bottom, Left]
    }

    pub fn to_coord(&self) -> Dims {
        match self {
            Top => Dims(0, -1),
            Right => Dims(1, 0),
            Bottom => Dims(0, 1),
            Left => Dims(-1, 0),
        }
    }

    pub fn reverse_wall(&self) -> CellWall {
        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }

    pub fn perpendicular_walls(&self) -> (CellWall, CellWall) {
        match self {
            Left | Right => (Top, Bottom),
            Top | Bottom => (Left, Right),
        }
    }
}

impl fmt::Display for CellWall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Top => "top",
            Right => "right",
            Bottom => "bottom",
            Left => "left",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown direction '{0}'")]
pub struct ParseWallError(String);

impl FromStr for CellWall {
    type Err = ParseWallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" | "up" => Ok(Top),
            "right" => Ok(Right),
            "bottom" | "down" => Ok(Bottom),
            "left" => Ok(Left),
            _ => Err(ParseWallError(s.to_string())),
        }
    }
}
