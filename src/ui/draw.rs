use std::time::Duration;

use gridmaze_core::{dims::Dims, gameboard::CellWall, Maze};

use crate::constants::{GOAL_CHAR, SOLUTION_CHAR, START_CHAR};

/// Text view of a maze, optionally with the player and a solution overlay.
pub struct MazeView<'a> {
    pub maze: &'a Maze,
    pub player: Option<(Dims, char)>,
    pub solution: Option<&'a [Dims]>,
}

impl<'a> MazeView<'a> {
    pub fn new(maze: &'a Maze) -> Self {
        MazeView {
            maze,
            player: None,
            solution: None,
        }
    }

    pub fn player(mut self, pos: Dims, ch: char) -> Self {
        self.player = Some((pos, ch));
        self
    }

    pub fn solution(mut self, path: &'a [Dims]) -> Self {
        self.solution = Some(path);
        self
    }

    fn marker(&self, pos: Dims) -> char {
        match self.player {
            Some((player, ch)) if player == pos => return ch,
            _ => {}
        }

        if pos == self.maze.end() {
            GOAL_CHAR
        } else if pos == self.maze.start() {
            START_CHAR
        } else if self.solution.is_some_and(|path| path.contains(&pos)) {
            SOLUTION_CHAR
        } else {
            ' '
        }
    }

    fn wall(&self, pos: Dims, wall: CellWall) -> bool {
        self.maze
            .get_cell(pos)
            .map_or(true, |cell| cell.get_wall(wall))
    }

    /// Each cell is three characters wide, walls sit between cells.
    pub fn lines(&self) -> Vec<String> {
        let Dims(w, h) = self.maze.size();
        let mut lines = Vec::with_capacity(h as usize * 2 + 1);

        let mut top = String::from("+");
        for x in 0..w {
            top.push_str(if self.wall(Dims(x, 0), CellWall::Top) { "---" } else { "   " });
            top.push('+');
        }
        lines.push(top);

        for y in 0..h {
            let mut row = String::new();
            row.push(if self.wall(Dims(0, y), CellWall::Left) { '|' } else { ' ' });

            let mut floor = String::from("+");
            for x in 0..w {
                let pos = Dims(x, y);
                row.push(' ');
                row.push(self.marker(pos));
                row.push(' ');
                row.push(if self.wall(pos, CellWall::Right) { '|' } else { ' ' });

                floor.push_str(if self.wall(pos, CellWall::Bottom) { "---" } else { "   " });
                floor.push('+');
            }

            lines.push(row);
            lines.push(floor);
        }

        lines
    }
}

/// `m:ss`, whole seconds.
pub fn format_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmaze_core::{generate_maze, generate_maze_seeded, solve_maze, GenAlgorithm};

    #[test]
    fn single_cell() {
        let maze = generate_maze(1, 1, GenAlgorithm::Dfs).unwrap();
        assert_eq!(MazeView::new(&maze).lines(), vec!["+---+", "| X |", "+---+"]);
        assert_eq!(
            MazeView::new(&maze).player(Dims::ZERO, '@').lines()[1],
            "| @ |"
        );
    }

    #[test]
    fn corridor() {
        let maze = generate_maze(3, 1, GenAlgorithm::Prims).unwrap();
        assert_eq!(
            MazeView::new(&maze).lines(),
            vec!["+---+---+---+", "| S       X |", "+---+---+---+"]
        );
    }

    #[test]
    fn solution_overlay() {
        let maze = generate_maze_seeded(6, 6, GenAlgorithm::Dfs, 21).unwrap();
        let path = solve_maze(&maze).unwrap();
        let lines = MazeView::new(&maze).solution(&path).lines();

        assert_eq!(lines.len(), 13);
        assert!(lines.iter().all(|line| line.chars().count() == 25));

        let dots: usize = lines.iter().map(|l| l.matches(SOLUTION_CHAR).count()).sum();
        assert_eq!(dots, path.len() - 2);
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time(Duration::from_secs(0)), "0:00");
        assert_eq!(format_time(Duration::from_secs(65)), "1:05");
        assert_eq!(format_time(Duration::from_millis(600_900)), "10:00");
    }
}
