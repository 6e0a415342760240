use crate::{
    dims::*,
    gameboard::{algorithms::GenAlgorithm, CellWall, Maze},
    solver::{solve_maze, SolveError},
};

use hashbrown::HashMap;
use pausable_clock::{PausableClock, PausableInstant};
use serde::{Deserialize, Serialize};

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
#[error("game is already running")]
pub struct GameAlreadyRunningError {}

#[derive(Debug, thiserror::Error)]
#[error("game is not running")]
pub struct GameNotRunningError {}

#[derive(Debug, thiserror::Error)]
#[error("game is not paused")]
pub struct GameNotPausedError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunningGameState {
    NotStarted,
    Running,
    Paused,
    Finished,
    Quitted,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveMode {
    /// One cell per move.
    #[default]
    Single,
    /// Keeps going until a wall or a junction.
    Corridor,
}

/// Identifies what kind of maze a result was achieved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameDefinition {
    pub size: Dims,
    pub algorithm: GenAlgorithm,
}

impl GameDefinition {
    pub fn from_maze(maze: &Maze) -> Self {
        GameDefinition {
            size: maze.size(),
            algorithm: maze.algorithm(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub moves: usize,
    pub seconds: f32,
}

/// Best results for each kind of maze, kept for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct BestTimes {
    best_results: HashMap<GameDefinition, SolveResult>,
}

impl BestTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, def: &GameDefinition) -> Option<SolveResult> {
        self.best_results.get(def).copied()
    }

    /// Stores `result` if it's faster than the current record and returns whether it was.
    pub fn submit(&mut self, def: GameDefinition, result: SolveResult) -> bool {
        match self.best_results.get(&def) {
            Some(best) if best.seconds <= result.seconds => false,
            _ => {
                log::info!("new best time {:.1}s for {:?}", result.seconds, def);
                self.best_results.insert(def, result);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.best_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_results.is_empty()
    }
}

/// Player session over one maze: position, moves and time.
pub struct RunningGame {
    maze: Maze,
    state: RunningGameState,
    clock: Option<PausableClock>,
    start: Option<PausableInstant>,
    player_pos: Dims,
    moves: usize,
    solution: Option<Vec<Dims>>,
}

impl RunningGame {
    pub fn new(maze: Maze) -> Self {
        RunningGame {
            player_pos: maze.start(),
            maze,
            state: RunningGameState::NotStarted,
            clock: None,
            start: None,
            moves: 0,
            solution: None,
        }
    }

    pub fn get_state(&self) -> RunningGameState {
        self.state
    }

    pub fn get_maze(&self) -> &Maze {
        &self.maze
    }

    pub fn get_player_pos(&self) -> Dims {
        self.player_pos
    }

    pub fn get_goal_pos(&self) -> Dims {
        self.maze.end()
    }

    pub fn get_move_count(&self) -> usize {
        self.moves
    }

    pub fn get_definition(&self) -> GameDefinition {
        GameDefinition::from_maze(&self.maze)
    }

    pub fn get_available_moves(&self) -> [bool; 4] {
        CellWall::get_in_order().map(|wall| self.maze.can_move(self.player_pos, wall))
    }

    /// Solution from the maze start, computed on first use.
    pub fn solution(&mut self) -> Result<&[Dims], SolveError> {
        if self.solution.is_none() {
            self.solution = Some(solve_maze(&self.maze)?);
        }

        Ok(self.solution.as_deref().unwrap_or_default())
    }

    /// Solution if [`RunningGame::solution`] was already called.
    pub fn cached_solution(&self) -> Option<&[Dims]> {
        self.solution.as_deref()
    }

    pub fn start(&mut self) -> Result<(), GameAlreadyRunningError> {
        if let RunningGameState::NotStarted = self.get_state() {
            let clock = PausableClock::default();
            self.start = Some(clock.now());
            self.clock = Some(clock);
            self.state = RunningGameState::Running;

            Ok(())
        } else {
            Err(GameAlreadyRunningError {})
        }
    }

    pub fn quit(&mut self) {
        self.state = RunningGameState::Quitted;
        self.clock = None;
        self.start = None;
    }

    /// Moves the player in `dir`, returns the new position and the number of steps taken.
    ///
    /// A move into a wall or out of the maze does nothing and takes zero steps.
    pub fn move_player(
        &mut self,
        dir: CellWall,
        move_mode: MoveMode,
    ) -> Result<(Dims, usize), GameNotRunningError> {
        self.check_running()?;

        let mut count = 0;
        while self.maze.can_move(self.player_pos, dir) {
            self.moves += 1;
            self.player_pos += dir.to_coord();
            count += 1;

            if move_mode == MoveMode::Single || self.player_pos == self.maze.end() {
                break;
            }

            let (a, b) = dir.perpendicular_walls();
            if self.maze.can_move(self.player_pos, a) || self.maze.can_move(self.player_pos, b) {
                break;
            }
        }

        if self.player_pos == self.maze.end() {
            self.finish();
        }

        Ok((self.player_pos, count))
    }

    fn finish(&mut self) {
        self.state = RunningGameState::Finished;
        if let Some(clock) = self.clock.as_mut() {
            clock.pause();
        }
        log::info!(
            "maze finished in {} moves, {:.1}s",
            self.moves,
            self.get_elapsed().unwrap_or_default().as_secs_f32()
        );
    }

    pub fn check_running(&self) -> Result<(), GameNotRunningError> {
        match self.state {
            RunningGameState::Running => Ok(()),
            _ => Err(GameNotRunningError {}),
        }
    }

    pub fn check_paused(&self) -> Result<(), GameNotPausedError> {
        match self.state {
            RunningGameState::Paused => Ok(()),
            _ => Err(GameNotPausedError {}),
        }
    }

    pub fn get_elapsed(&self) -> Option<Duration> {
        match (&self.clock, &self.start) {
            (Some(clock), Some(start)) => Some(start.elapsed(clock)),
            _ => None,
        }
    }

    /// Result of a finished game.
    pub fn result(&self) -> Option<SolveResult> {
        if self.state != RunningGameState::Finished {
            return None;
        }

        Some(SolveResult {
            moves: self.moves,
            seconds: self.get_elapsed()?.as_secs_f32(),
        })
    }

    pub fn pause(&mut self) -> Result<(), GameNotRunningError> {
        self.check_running()?;

        self.state = RunningGameState::Paused;
        if let Some(clock) = self.clock.as_mut() {
            clock.pause();
        }

        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), GameNotPausedError> {
        self.check_paused()?;

        self.state = RunningGameState::Running;
        if let Some(clock) = self.clock.as_mut() {
            clock.resume();
        }

        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = RunningGameState::NotStarted;
        self.moves = 0;
        self.player_pos = self.maze.start();

        self.clock = None;
        self.start = None;
    }
}
