use std::{
    io::{self, Write},
    panic, thread,
    time::Duration,
};

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use gridmaze_core::{
    dims::Dims,
    game::{BestTimes, MoveMode, RunningGame, RunningGameState},
    gameboard::algorithms::new_rng,
    GenAlgorithm, GenerationError, Maze, SolveError,
};

use crate::{
    constants, logging,
    settings::{MazePreset, SettingsError},
    ui::{format_time, key_to_action, Action, MazeView},
};

/// Redraw interval while waiting for input, keeps the timer moving.
const TICK: Duration = Duration::from_millis(500);

const STATUS_LINES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Unknown maze preset: {0}")]
    UnknownPreset(String),
}

/// Everything needed to start a session, merged from settings and command line.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub presets: Vec<MazePreset>,
    pub preset: usize,
    /// Overrides the preset size until another preset is picked.
    pub custom_size: Option<Dims>,
    pub algorithm: GenAlgorithm,
    pub move_mode: MoveMode,
    /// Seed of the first maze.
    pub seed: Option<u64>,
}

impl AppOptions {
    pub fn selected_size(&self) -> Dims {
        if let Some(size) = self.custom_size {
            return size;
        }

        self.presets
            .get(self.preset)
            .map(|p| Dims(p.width as i32, p.height as i32))
            .unwrap_or(Dims(18, 18))
    }

    pub fn selected_title(&self) -> String {
        match (self.custom_size, self.presets.get(self.preset)) {
            (Some(_), _) | (None, None) => "Custom".to_string(),
            (None, Some(preset)) => preset.title.clone(),
        }
    }

    /// Generates the next maze, consuming the first-maze seed if there is one.
    pub fn generate(&mut self) -> Result<Maze, GenerationError> {
        let mut rng = new_rng(self.seed.take());
        Maze::generate(self.selected_size(), self.algorithm, &mut rng)
    }
}

pub struct App {
    options: AppOptions,
    game: RunningGame,
    best_times: BestTimes,
    show_solution: bool,
    player_char: char,
    message: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(mut options: AppOptions) -> Result<App, AppError> {
        let maze = options.generate()?;

        let mut app = App {
            options,
            game: RunningGame::new(maze),
            best_times: BestTimes::new(),
            show_solution: false,
            player_char: constants::get_random_player_char(),
            message: None,
            quit: false,
        };
        app.start_game();

        Ok(app)
    }

    pub fn game(&self) -> &RunningGame {
        &self.game
    }

    pub fn best_times(&self) -> &BestTimes {
        &self.best_times
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn is_solution_shown(&self) -> bool {
        self.show_solution
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn new_maze(&mut self) -> Result<(), AppError> {
        let maze = self.options.generate()?;
        self.game = RunningGame::new(maze);
        self.show_solution = false;
        self.message = None;
        self.start_game();

        Ok(())
    }

    fn start_game(&mut self) {
        let maze = self.game.get_maze();
        log::info!("new {} maze {}", maze.algorithm(), maze.size());
        self.warn_if_too_big(maze.size());

        if let Err(err) = self.game.start() {
            log::error!("{}", err);
        }
    }

    fn warn_if_too_big(&self, size: Dims) {
        let needed = (size.0 * 4 + 1, size.1 * 2 + 1 + STATUS_LINES as i32);
        if let Ok((cols, rows)) = terminal::size() {
            if (cols as i32) < needed.0 || (rows as i32) < needed.1 {
                log::warn!(
                    "Terminal is {}x{}, maze needs {}x{}",
                    cols,
                    rows,
                    needed.0,
                    needed.1
                );
            }
        }
    }

    pub fn handle(&mut self, action: Action) -> Result<(), AppError> {
        match action {
            Action::Move(dir) => match self.game.move_player(dir, self.options.move_mode) {
                Ok(_) if self.game.get_state() == RunningGameState::Finished => self.on_finish(),
                Ok(_) => {}
                Err(err) => log::debug!("move ignored: {}", err),
            },
            Action::ToggleSolution => {
                if self.show_solution {
                    self.show_solution = false;
                } else {
                    match self.game.solution() {
                        Ok(path) => {
                            log::debug!("solution has {} steps", path.len() - 1);
                            self.show_solution = true;
                        }
                        Err(err) => log::error!("{}", err),
                    }
                }
            }
            Action::NewMaze => self.new_maze()?,
            Action::NextAlgorithm => {
                self.options.algorithm = self.options.algorithm.next();
                self.message = Some(format!(
                    "Next maze: {}, press n to generate",
                    self.options.algorithm.title()
                ));
            }
            Action::Preset(idx) => {
                if idx < self.options.presets.len() {
                    self.options.preset = idx;
                    self.options.custom_size = None;
                    let Dims(w, h) = self.options.selected_size();
                    self.message = Some(format!(
                        "Next maze: {} {}x{}, press n to generate",
                        self.options.selected_title(),
                        w,
                        h
                    ));
                } else {
                    log::warn!("There is no preset number {}", idx + 1);
                }
            }
            Action::TogglePause => match self.game.get_state() {
                RunningGameState::Running => match self.game.pause() {
                    Ok(()) => self.message = Some("Paused, press p to resume".to_string()),
                    Err(err) => log::error!("{}", err),
                },
                RunningGameState::Paused => match self.game.resume() {
                    Ok(()) => self.message = None,
                    Err(err) => log::error!("{}", err),
                },
                _ => log::debug!("nothing to pause"),
            },
            Action::ToggleDebug => logging::get_logger().switch_debug(),
            Action::Quit => {
                self.game.quit();
                self.quit = true;
            }
        }

        Ok(())
    }

    fn on_finish(&mut self) {
        let Some(result) = self.game.result() else {
            return;
        };

        let time = format_time(Duration::from_secs_f32(result.seconds));
        let is_best = self.best_times.submit(self.game.get_definition(), result);
        self.message = Some(format!(
            "Solved in {} moves, {}{}. Press n for a new maze",
            result.moves,
            time,
            if is_best { ", new best time" } else { "" }
        ));
    }

    fn status(&self) -> Vec<String> {
        let maze = self.game.get_maze();
        let elapsed = self.game.get_elapsed().unwrap_or_default();
        let best = self
            .best_times
            .get(&self.game.get_definition())
            .map(|best| format_time(Duration::from_secs_f32(best.seconds)))
            .unwrap_or_else(|| "-".to_string());
        let Dims(w, h) = maze.size();

        vec![
            format!(
                "Moves: {}  Time: {}  Best: {}",
                self.game.get_move_count(),
                format_time(elapsed),
                best
            ),
            format!("{} {}x{}  {}", self.options.selected_title(), w, h, maze.algorithm().title()),
            self.message.clone().unwrap_or_else(|| {
                "arrows/wasd move  h hint  n new  g algorithm  1-9 size  p pause  q quit"
                    .to_string()
            }),
        ]
    }

    /// Whole screen as lines of text.
    pub fn frame(&self) -> Vec<String> {
        let maze = self.game.get_maze();
        let mut view = MazeView::new(maze).player(self.game.get_player_pos(), self.player_char);
        if self.show_solution {
            if let Some(path) = self.game.cached_solution() {
                view = view.solution(path);
            }
        }

        let mut lines = self.status();
        lines.extend(view.lines());
        lines.extend(
            logging::get_logger()
                .visible()
                .into_iter()
                .map(|msg| msg.format()),
        );

        lines
    }

    /// Takes over the terminal until the player quits.
    pub fn run(mut self) -> Result<(), AppError> {
        let mut stdout = io::stdout();

        register_panic_hook();
        let res = terminal::enable_raw_mode()
            .and_then(|_| execute!(stdout, EnterAlternateScreen, cursor::Hide))
            .map_err(AppError::from)
            .and_then(|_| self.event_loop(&mut stdout));

        let restored = restore_terminal(&mut stdout);
        unregister_panic_hook();

        res.and(restored.map_err(AppError::from))
    }

    fn event_loop(&mut self, out: &mut impl Write) -> Result<(), AppError> {
        while !self.quit {
            self.draw(out)?;

            if !event::poll(TICK)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if let Some(action) = key_to_action(&key) {
                    self.handle(action)?;
                }
            }
        }

        Ok(())
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        for (i, line) in self.frame().iter().enumerate() {
            queue!(
                out,
                MoveTo(0, i as u16),
                Print(line),
                Clear(ClearType::UntilNewLine)
            )?;
        }
        queue!(out, Clear(ClearType::FromCursorDown))?;

        out.flush()
    }
}

/// Shows the cursor, leaves the alternate screen and disables raw mode.
///
/// Every step runs even if an earlier one fails, the first error is returned.
pub fn restore_terminal(out: &mut impl Write) -> io::Result<()> {
    let screen = execute!(out, cursor::Show, LeaveAlternateScreen);
    let raw = terminal::disable_raw_mode();

    screen.and(raw)
}

/// Restores the terminal before the previous hook prints the panic.
fn register_panic_hook() {
    let prev = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // nothing sensible to do with an error while already panicking
        let _ = restore_terminal(&mut io::stdout());

        prev(info)
    }));
}

fn unregister_panic_hook() {
    if !thread::panicking() {
        let _ = panic::take_hook();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::default_presets;
    use gridmaze_core::gameboard::Grid;

    fn options(seed: u64) -> AppOptions {
        AppOptions {
            presets: default_presets(),
            preset: 0,
            custom_size: Some(Dims(6, 4)),
            algorithm: GenAlgorithm::Dfs,
            move_mode: MoveMode::Single,
            seed: Some(seed),
        }
    }

    fn walk_solution(app: &mut App) {
        app.handle(Action::ToggleSolution).unwrap();
        let path = app.game().cached_solution().unwrap().to_vec();
        for pair in path.windows(2) {
            let dir = Grid::which_wall_between(pair[0], pair[1]).unwrap();
            app.handle(Action::Move(dir)).unwrap();
        }
    }

    #[test]
    fn starts_running() {
        let app = App::new(options(1)).unwrap();
        assert_eq!(app.game().get_state(), RunningGameState::Running);
        assert_eq!(app.game().get_maze().size(), Dims(6, 4));
        assert_eq!(app.game().get_player_pos(), Dims::ZERO);
    }

    #[test]
    fn invalid_size_is_reported() {
        let opts = AppOptions {
            custom_size: Some(Dims(0, 5)),
            ..options(1)
        };
        assert!(matches!(
            App::new(opts),
            Err(AppError::Generation(GenerationError::InvalidDimension(Dims(0, 5))))
        ));
    }

    #[test]
    fn solving_records_best_time() {
        let mut app = App::new(options(2)).unwrap();
        walk_solution(&mut app);

        assert_eq!(app.game().get_state(), RunningGameState::Finished);
        assert_eq!(app.best_times().len(), 1);
        assert!(app.frame()[2].starts_with("Solved in"));

        // further moves are ignored
        let moves = app.game().get_move_count();
        app.handle(Action::Move(gridmaze_core::gameboard::CellWall::Left)).unwrap();
        assert_eq!(app.game().get_move_count(), moves);
    }

    #[test]
    fn solution_toggle() {
        let mut app = App::new(options(3)).unwrap();
        assert!(!app.is_solution_shown());
        app.handle(Action::ToggleSolution).unwrap();
        assert!(app.is_solution_shown());
        assert!(app.frame().iter().any(|l| l.contains(constants::SOLUTION_CHAR)));
        app.handle(Action::ToggleSolution).unwrap();
        assert!(!app.is_solution_shown());
    }

    #[test]
    fn selection_applies_to_next_maze() {
        let mut app = App::new(options(4)).unwrap();
        app.handle(Action::NextAlgorithm).unwrap();
        app.handle(Action::Preset(0)).unwrap();
        assert_eq!(app.game().get_maze().algorithm(), GenAlgorithm::Dfs);
        assert_eq!(app.game().get_maze().size(), Dims(6, 4));

        app.handle(Action::NewMaze).unwrap();
        assert_eq!(app.game().get_maze().algorithm(), GenAlgorithm::Prims);
        assert_eq!(app.game().get_maze().size(), Dims(10, 10));
        assert!(!app.is_solution_shown());

        app.handle(Action::Preset(42)).unwrap();
        assert_eq!(app.options().preset, 0);
    }

    #[test]
    fn pause_and_quit() {
        let mut app = App::new(options(5)).unwrap();
        app.handle(Action::TogglePause).unwrap();
        assert_eq!(app.game().get_state(), RunningGameState::Paused);
        app.handle(Action::TogglePause).unwrap();
        assert_eq!(app.game().get_state(), RunningGameState::Running);

        app.handle(Action::Quit).unwrap();
        assert!(app.should_quit());
        assert_eq!(app.game().get_state(), RunningGameState::Quitted);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn restore_terminal_output() {
        let mut out = Vec::new();
        restore_terminal(&mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\x1b[?25h"), "cursor is not shown: {:?}", out);
        assert!(out.contains("\x1b[?1049l"), "alternate screen is kept: {:?}", out);
    }

    #[test]
    fn restore_terminal_reports_write_errors() {
        let err = restore_terminal(&mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn pause_outside_game_is_ignored() {
        let mut app = App::new(options(7)).unwrap();
        walk_solution(&mut app);
        app.handle(Action::TogglePause).unwrap();
        assert_eq!(app.game().get_state(), RunningGameState::Finished);
    }

    #[test]
    fn frame_layout() {
        let app = App::new(options(6)).unwrap();
        let frame = app.frame();
        assert!(frame[0].starts_with("Moves: 0"));
        assert_eq!(frame[1], "Custom 6x4  Depth-first search");
        assert_eq!(frame[STATUS_LINES], "+---".repeat(6) + "+");
    }
}
