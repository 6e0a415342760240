use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gridmaze_core::gameboard::CellWall;

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(CellWall),
    ToggleSolution,
    NewMaze,
    NextAlgorithm,
    Preset(usize),
    TogglePause,
    ToggleDebug,
    Quit,
}

pub fn is_release(kind: KeyEventKind) -> bool {
    kind == KeyEventKind::Release
}

/// Arrow keys and WASD move, the rest are single letter commands.
pub fn key_to_action(key: &KeyEvent) -> Option<Action> {
    if is_release(key.kind) {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    use Action::*;
    use CellWall::*;

    Some(match key.code {
        KeyCode::Up => Move(Top),
        KeyCode::Right => Move(Right),
        KeyCode::Down => Move(Bottom),
        KeyCode::Left => Move(Left),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Move(Top),
            'd' => Move(Right),
            's' => Move(Bottom),
            'a' => Move(Left),
            'h' | ' ' => ToggleSolution,
            'n' => NewMaze,
            'g' => NextAlgorithm,
            'p' => TogglePause,
            'l' => ToggleDebug,
            'q' => Quit,
            '1'..='9' => Preset(c as usize - '1' as usize),
            _ => return None,
        },
        KeyCode::Esc => Quit,
        _ => return None,
    })
}
