use std::path::PathBuf;

use dirs::preference_dir;
use rand::{self, seq::SliceRandom, thread_rng};

const AVAILABLE_PLAYER_CHARS: [char; 6] = ['@', 'O', 'o', '&', '*', '#'];

pub const GOAL_CHAR: char = 'X';
pub const START_CHAR: char = 'S';
pub const SOLUTION_CHAR: char = '.';

pub fn base_path() -> Option<PathBuf> {
    preference_dir().map(|dir| dir.join("gridmaze"))
}

pub fn get_random_player_char() -> char {
    *AVAILABLE_PLAYER_CHARS.choose(&mut thread_rng()).unwrap_or(&'@')
}
