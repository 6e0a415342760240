pub mod draw;
pub mod input;

pub use draw::{format_time, MazeView};
pub use input::{key_to_action, Action};
