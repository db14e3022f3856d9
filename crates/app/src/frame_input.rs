//! Keyboard capture for one rendered frame: arrows move, R restarts.
//! Every other key is ignored by design.

use app::app_loop::FrameCommands;
use core::Direction;
use macroquad::prelude::{KeyCode, is_key_pressed};

const DIRECTION_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
];

pub fn capture_frame_commands() -> FrameCommands {
    let direction = DIRECTION_KEYS
        .iter()
        .find(|(key, _)| is_key_pressed(*key))
        .map(|(_, direction)| *direction);

    FrameCommands { direction, restart: is_key_pressed(KeyCode::R) }
}
