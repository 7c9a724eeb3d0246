use crate::context::Context;
use crate::state::{State, Transition};
use macroquad::prelude::*;

/// Pause overlay: dims the game underneath and waits for a key.
pub struct PauseState;

impl State for PauseState {
    fn update(&mut self, _ctx: &mut Context) -> Transition {
        if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Escape) {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    fn draw(&self) {
        draw_rectangle(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
            Color::new(0.0, 0.0, 0.0, 0.5),
        );
        draw_text("paused", 10.0, 30.0, 20.0, LIGHTGRAY);
    }

    fn draws_underlying(&self) -> bool {
        true
    }
}
