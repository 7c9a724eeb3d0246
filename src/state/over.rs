use crate::context::Context;
use crate::state::{State, Transition};
use macroquad::prelude::*;

/// End-of-run overlay; popping it returns to whatever sat underneath.
pub struct GameOverState;

impl State for GameOverState {
    fn update(&mut self, _ctx: &mut Context) -> Transition {
        if is_key_pressed(KeyCode::Space) {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    fn draw(&self) {
        draw_text("game over", 10.0, 30.0, 20.0, LIGHTGRAY);
    }

    fn draws_underlying(&self) -> bool {
        true
    }
}
