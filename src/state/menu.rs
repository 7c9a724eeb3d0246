use crate::context::Context;
use crate::map::document::MapDocument;
use crate::state::{PlayState, State, Transition};
use macroquad::prelude::*;
use std::rc::Rc;

/// Start screen; holds the startup map so play can begin without a load.
pub struct MenuState {
    map: Rc<MapDocument>,
}

impl MenuState {
    pub fn new(map: Rc<MapDocument>) -> Self {
        Self { map }
    }
}

impl State for MenuState {
    fn update(&mut self, _ctx: &mut Context) -> Transition {
        if is_key_pressed(KeyCode::Enter) {
            Transition::Push(Box::new(PlayState::new(Rc::clone(&self.map))))
        } else if is_key_pressed(KeyCode::Escape) {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    fn draw(&self) {
        let title = "islet";
        let title_size = measure_text(title, None, 64, 1.0);
        draw_text(
            title,
            (screen_width() - title_size.width) / 2.0,
            screen_height() / 2.0 - 24.0,
            64.0,
            WHITE,
        );

        let hint = "enter: play    esc: quit";
        let hint_size = measure_text(hint, None, 24, 1.0);
        draw_text(
            hint,
            (screen_width() - hint_size.width) / 2.0,
            screen_height() / 2.0 + 24.0,
            24.0,
            LIGHTGRAY,
        );
    }
}
