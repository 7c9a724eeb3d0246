use anyhow::Context as _;
use islet::state::{MenuState, StateStack};
use islet::{Config, Context};
use macroquad::prelude::*;

const STARTUP_MAP: &str = "res/island.json";

fn window_conf() -> Conf {
    Conf {
        window_title: "islet".into(),
        window_width: Config::DEFAULT_WIDTH,
        window_height: Config::DEFAULT_HEIGHT,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut ctx = Context::new(Config::default());

    // There is no fallback map; a broken startup map ends the process.
    let map = match ctx.maps.get(STARTUP_MAP).await.context("loading startup map") {
        Ok(map) => map,
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(1);
        }
    };

    let mut stack = StateStack::new();
    stack.push(Box::new(MenuState::new(map)));

    while !stack.is_empty() {
        stack.update(&mut ctx);
        if stack.is_empty() {
            break;
        }

        clear_background(BLACK);
        stack.draw();

        #[cfg(debug_assertions)]
        {
            let fps = get_fps().to_string();
            let width = measure_text(&fps, None, 16, 1.0).width;
            draw_text(&fps, screen_width() - width, 16.0, 16.0, MAGENTA);
        }

        next_frame().await;
    }
}
