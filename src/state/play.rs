use crate::camera::Camera;
use crate::context::Context;
use crate::map::document::MapDocument;
use crate::map::renderer;
use crate::state::{GameOverState, PauseState, State, Transition};
use macroquad::prelude::*;
use std::rc::Rc;

const PAN_SPEED: f32 = 200.0;
const PLAY_ZOOM: f32 = 2.0;
const DRIFTER_COUNT: usize = 10;

struct Drifter {
    pos: Vec2,
    vel: Option<Vec2>,
}

/// The game proper: owns the camera and a handful of drifting entities,
/// renders the map through the camera every frame.
pub struct PlayState {
    map: Rc<MapDocument>,
    camera: Camera,
    drifters: Vec<Drifter>,
}

impl PlayState {
    pub fn new(map: Rc<MapDocument>) -> Self {
        let screen = vec2(screen_width(), screen_height());
        let camera = Camera::new(screen / 2.0, map.pixel_size() / 2.0, PLAY_ZOOM);

        // Every second drifter is static scenery.
        let drifters = (0..DRIFTER_COUNT)
            .map(|i| Drifter {
                pos: vec2(i as f32, i as f32),
                vel: (i % 2 == 0).then(|| vec2(i as f32, i as f32)),
            })
            .collect();

        Self {
            map,
            camera,
            drifters,
        }
    }
}

impl State for PlayState {
    fn update(&mut self, _ctx: &mut Context) -> Transition {
        let dt = get_frame_time();

        for d in &mut self.drifters {
            if let Some(vel) = d.vel {
                d.pos += vel * dt;
            }
        }

        if is_key_pressed(KeyCode::Space) {
            return Transition::Push(Box::new(PauseState));
        }
        if is_key_pressed(KeyCode::Enter) {
            return Transition::Replace(Box::new(GameOverState));
        }

        let dx = if is_key_down(KeyCode::Left) {
            -1.0
        } else if is_key_down(KeyCode::Right) {
            1.0
        } else {
            0.0
        };
        let dy = if is_key_down(KeyCode::Up) {
            -1.0
        } else if is_key_down(KeyCode::Down) {
            1.0
        } else {
            0.0
        };
        self.camera.target += vec2(dx, dy).normalize_or_zero() * PAN_SPEED * dt;

        // Keep the view inside the map; degenerate (view-sized or
        // smaller) maps pin to their center.
        let half = self.camera.offset / self.camera.zoom;
        let upper = (self.map.pixel_size() - half).max(half);
        self.camera.target = self.camera.target.clamp(half, upper);

        Transition::None
    }

    fn draw(&self) {
        let screen = vec2(screen_width(), screen_height());
        set_camera(&self.camera.to_camera_2d(screen));

        renderer::draw(&self.map, &self.camera, screen);

        for d in &self.drifters {
            draw_rectangle(d.pos.x, d.pos.y, 1.0, 1.0, WHITE);
        }

        set_default_camera();
    }
}
