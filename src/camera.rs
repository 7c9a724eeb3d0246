use macroquad::prelude::*;

/// World-space axis-aligned box currently shown through a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ViewRect {
    /// Builds a rect from two corners in either order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

/// Screen-space camera: pixel anchor, world focus point, rotation and zoom.
///
/// Owned by the active game state and mutated every frame; the renderer
/// borrows it for a single draw call.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Screen pixel the target is pinned to.
    pub offset: Vec2,
    /// World point in focus.
    pub target: Vec2,
    /// Degrees. Carried to the GPU camera; culling assumes 0.
    pub rotation: f32,
    /// Magnification factor, > 0.
    pub zoom: f32,
}

impl Camera {
    pub fn new(offset: Vec2, target: Vec2, zoom: f32) -> Self {
        Self {
            offset,
            target,
            rotation: 0.0,
            zoom,
        }
    }

    /// Inverse camera transform of a screen pixel (axis-aligned case).
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.zoom + self.target
    }

    /// Forward camera transform of a world point (axis-aligned case).
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.zoom + self.offset
    }

    /// Visible world rectangle for a screen of the given pixel size,
    /// computed from the transformed screen corners.
    pub fn view_rect(&self, screen: Vec2) -> ViewRect {
        ViewRect::from_corners(
            self.screen_to_world(Vec2::ZERO),
            self.screen_to_world(screen),
        )
    }

    /// Equivalent macroquad camera for `set_camera`, keeping world
    /// coordinates in pixels (macroquad's own zoom is in NDC units).
    pub fn to_camera_2d(&self, screen: Vec2) -> Camera2D {
        let view = self.view_rect(screen);
        let size = view.max - view.min;
        let mut cam =
            Camera2D::from_display_rect(Rect::new(view.min.x, view.min.y, size.x, size.y));
        // from_display_rect flips the y axis; this crate keeps y pointing
        // down like the screen does.
        cam.zoom.y = -cam.zoom.y;
        cam.rotation = self.rotation;
        cam
    }
}
