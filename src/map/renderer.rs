//! Viewport-culled map drawing.
//!
//! Stateless: one call walks the layer tree in document order and draws
//! whatever intersects the camera's visible world rectangle. Tile layers
//! are culled by grid-index spans, objects by bounding-box rejection;
//! the full grid is never iterated.

use crate::camera::{Camera, ViewRect};
use crate::map::document::*;
use macroquad::prelude::*;
use std::ops::Range;

const LINE_THICKNESS: f32 = 2.5;

/// Draws the visible portion of `map` into the current frame buffer.
pub fn draw(map: &MapDocument, camera: &Camera, screen: Vec2) {
    clear_background(map.background);
    let view = camera.view_rect(screen);
    draw_layers(map, &map.layers, &view);
}

fn draw_layers(map: &MapDocument, layers: &[Layer], view: &ViewRect) {
    for layer in layers {
        if !layer.visible {
            continue;
        }
        match &layer.kind {
            LayerKind::Tiles(grid) => draw_tile_layer(map, layer, grid, view),
            LayerKind::Group { layers } => draw_layers(map, layers, view),
            LayerKind::Objects(group) => draw_object_group(map, layer, group, view),
            LayerKind::Image { texture, .. } => {
                if let Some(tex) = texture {
                    draw_texture(tex, 0.0, 0.0, WHITE);
                }
            }
            LayerKind::Unsupported => {}
        }
    }
}

/// Grid indices overlapping a world-axis interval:
/// `[max(0, floor(min/tile)), min(count, ceil(max/tile) + 1))`.
pub fn tile_span(min: f32, max: f32, tile: f32, count: usize) -> Range<usize> {
    let lo = ((min / tile).floor().max(0.0) as usize).min(count);
    let hi = (((max / tile).ceil() + 1.0).max(0.0) as usize).min(count);
    lo..hi
}

/// Bounding-box test against the visible rectangle.
pub fn object_in_view(obj: &MapObject, view: &ViewRect) -> bool {
    !(obj.x > view.max.x
        || obj.y > view.max.y
        || obj.x + obj.width < view.min.x
        || obj.y + obj.height < view.min.y)
}

/// Center used for ellipse outlines. The x axis offsets by the full
/// object width, not half of it; see DESIGN.md before touching this.
pub fn ellipse_center(obj: &MapObject) -> Vec2 {
    vec2(obj.x + obj.width, obj.y + obj.height / 2.0)
}

fn draw_tile_layer(map: &MapDocument, layer: &Layer, grid: &TileGrid, view: &ViewRect) {
    let tint = layer.resolved_tint();
    let tw = map.tile_w as f32;
    let th = map.tile_h as f32;

    let cols = tile_span(view.min.x, view.max.x, tw, grid.width);
    for row in tile_span(view.min.y, view.max.y, th, grid.height) {
        for col in cols.clone() {
            let id = grid.gid(col, row);
            if id.clean() == 0 {
                continue;
            }
            let pos = vec2(col as f32 * tw, row as f32 * th) + layer.offset;
            draw_tile(map, id, pos, tint);
        }
    }
}

fn draw_tile(map: &MapDocument, id: TileId, pos: Vec2, tint: Color) {
    if let Some((ts, local)) = map.tileset_for(id) {
        if let Some(tex) = &ts.texture {
            draw_texture_ex(
                tex,
                pos.x,
                pos.y,
                tint,
                DrawTextureParams {
                    source: Some(ts.source_rect(local)),
                    flip_x: id.flip_h(),
                    flip_y: id.flip_v(),
                    ..Default::default()
                },
            );
        }
    }
}

fn draw_object_group(map: &MapDocument, layer: &Layer, group: &ObjectGroup, view: &ViewRect) {
    let tint = layer.resolved_tint();
    for obj in &group.objects {
        if !obj.visible || !object_in_view(obj, view) {
            continue;
        }
        match &obj.shape {
            ObjectShape::Polygon(points) => draw_polygon(obj, points, group.color),
            ObjectShape::Polyline(points) => draw_polyline(obj, points, group.color),
            ObjectShape::Point => draw_rectangle(obj.x, obj.y, 1.0, 1.0, group.color),
            ObjectShape::Rectangle => draw_rectangle_lines(
                obj.x,
                obj.y,
                obj.width,
                obj.height,
                LINE_THICKNESS,
                group.color,
            ),
            ObjectShape::Ellipse => {
                let center = ellipse_center(obj);
                draw_ellipse_lines(
                    center.x,
                    center.y,
                    obj.width / 2.0,
                    obj.height / 2.0,
                    0.0,
                    LINE_THICKNESS,
                    group.color,
                );
            }
            ObjectShape::Tile { gid } => draw_tile(map, TileId(*gid), vec2(obj.x, obj.y), tint),
            ObjectShape::Text => {}
        }
    }
}

fn draw_polyline(obj: &MapObject, points: &[Vec2], color: Color) {
    for pair in points.windows(2) {
        draw_line(
            obj.x + pair[0].x,
            obj.y + pair[0].y,
            obj.x + pair[1].x,
            obj.y + pair[1].y,
            LINE_THICKNESS,
            color,
        );
    }
}

fn draw_polygon(obj: &MapObject, points: &[Vec2], color: Color) {
    draw_polyline(obj, points, color);

    // Close the loop, but only for real polygons.
    if points.len() > 2 {
        let first = points[0];
        let last = points[points.len() - 1];
        draw_line(
            obj.x + last.x,
            obj.y + last.y,
            obj.x + first.x,
            obj.y + first.y,
            LINE_THICKNESS,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(x: f32, y: f32, w: f32, h: f32) -> MapObject {
        MapObject {
            id: 0,
            name: String::new(),
            x,
            y,
            width: w,
            height: h,
            visible: true,
            shape: ObjectShape::Rectangle,
        }
    }

    #[test]
    fn span_covers_interior_views() {
        // View [20, 50] over 16px tiles: floor(20/16)=1, ceil(50/16)+1=5.
        assert_eq!(tile_span(20.0, 50.0, 16.0, 100), 1..5);
    }

    #[test]
    fn span_includes_boundary_cells() {
        // A view ending exactly on a cell edge still takes the +1 row.
        assert_eq!(tile_span(0.0, 32.0, 16.0, 100), 0..3);
        // A view starting exactly on a cell edge starts at that cell.
        assert_eq!(tile_span(32.0, 40.0, 16.0, 100), 2..4);
    }

    #[test]
    fn span_clamps_to_grid() {
        assert_eq!(tile_span(-100.0, 40.0, 16.0, 100), 0..4);
        assert_eq!(tile_span(20.0, 10_000.0, 16.0, 8), 1..8);
        assert_eq!(tile_span(-100.0, 10_000.0, 16.0, 8), 0..8);
    }

    #[test]
    fn span_is_empty_outside_grid() {
        // Entirely left/above the grid.
        assert_eq!(tile_span(-200.0, -100.0, 16.0, 100).len(), 0);
        // Entirely past the last cell.
        assert_eq!(tile_span(5_000.0, 6_000.0, 16.0, 8).len(), 0);
    }

    #[test]
    fn span_never_iterates_the_full_grid_for_a_small_view() {
        let span = tile_span(512.0, 544.0, 16.0, 100_000);
        assert!(span.len() <= 4);
    }

    #[test]
    fn objects_fully_outside_are_culled() {
        let view = ViewRect {
            min: vec2(0.0, 0.0),
            max: vec2(100.0, 100.0),
        };
        assert!(!object_in_view(&object(150.0, 10.0, 20.0, 20.0), &view));
        assert!(!object_in_view(&object(10.0, 150.0, 20.0, 20.0), &view));
        assert!(!object_in_view(&object(-50.0, 10.0, 20.0, 20.0), &view));
        assert!(!object_in_view(&object(10.0, -50.0, 20.0, 20.0), &view));
    }

    #[test]
    fn objects_straddling_the_boundary_survive() {
        let view = ViewRect {
            min: vec2(0.0, 0.0),
            max: vec2(100.0, 100.0),
        };
        assert!(object_in_view(&object(90.0, 90.0, 20.0, 20.0), &view));
        assert!(object_in_view(&object(-10.0, -10.0, 20.0, 20.0), &view));
        assert!(object_in_view(&object(40.0, 40.0, 20.0, 20.0), &view));
    }

    #[test]
    fn ellipse_center_keeps_full_width_offset() {
        // Pins the shipped visual: x offsets by width, not width / 2.
        let c = ellipse_center(&object(10.0, 20.0, 8.0, 6.0));
        assert_eq!(c, vec2(18.0, 23.0));
    }
}
