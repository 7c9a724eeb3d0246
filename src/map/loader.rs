use crate::error::MapError;
use crate::map::cache::MapLoader;
use crate::map::document::*;
use macroquad::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    backgroundcolor: Option<String>,
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer", "objectgroup", "imagelayer", "group"
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default)]
    offsetx: f32,
    #[serde(default)]
    offsety: f32,
    #[serde(default)]
    tintcolor: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    objects: Vec<JsonObject>,
    #[serde(default)]
    layers: Vec<JsonLayer>,
    #[serde(default)]
    image: Option<String>,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
    source: String,
}

#[derive(Deserialize)]
struct ExternalTileset {
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    columns: u32,
    image: String,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    polygon: Vec<JsonPoint>,
    #[serde(default)]
    polyline: Vec<JsonPoint>,
    #[serde(default)]
    gid: Option<u32>,
    #[serde(default)]
    text: Option<JsonValue>,
}

#[derive(Deserialize)]
struct JsonPoint {
    x: f32,
    y: f32,
}

/// Parses a Tiled `#RRGGBB` / `#AARRGGBB` color string.
///
/// Six-digit colors come back with zero alpha, matching the packed-ARGB
/// integers the tint rule is written against (`resolved_tint` treats zero
/// alpha as "no tint set").
pub fn parse_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgba(byte(0)?, byte(2)?, byte(4)?, 0)),
        8 => Some(Color::from_rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
        _ => None,
    }
}

/// Zero-alpha colors become fully opaque; used for outline and background
/// colors that are drawn directly rather than fed through the tint rule.
fn opaque(mut c: Color) -> Color {
    if c.a == 0.0 {
        c.a = 1.0;
    }
    c
}

fn object_shape(obj: &JsonObject) -> ObjectShape {
    let to_points = |pts: &[JsonPoint]| pts.iter().map(|p| vec2(p.x, p.y)).collect();
    if let Some(gid) = obj.gid {
        ObjectShape::Tile { gid }
    } else if obj.point {
        ObjectShape::Point
    } else if obj.ellipse {
        ObjectShape::Ellipse
    } else if !obj.polygon.is_empty() {
        ObjectShape::Polygon(to_points(&obj.polygon))
    } else if !obj.polyline.is_empty() {
        ObjectShape::Polyline(to_points(&obj.polyline))
    } else if obj.text.is_some() {
        ObjectShape::Text
    } else {
        ObjectShape::Rectangle
    }
}

fn convert_object(obj: JsonObject, layer: &str, max_gid: u32) -> Result<MapObject, MapError> {
    if let Some(raw_gid) = obj.gid {
        let gid = raw_gid & GID_MASK;
        if gid == 0 || gid > max_gid {
            return Err(MapError::InvalidObjectGid {
                layer: layer.to_owned(),
                object_id: obj.id,
                gid,
                max_gid,
            });
        }
    }
    let shape = object_shape(&obj);
    Ok(MapObject {
        id: obj.id,
        name: obj.name,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        visible: obj.visible,
        shape,
    })
}

fn convert_layers(
    json_layers: Vec<JsonLayer>,
    grid_w: usize,
    grid_h: usize,
    max_gid: u32,
) -> Result<Vec<Layer>, MapError> {
    let mut layers = Vec::with_capacity(json_layers.len());
    for l in json_layers {
        let kind = match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => {
                if l.data.len() != grid_w * grid_h {
                    return Err(MapError::InvalidLayerSize {
                        layer: l.name,
                        expected: grid_w * grid_h,
                        actual: l.data.len(),
                    });
                }
                for &raw_gid in &l.data {
                    let gid = raw_gid & GID_MASK;
                    if gid != 0 && gid > max_gid {
                        return Err(MapError::InvalidTileGid {
                            layer: l.name,
                            gid,
                            max_gid,
                        });
                    }
                }
                LayerKind::Tiles(TileGrid {
                    width: grid_w,
                    height: grid_h,
                    data: l.data,
                })
            }
            "objectgroup" => {
                let color = l
                    .color
                    .as_deref()
                    .and_then(parse_color)
                    .map(opaque)
                    .unwrap_or(GRAY);
                let objects = l
                    .objects
                    .into_iter()
                    .map(|obj| convert_object(obj, &l.name, max_gid))
                    .collect::<Result<Vec<_>, _>>()?;
                LayerKind::Objects(ObjectGroup { color, objects })
            }
            "imagelayer" => LayerKind::Image {
                source: l.image.unwrap_or_default(),
                texture: None,
            },
            "group" => LayerKind::Group {
                layers: convert_layers(l.layers, grid_w, grid_h, max_gid)?,
            },
            _ => LayerKind::Unsupported,
        };
        layers.push(Layer {
            name: l.name,
            visible: l.visible,
            opacity: l.opacity,
            tint: l
                .tintcolor
                .as_deref()
                .and_then(parse_color)
                .unwrap_or(Color::new(1.0, 1.0, 1.0, 0.0)),
            offset: vec2(l.offsetx, l.offsety),
            kind,
        });
    }
    Ok(layers)
}

/// Reads and validates a Tiled JSON map plus its external tilesets,
/// returning the assembled document (textures still unresolved) and the
/// directory tileset images are relative to.
pub fn parse_map_file(path: &str) -> Result<(MapDocument, PathBuf), MapError> {
    let p = Path::new(path);
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::UnsupportedFormat(path.to_owned()));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let j: JsonMap = serde_json::from_str(&txt).map_err(|source| MapError::Json {
        path: p.to_path_buf(),
        source,
    })?;

    let map_dir = p
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    let mut tilesets = Vec::with_capacity(j.tilesets.len());
    for ts in &j.tilesets {
        if !ts.source.ends_with(".json") {
            return Err(MapError::InvalidMap(format!(
                "external tileset must be JSON: {}",
                ts.source
            )));
        }
        let ts_path = map_dir.join(&ts.source);
        let ext_txt = std::fs::read_to_string(&ts_path).map_err(|source| MapError::Io {
            path: ts_path.clone(),
            source,
        })?;
        let ext: ExternalTileset =
            serde_json::from_str(&ext_txt).map_err(|source| MapError::Json {
                path: ts_path,
                source,
            })?;

        // Image path stays relative; texture resolution joins it with
        // the map directory later.
        tilesets.push(Tileset {
            first_gid: ts.firstgid,
            tilecount: ext.tilecount,
            columns: ext.columns,
            tile_w: ext.tilewidth,
            tile_h: ext.tileheight,
            spacing: ext.spacing,
            margin: ext.margin,
            image: ext.image,
            texture: None,
        });
    }

    let max_gid = tilesets
        .iter()
        .map(|t| t.first_gid + t.tilecount - 1)
        .max()
        .unwrap_or(0);

    let layers = convert_layers(j.layers, j.width as usize, j.height as usize, max_gid)?;
    let background = j
        .backgroundcolor
        .as_deref()
        .and_then(parse_color)
        .map(opaque)
        .unwrap_or(BLACK);

    Ok((
        MapDocument::new(
            j.width,
            j.height,
            j.tilewidth,
            j.tileheight,
            background,
            tilesets,
            layers,
        ),
        map_dir,
    ))
}

async fn fetch_texture(base: &Path, image: &str) -> Option<Texture2D> {
    let path = base.join(image);
    match load_texture(path.to_str().unwrap_or_default()).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Nearest);
            Some(tex)
        }
        Err(err) => {
            warn!("texture {} unavailable, skipping: {}", path.display(), err);
            None
        }
    }
}

async fn resolve_textures(doc: &mut MapDocument, base: &Path) {
    for ts in &mut doc.tilesets {
        ts.texture = fetch_texture(base, &ts.image).await;
    }

    let mut pending: Vec<&mut Layer> = doc.layers.iter_mut().collect();
    while let Some(layer) = pending.pop() {
        match &mut layer.kind {
            LayerKind::Image { source, texture } => {
                *texture = fetch_texture(base, source).await;
            }
            LayerKind::Group { layers } => pending.extend(layers.iter_mut()),
            _ => {}
        }
    }
}

/// Loads Tiled JSON maps from disk, uploading tileset and image-layer
/// textures with nearest-neighbor filtering. A texture that fails to load
/// is logged and left unset; the renderer skips it.
pub struct TiledJsonLoader;

impl MapLoader for TiledJsonLoader {
    async fn load(&self, path: &str) -> Result<MapDocument, MapError> {
        let (mut doc, base) = parse_map_file(path)?;
        resolve_textures(&mut doc, &base).await;
        Ok(doc)
    }
}
