use macroquad::prelude::*;

/// Horizontal flip flag stored in bit 31 of a gid.
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip flag stored in bit 30 of a gid.
pub const FLIP_V: u32 = 0x4000_0000;
/// Diagonal flip flag stored in bit 29 of a gid.
pub const FLIP_D: u32 = 0x2000_0000;
/// Keeps the lower 29 bits of a gid (bit 28 is unused by Tiled).
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// A stored global tile id, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
    /// The gid with every flip flag stripped. Id 0 means "no tile".
    #[inline]
    pub fn clean(self) -> u32 {
        self.0 & GID_MASK
    }
    #[inline]
    pub fn flip_h(self) -> bool {
        (self.0 & FLIP_H) != 0
    }
    #[inline]
    pub fn flip_v(self) -> bool {
        (self.0 & FLIP_V) != 0
    }
    #[inline]
    pub fn flip_d(self) -> bool {
        (self.0 & FLIP_D) != 0
    }
}

/// One texture atlas with a regular tile grid.
///
/// `texture` is `None` when the backing image could not be loaded; every
/// draw that resolves to such a tileset is skipped.
#[derive(Debug)]
pub struct Tileset {
    pub first_gid: u32,
    pub tilecount: u32,
    pub columns: u32,
    pub tile_w: u32,
    pub tile_h: u32,
    pub spacing: u32,
    pub margin: u32,
    pub image: String,
    pub texture: Option<Texture2D>,
}

impl Tileset {
    /// Atlas sub-rectangle of a tileset-local id.
    pub fn source_rect(&self, local: u32) -> Rect {
        let col = local % self.columns;
        let row = local / self.columns;
        let sx = self.margin + col * (self.tile_w + self.spacing);
        let sy = self.margin + row * (self.tile_h + self.spacing);
        Rect::new(sx as f32, sy as f32, self.tile_w as f32, self.tile_h as f32)
    }
}

/// Row-major map-wide tile grid; an entry of 0 is an empty cell.
#[derive(Debug)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
}

impl TileGrid {
    #[inline]
    pub fn gid(&self, col: usize, row: usize) -> TileId {
        TileId(self.data[row * self.width + col])
    }
}

/// A placed object inside an object group.
#[derive(Debug)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
    pub shape: ObjectShape,
}

/// Shape payload of a map object. Points are object-local offsets.
#[derive(Debug)]
pub enum ObjectShape {
    Rectangle,
    Ellipse,
    Point,
    Polygon(Vec<Vec2>),
    Polyline(Vec<Vec2>),
    Tile { gid: u32 },
    Text,
}

/// An object layer: a shared outline color plus its objects.
#[derive(Debug)]
pub struct ObjectGroup {
    pub color: Color,
    pub objects: Vec<MapObject>,
}

/// Kind-specific payload of a layer node.
#[derive(Debug)]
pub enum LayerKind {
    Tiles(TileGrid),
    Image {
        source: String,
        texture: Option<Texture2D>,
    },
    Objects(ObjectGroup),
    Group { layers: Vec<Layer> },
    /// Layer kinds the renderer does not know; skipped when drawing.
    Unsupported,
}

/// One node of the layer tree. Draw order is document order.
#[derive(Debug)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    pub tint: Color,
    pub offset: Vec2,
    pub kind: LayerKind,
}

impl Layer {
    /// Tint actually applied to tile draws: a tint with zero alpha means
    /// "no tint set", so the layer opacity alone is used; otherwise the
    /// two are multiplied.
    pub fn resolved_tint(&self) -> Color {
        let mut tint = self.tint;
        tint.a = if tint.a == 0.0 {
            self.opacity
        } else {
            tint.a * self.opacity
        };
        tint
    }
}

/// A fully loaded, immutable map: tilesets, layer tree, and the flat
/// gid -> tileset lookup table.
#[derive(Debug)]
pub struct MapDocument {
    pub width: u32,
    pub height: u32,
    pub tile_w: u32,
    pub tile_h: u32,
    pub background: Color,
    pub tilesets: Vec<Tileset>,
    pub layers: Vec<Layer>,
    gid_lut: Vec<u16>,
}

impl MapDocument {
    /// Assembles a document, sorting tilesets by `first_gid` and building
    /// the gid lookup table. The only construction path; loaders and tests
    /// both go through it.
    pub fn new(
        width: u32,
        height: u32,
        tile_w: u32,
        tile_h: u32,
        background: Color,
        mut tilesets: Vec<Tileset>,
        layers: Vec<Layer>,
    ) -> Self {
        tilesets.sort_unstable_by_key(|t| t.first_gid);

        let max_gid = tilesets
            .iter()
            .map(|t| t.first_gid + t.tilecount - 1)
            .max()
            .unwrap_or(0);

        let mut gid_lut = vec![u16::MAX; (max_gid + 1) as usize];
        for (i, t) in tilesets.iter().enumerate() {
            for gid in t.first_gid..(t.first_gid + t.tilecount) {
                gid_lut[gid as usize] = i as u16;
            }
        }

        Self {
            width,
            height,
            tile_w,
            tile_h,
            background,
            tilesets,
            layers,
            gid_lut,
        }
    }

    /// Highest global id any tileset covers.
    pub fn max_gid(&self) -> u32 {
        (self.gid_lut.len() as u32).saturating_sub(1)
    }

    /// Resolves a stored id (flip flags allowed) to its tileset and the
    /// tileset-local index. `None` for id 0 and out-of-range ids.
    #[inline]
    pub fn tileset_for(&self, id: TileId) -> Option<(&Tileset, u32)> {
        let clean = id.clean() as usize;
        if clean >= self.gid_lut.len() {
            return None;
        }
        let idx = self.gid_lut[clean];
        if idx == u16::MAX {
            return None;
        }
        let ts = &self.tilesets[idx as usize];
        Some((ts, id.clean() - ts.first_gid))
    }

    /// Map size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        vec2(
            (self.width * self.tile_w) as f32,
            (self.height * self.tile_h) as f32,
        )
    }
}
