use std::path::PathBuf;
use std::{error, fmt, io};

/// Error produced while loading a map document.
#[derive(Debug)]
pub enum MapError {
    /// Reading the map file or one of its external tilesets failed.
    Io { path: PathBuf, source: io::Error },
    /// The map file or one of its external tilesets is not valid JSON.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The map is structurally broken in a way serde cannot catch.
    InvalidMap(String),
    /// A tile layer's data length does not match the map grid.
    InvalidLayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },
    /// A tile layer stores a gid no tileset covers.
    InvalidTileGid { layer: String, gid: u32, max_gid: u32 },
    /// A tile object references a gid no tileset covers.
    InvalidObjectGid {
        layer: String,
        object_id: u32,
        gid: u32,
        max_gid: u32,
    },
    /// The map path has a non-JSON extension.
    UnsupportedFormat(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "reading {}: {}", path.display(), source)
            }
            MapError::Json { path, source } => {
                write!(f, "parsing {}: {}", path.display(), source)
            }
            MapError::InvalidMap(msg) => write!(f, "invalid map: {msg}"),
            MapError::InvalidLayerSize {
                layer,
                expected,
                actual,
            } => write!(
                f,
                "layer '{layer}' has {actual} tiles, map grid needs {expected}"
            ),
            MapError::InvalidTileGid { layer, gid, max_gid } => write!(
                f,
                "layer '{layer}' references gid {gid}, highest known gid is {max_gid}"
            ),
            MapError::InvalidObjectGid {
                layer,
                object_id,
                gid,
                max_gid,
            } => write!(
                f,
                "object {object_id} in layer '{layer}' references gid {gid}, highest known gid is {max_gid}"
            ),
            MapError::UnsupportedFormat(path) => {
                write!(f, "unsupported map format: {path}")
            }
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
