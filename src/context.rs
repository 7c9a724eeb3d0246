use crate::map::cache::MapCache;
use crate::map::loader::TiledJsonLoader;

/// Window defaults; the frame-timing/window collaborator consumes these.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub width: i32,
    pub height: i32,
}

impl Config {
    pub const DEFAULT_WIDTH: i32 = 1280;
    pub const DEFAULT_HEIGHT: i32 = 720;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

/// Shared services handed to every state update: the map cache and the
/// run configuration. Frame time, screen size and key state come from
/// Macroquad directly.
pub struct Context {
    pub maps: MapCache<TiledJsonLoader>,
    pub config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self {
            maps: MapCache::new(TiledJsonLoader),
            config,
        }
    }
}
