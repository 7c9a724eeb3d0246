use crate::error::MapError;
use crate::map::document::MapDocument;
use std::collections::HashMap;
use std::rc::Rc;

/// Loads a map document from a path. Injected into [`MapCache`] so the
/// cache never reaches for process-wide loader state, and so tests can
/// swap in a loader that touches neither disk nor GPU.
pub trait MapLoader {
    async fn load(&self, path: &str) -> Result<MapDocument, MapError>;
}

/// Path-keyed map store: each path is loaded once and every `get` for it
/// returns the same document. Entries are never evicted; the documents
/// (and the textures inside them) live until the cache and every state
/// still holding an `Rc` have dropped them.
pub struct MapCache<L> {
    loader: L,
    maps: HashMap<String, Rc<MapDocument>>,
}

impl<L: MapLoader> MapCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            maps: HashMap::new(),
        }
    }

    /// The document for `path`, loading it on first request. Subsequent
    /// calls with the same path return the identical instance
    /// (`Rc::ptr_eq`), never a reload.
    pub async fn get(&mut self, path: &str) -> Result<Rc<MapDocument>, MapError> {
        if let Some(doc) = self.maps.get(path) {
            return Ok(Rc::clone(doc));
        }
        let doc = Rc::new(self.loader.load(path).await?);
        self.maps.insert(path.to_owned(), Rc::clone(&doc));
        Ok(doc)
    }

    /// Number of distinct maps loaded so far.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
