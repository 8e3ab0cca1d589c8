//! # icons: glyph rendering behind a count-bounded LRU cache
//!
//! [`IconCache::render`] maps `(name, size, color)` to PNG bytes. A miss
//! resolves the glyph by exact name, falls back to the configured default
//! glyph, recolours it, and rasterises at `supersample` times the requested
//! size. Before inserting into a full cache the least recently used entry is
//! evicted. An icon that cannot be produced is `None`, never an error.
//!
//! Cache bookkeeping sits behind a mutex so the cache can be shared between
//! concurrent renderers without lost updates to the access order.

pub mod library;
pub mod raster;
pub mod select;

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::IconCacheConfig;
use crate::contract::Rasterizer;
use crate::error::CacheError;

pub use library::{recolor, IconLibrary, COLOR_PLACEHOLDER};
pub use raster::ResvgRasterizer;
pub use select::{auto_select_icon, DEFAULT_ICON};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconKey {
    pub name: String,
    pub size: u32,
    pub color: String,
}

impl IconKey {
    pub fn new(name: &str, size: u32, color: &str) -> Self {
        Self {
            name: name.to_string(),
            size,
            color: color.to_string(),
        }
    }
}

#[derive(Default)]
struct LruState {
    entries: HashMap<IconKey, Arc<Vec<u8>>>,
    /// Least recently used at the front.
    order: VecDeque<IconKey>,
}

impl LruState {
    fn touch(&mut self, key: &IconKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

pub struct IconCache<R: Rasterizer = ResvgRasterizer> {
    config: IconCacheConfig,
    library: IconLibrary,
    rasterizer: R,
    state: Mutex<LruState>,
}

impl IconCache<ResvgRasterizer> {
    /// Built-in glyphs plus any configured glyph directory, rendered by resvg.
    pub fn open(config: IconCacheConfig) -> Result<Self, CacheError> {
        let mut library = IconLibrary::builtin();
        if let Some(dir) = &config.glyph_dir {
            library = library.with_dir(dir)?;
        }
        Ok(Self::new(config, library, ResvgRasterizer))
    }
}

impl<R: Rasterizer> IconCache<R> {
    pub fn new(config: IconCacheConfig, library: IconLibrary, rasterizer: R) -> Self {
        Self {
            config,
            library,
            rasterizer,
            state: Mutex::new(LruState::default()),
        }
    }

    pub fn library(&self) -> &IconLibrary {
        &self.library
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str, size: u32, color: &str) -> bool {
        self.state
            .lock()
            .entries
            .contains_key(&IconKey::new(name, size, color))
    }

    /// Keys from least to most recently used.
    pub fn access_order(&self) -> Vec<IconKey> {
        self.state.lock().order.iter().cloned().collect()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
    }

    fn resolve_glyph(&self, name: &str) -> Option<&str> {
        if let Some(svg) = self.library.get(name) {
            return Some(svg);
        }
        debug!(icon = name, fallback = %self.config.fallback_icon, "Icon not found, using fallback");
        self.library.get(&self.config.fallback_icon)
    }

    /// PNG bytes for the icon, or `None` if neither the icon nor the fallback
    /// glyph can be produced.
    pub fn render(&self, name: &str, size: u32, color: &str) -> Option<Arc<Vec<u8>>> {
        let key = IconKey::new(name, size, color);
        {
            let mut state = self.state.lock();
            if let Some(bytes) = state.entries.get(&key).cloned() {
                state.touch(&key);
                debug!(icon = name, size, color, "Icon cache hit");
                return Some(bytes);
            }
        }

        let Some(glyph) = self.resolve_glyph(name) else {
            warn!(icon = name, "No glyph and no fallback glyph available");
            return None;
        };
        let svg = recolor(glyph, color);
        let pixels = size.saturating_mul(self.config.supersample.max(1));
        let bytes = match self.rasterizer.rasterize(&svg, pixels) {
            Ok(bytes) => Arc::new(bytes),
            Err(e) => {
                warn!(icon = name, error = %e, "Icon rasterisation failed");
                return None;
            }
        };

        let mut state = self.state.lock();
        if state.entries.contains_key(&key) {
            // Another caller rendered the same key meanwhile.
            state.touch(&key);
            return state.entries.get(&key).cloned();
        }
        if self.config.capacity == 0 {
            return Some(bytes);
        }
        if state.entries.len() >= self.config.capacity {
            if let Some(lru) = state.order.pop_front() {
                debug!(evicted = %lru.name, size = lru.size, "Evicting least recently used icon");
                state.entries.remove(&lru);
            }
        }
        state.entries.insert(key.clone(), Arc::clone(&bytes));
        state.order.push_back(key);
        debug!(icon = name, size, color, "Icon cached");
        Some(bytes)
    }
}
