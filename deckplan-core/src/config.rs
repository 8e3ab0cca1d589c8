//! Pipeline and asset-cache settings, loaded from YAML by the CLI.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::retry::RetryPolicy;

/// Every tunable of the pipeline and the asset caches. Each field has a
/// serde default, so a partial YAML document (or none at all) is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub mapper: MapperConfig,
    pub capacity: CapacityConfig,
    pub icons: IconCacheConfig,
    pub images: ImageCacheConfig,
}

impl DeckConfig {
    pub fn trace_loaded(&self) {
        info!(
            max_bullets = self.capacity.max_bullets,
            table_max_rows = self.capacity.table_max_rows,
            icon_capacity = self.icons.capacity,
            image_dir = %self.images.dir.display(),
            "Loaded DeckConfig"
        );
        debug!(?self, "DeckConfig loaded (full debug)");
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Sections with more list items than this are pre-split by the mapper.
    pub max_bullets_per_slide: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_bullets_per_slide: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub max_bullets: usize,
    pub agenda_max_bullets: usize,
    /// Grid layouts need exactly this many bullets.
    pub grid_bullets: usize,
    /// Sub-bullets beyond this count do not add rendered height.
    pub max_sub_bullets: usize,
    /// Height budget in inches.
    pub max_content_height: f64,
    pub max_chars: usize,
    pub table_max_rows: usize,
    /// Divider titles containing one of these are closing slides.
    pub closing_keywords: Vec<String>,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            max_bullets: 4,
            agenda_max_bullets: 5,
            grid_bullets: 4,
            max_sub_bullets: 2,
            max_content_height: 4.5,
            max_chars: 800,
            table_max_rows: 6,
            closing_keywords: ["thank", "grazie", "danke", "merci", "gracias"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconCacheConfig {
    pub capacity: usize,
    /// Rasterise at this multiple of the requested size.
    pub supersample: u32,
    pub fallback_icon: String,
    /// Extra `*.svg` glyphs layered over the built-in set.
    pub glyph_dir: Option<PathBuf>,
}

impl Default for IconCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            supersample: 4,
            fallback_icon: "circle".to_string(),
            glyph_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageCacheConfig {
    pub dir: PathBuf,
    pub max_size_bytes: u64,
    pub ttl_secs: u64,
    /// Characters of slide content that feed the fingerprint.
    pub content_prefix_chars: usize,
    pub retry: RetryPolicy,
}

impl ImageCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".deckplan/images"),
            max_size_bytes: 500 * 1024 * 1024,
            ttl_secs: 7 * 24 * 60 * 60,
            content_prefix_chars: 200,
            retry: RetryPolicy::default(),
        }
    }
}
