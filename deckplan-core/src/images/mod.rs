//! # images: disk-backed illustration cache with retrying generation
//!
//! [`ImageCache::get_or_generate`] fingerprints a slide (title plus a content
//! prefix) and serves `<fingerprint>.png` from the cache directory when it is
//! younger than the TTL. Stale files are deleted and treated as misses. On a
//! miss a prompt is built from the title and the [`ImageGenerator`] is driven
//! through the configured [`RetryPolicy`](crate::retry::RetryPolicy). Before a
//! new image is written the directory is trimmed, oldest first, to 80% of the
//! size budget whenever the budget would be exceeded.
//!
//! File modification time is the only TTL signal; there is no index file.
//! Opening the cache sweeps expired files. Generation failures degrade to
//! `None`. [`ImageStore`] is the directory half on its own, usable without a
//! generator.

pub mod client;
pub mod prompt;

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info, warn};

use crate::config::ImageCacheConfig;
use crate::contract::ImageGenerator;
use crate::error::CacheError;
use crate::retry::retry;

pub use client::OpenAiImageClient;
pub use prompt::build_prompt;

const EXTENSION: &str = "png";
const EVICTION_TARGET: f64 = 0.8;

/// Hex SHA-256 over the title and the first `prefix_chars` characters of content.
pub fn fingerprint(title: &str, content: &str, prefix_chars: usize) -> String {
    let prefix: String = content.chars().take(prefix_chars).collect();
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(prefix.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct CachedFile {
    pub path: PathBuf,
    pub len: u64,
    pub modified: SystemTime,
}

fn age(modified: SystemTime) -> Duration {
    SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO)
}

/// The on-disk half of the cache: files, TTL and size budget.
pub struct ImageStore {
    config: ImageCacheConfig,
    swept_at_open: usize,
    /// Serialises directory bookkeeping: staleness deletes, eviction, writes.
    io_lock: Mutex<()>,
}

impl ImageStore {
    /// Creates the cache directory if needed and sweeps expired entries.
    pub fn open(config: ImageCacheConfig) -> Result<Self, CacheError> {
        fs::create_dir_all(&config.dir).map_err(|source| CacheError::Io {
            path: config.dir.clone(),
            source,
        })?;
        let mut store = Self {
            config,
            swept_at_open: 0,
            io_lock: Mutex::new(()),
        };
        let removed = store.sweep_expired();
        store.swept_at_open = removed;
        info!(
            dir = %store.config.dir.display(),
            removed,
            usage_bytes = store.usage_bytes(),
            "Opened image cache"
        );
        Ok(store)
    }

    pub fn config(&self) -> &ImageCacheConfig {
        &self.config
    }

    /// Expired files removed when the store was opened.
    pub fn swept_at_open(&self) -> usize {
        self.swept_at_open
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    pub fn key_for(&self, title: &str, content: &str) -> String {
        fingerprint(title, content, self.config.content_prefix_chars)
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.config.dir.join(format!("{key}.{EXTENSION}"))
    }

    /// All cache files, oldest first.
    pub fn entries(&self) -> Vec<CachedFile> {
        let Ok(read_dir) = fs::read_dir(&self.config.dir) else {
            return Vec::new();
        };
        let mut files: Vec<CachedFile> = read_dir
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(EXTENSION))
            .filter_map(|path| {
                let meta = fs::metadata(&path).ok()?;
                Some(CachedFile {
                    len: meta.len(),
                    modified: meta.modified().ok()?,
                    path,
                })
            })
            .collect();
        files.sort_by_key(|f| f.modified);
        files
    }

    pub fn usage_bytes(&self) -> u64 {
        self.entries().iter().map(|f| f.len).sum()
    }

    /// Deletes every file older than the TTL; returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let _guard = self.io_lock.lock();
        let ttl = self.config.ttl();
        let mut removed = 0;
        for file in self.entries() {
            if age(file.modified) > ttl {
                match fs::remove_file(&file.path) {
                    Ok(()) => removed += 1,
                    Err(e) => {
                        warn!(error = ?e, path = %file.path.display(), "Failed to remove expired image")
                    }
                }
            }
        }
        if removed > 0 {
            info!(removed, "Swept expired images");
        }
        removed
    }

    /// Reads a fresh cache entry; deletes it if stale.
    pub fn cached(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        let _guard = self.io_lock.lock();
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        if age(modified) > self.config.ttl() {
            debug!(key, "Cached image expired");
            if let Err(e) = fs::remove_file(&path) {
                warn!(error = ?e, path = %path.display(), "Failed to remove stale image");
            }
            return None;
        }
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(key, bytes = bytes.len(), "Image cache hit");
                Some(bytes)
            }
            Err(e) => {
                warn!(error = ?e, path = %path.display(), "Failed to read cached image");
                None
            }
        }
    }

    /// Evicts oldest files until usage plus `incoming` fits in 80% of the
    /// budget, but only when the budget would otherwise be exceeded.
    /// Caller must hold `io_lock`.
    fn enforce_size_budget(&self, incoming: u64) -> usize {
        let files = self.entries();
        let mut usage: u64 = files.iter().map(|f| f.len).sum::<u64>() + incoming;
        if usage <= self.config.max_size_bytes {
            return 0;
        }
        let target = (self.config.max_size_bytes as f64 * EVICTION_TARGET) as u64;
        let mut evicted = 0;
        for file in files {
            if usage <= target {
                break;
            }
            match fs::remove_file(&file.path) {
                Ok(()) => {
                    usage = usage.saturating_sub(file.len);
                    evicted += 1;
                    debug!(path = %file.path.display(), bytes = file.len, "Evicted cached image");
                }
                Err(e) => {
                    warn!(error = ?e, path = %file.path.display(), "Failed to evict cached image")
                }
            }
        }
        info!(evicted, usage_bytes = usage, "Enforced image cache size budget");
        evicted
    }

    /// Writes `bytes` under `key` after making room for them.
    pub fn store(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        let _guard = self.io_lock.lock();
        self.enforce_size_budget(bytes.len() as u64);
        let path = self.path_for(key);
        let io = |source| CacheError::Io {
            path: path.clone(),
            source,
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&self.config.dir).map_err(io)?;
        tmp.write_all(bytes).map_err(io)?;
        tmp.persist(&path).map_err(|e| io(e.error))?;
        debug!(key, bytes = bytes.len(), "Stored image");
        Ok(())
    }
}

pub struct ImageCache<G: ImageGenerator> {
    disk: ImageStore,
    generator: G,
}

impl<G: ImageGenerator> ImageCache<G> {
    pub fn open(config: ImageCacheConfig, generator: G) -> Result<Self, CacheError> {
        Ok(Self {
            disk: ImageStore::open(config)?,
            generator,
        })
    }

    pub fn disk(&self) -> &ImageStore {
        &self.disk
    }

    /// Cached or freshly generated illustration for a slide; `None` when
    /// generation is exhausted or fails outright.
    pub async fn get_or_generate(&self, title: &str, content: &str) -> Option<Vec<u8>> {
        let key = self.disk.key_for(title, content);
        if let Some(bytes) = self.disk.cached(&key) {
            return Some(bytes);
        }

        let prompt = build_prompt(title);
        info!(title, key = %key, "Image cache miss, generating");
        let generated = retry(&self.disk.config.retry, |attempt| {
            debug!(attempt, "Image generation attempt");
            self.generator.generate(&prompt)
        })
        .await;

        let bytes = match generated {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(title, error = %e, "Image generation failed, continuing without image");
                return None;
            }
        };
        if let Err(e) = self.disk.store(&key, &bytes) {
            warn!(error = %e, "Failed to persist generated image");
        }
        Some(bytes)
    }
}
