//! Vector glyph sources keyed by icon name.
//!
//! Glyphs are 24x24 SVG documents drawn in [`COLOR_PLACEHOLDER`]; [`recolor`]
//! swaps the placeholder for a concrete colour before rasterisation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::CacheError;

pub const COLOR_PLACEHOLDER: &str = "currentColor";

const BUILTIN: &[(&str, &str)] = &[
    ("circle", r#"<circle cx="12" cy="12" r="9" fill="none" stroke="currentColor" stroke-width="2"/>"#),
    ("users", r#"<circle cx="9" cy="8" r="3.5" fill="currentColor"/><circle cx="17" cy="9" r="2.5" fill="currentColor"/><path d="M2 20c0-4 3-6 7-6s7 2 7 6z" fill="currentColor"/><path d="M16 14c3 0 6 2 6 5h-4" fill="currentColor"/>"#),
    ("calendar", r#"<rect x="3" y="5" width="18" height="16" rx="2" fill="none" stroke="currentColor" stroke-width="2"/><path d="M3 10h18M8 3v4M16 3v4" stroke="currentColor" stroke-width="2"/>"#),
    ("target", r#"<circle cx="12" cy="12" r="9" fill="none" stroke="currentColor" stroke-width="2"/><circle cx="12" cy="12" r="5" fill="none" stroke="currentColor" stroke-width="2"/><circle cx="12" cy="12" r="1.5" fill="currentColor"/>"#),
    ("chart", r#"<path d="M4 20V10M10 20V4M16 20v-7M22 20H2" stroke="currentColor" stroke-width="2" fill="none"/>"#),
    ("check", r#"<path d="M4 12l5 5L20 6" stroke="currentColor" stroke-width="2.5" fill="none"/>"#),
    ("lightbulb", r#"<path d="M12 2a7 7 0 0 0-4 12.7V18h8v-3.3A7 7 0 0 0 12 2z" fill="currentColor"/><rect x="9" y="19" width="6" height="3" fill="currentColor"/>"#),
    ("shield", r#"<path d="M12 2l8 3v6c0 5-3.5 9.5-8 11-4.5-1.5-8-6-8-11V5z" fill="currentColor"/>"#),
    ("rocket", r#"<path d="M12 2c4 3 6 7 6 12l-3 3H9l-3-3c0-5 2-9 6-12z" fill="currentColor"/><path d="M9 19l-2 3M15 19l2 3" stroke="currentColor" stroke-width="2"/>"#),
    ("gear", r#"<circle cx="12" cy="12" r="3.5" fill="none" stroke="currentColor" stroke-width="2"/><path d="M12 2v4M12 18v4M2 12h4M18 12h4M4.9 4.9l2.8 2.8M16.3 16.3l2.8 2.8M4.9 19.1l2.8-2.8M16.3 7.7l2.8-2.8" stroke="currentColor" stroke-width="2"/>"#),
    ("globe", r#"<circle cx="12" cy="12" r="9" fill="none" stroke="currentColor" stroke-width="2"/><path d="M3 12h18M12 3c3 3 3 15 0 18M12 3c-3 3-3 15 0 18" stroke="currentColor" stroke-width="1.5" fill="none"/>"#),
    ("document", r#"<path d="M6 2h8l5 5v15H6z" fill="none" stroke="currentColor" stroke-width="2"/><path d="M9 12h7M9 16h7" stroke="currentColor" stroke-width="2"/>"#),
    ("money", r#"<rect x="2" y="6" width="20" height="12" rx="2" fill="none" stroke="currentColor" stroke-width="2"/><circle cx="12" cy="12" r="3" fill="currentColor"/>"#),
    ("building", r#"<rect x="5" y="3" width="14" height="18" fill="none" stroke="currentColor" stroke-width="2"/><path d="M9 7h2M13 7h2M9 11h2M13 11h2M10 21v-4h4v4" stroke="currentColor" stroke-width="2"/>"#),
    ("warning", r#"<path d="M12 3L2 21h20z" fill="none" stroke="currentColor" stroke-width="2"/><path d="M12 10v5M12 17v2" stroke="currentColor" stroke-width="2"/>"#),
    ("handshake", r#"<path d="M2 12l5-5 5 3 5-3 5 5-7 7-3-2-3 2z" fill="currentColor"/>"#),
    ("clock", r#"<circle cx="12" cy="12" r="9" fill="none" stroke="currentColor" stroke-width="2"/><path d="M12 7v5l3 3" stroke="currentColor" stroke-width="2" fill="none"/>"#),
    ("star", r#"<path d="M12 2l3 7h7l-5.5 4.5 2 7.5L12 16.5 5.5 21l2-7.5L2 9h7z" fill="currentColor"/>"#),
];

fn wrap(body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">{body}</svg>"#
    )
}

/// Replaces every colour placeholder in `source` with `color`.
pub fn recolor(source: &str, color: &str) -> String {
    source.replace(COLOR_PLACEHOLDER, color)
}

#[derive(Debug, Clone, Default)]
pub struct IconLibrary {
    glyphs: HashMap<String, String>,
}

impl IconLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let glyphs = BUILTIN
            .iter()
            .map(|(name, body)| (name.to_string(), wrap(body)))
            .collect();
        Self { glyphs }
    }

    /// Layers every `<name>.svg` in `dir` over the current glyphs.
    pub fn with_dir(mut self, dir: &Path) -> Result<Self, CacheError> {
        let io = |source| CacheError::Io {
            path: dir.to_path_buf(),
            source,
        };
        for entry in fs::read_dir(dir).map_err(io)? {
            let path = entry.map_err(io)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("svg") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(svg) => {
                    debug!(icon = name, path = %path.display(), "Loaded glyph");
                    self.glyphs.insert(name.to_string(), svg);
                }
                Err(e) => warn!(error = ?e, path = %path.display(), "Skipping unreadable glyph"),
            }
        }
        info!(dir = %dir.display(), glyphs = self.glyphs.len(), "Icon library loaded");
        Ok(self)
    }

    pub fn insert(&mut self, name: impl Into<String>, svg: impl Into<String>) {
        self.glyphs.insert(name.into(), svg.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.glyphs.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
