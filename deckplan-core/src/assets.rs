//! Per-slide asset lookup for a validated presentation.
//!
//! Each slide gets an icon name (its own, or one chosen from its text), the
//! rendered icon, and an illustration. Illustrations for all slides are
//! requested concurrently; section dividers get none.

use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

use crate::contract::{ImageGenerator, Rasterizer};
use crate::icons::{auto_select_icon, IconCache};
use crate::images::ImageCache;
use crate::model::{PresentationData, SlideContent};

#[derive(Debug, Clone)]
pub struct SlideAssets {
    pub icon_name: String,
    pub icon_png: Option<Arc<Vec<u8>>>,
    pub image: Option<Vec<u8>>,
}

/// Text used for icon selection and the image fingerprint.
pub fn slide_text(slide: &SlideContent) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(c) = slide.content.as_deref() {
        parts.push(c);
    }
    parts.extend(slide.bullets.iter().map(|b| b.text.as_str()));
    parts.extend(slide.left_content.iter().map(String::as_str));
    parts.extend(slide.right_content.iter().map(String::as_str));
    parts.join(" ")
}

pub struct AssetPlanner<'a, R: Rasterizer, G: ImageGenerator> {
    pub icons: &'a IconCache<R>,
    pub images: &'a ImageCache<G>,
    pub icon_size: u32,
    pub icon_color: String,
}

impl<'a, R: Rasterizer, G: ImageGenerator> AssetPlanner<'a, R, G> {
    pub fn new(icons: &'a IconCache<R>, images: &'a ImageCache<G>) -> Self {
        Self {
            icons,
            images,
            icon_size: 64,
            icon_color: "#1F4E79".to_string(),
        }
    }

    pub async fn plan(&self, presentation: &PresentationData) -> Vec<SlideAssets> {
        let texts: Vec<String> = presentation.slides.iter().map(slide_text).collect();

        let lookups = presentation
            .slides
            .iter()
            .zip(&texts)
            .map(|(slide, text)| async move {
                if slide.is_section_divider() {
                    None
                } else {
                    self.images.get_or_generate(&slide.title, text).await
                }
            });
        let images = join_all(lookups).await;

        let assets: Vec<SlideAssets> = presentation
            .slides
            .iter()
            .zip(&texts)
            .zip(images)
            .map(|((slide, text), image)| {
                let icon_name = slide
                    .icon_name
                    .clone()
                    .unwrap_or_else(|| auto_select_icon(&slide.title, text).to_string());
                let icon_png = self.icons.render(&icon_name, self.icon_size, &self.icon_color);
                SlideAssets {
                    icon_name,
                    icon_png,
                    image,
                }
            })
            .collect();

        info!(
            slides = assets.len(),
            images = assets.iter().filter(|a| a.image.is_some()).count(),
            "Planned slide assets"
        );
        assets
    }
}
