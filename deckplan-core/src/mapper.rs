//! # mapper: sections to an initial slide sequence
//!
//! Each parsed [`Section`] is dispatched on its [`SlideKind`]:
//!
//! - `TwoColumn`: list items are split into left/right columns. An item that
//!   contains a switch keyword ("vs", "or", ...) flips the active column for
//!   the items after it and is itself dropped. If that leaves the right column
//!   empty while the left holds more than four items, the left is halved.
//! - `Section`: a divider whose subtitle is the first paragraph. Dividers never
//!   receive bullets here.
//! - `Content`: sections with more list items than the configured maximum are
//!   pre-split into `(i/N)` slides; otherwise paragraphs become free text and
//!   list items plus subsections become bullets.
//!
//! The output is unvalidated. Capacity overflow beyond this coarse split is the
//! validator's job.

use tracing::{debug, info};

use crate::classify::{classify_title, SlideKind};
use crate::config::MapperConfig;
use crate::model::{
    BulletPoint, ContentItem, LayoutType, ParsedDocument, PresentationData, Section, SlideContent,
};

pub const COLUMN_SWITCH_WORDS: &[&str] = &["vs", "versus", "or", "alternative"];

/// Left-only columns longer than this are split in half.
const COLUMN_FALLBACK_THRESHOLD: usize = 4;

pub struct SlideMapper {
    config: MapperConfig,
}

impl SlideMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn map(&self, parsed: &ParsedDocument) -> PresentationData {
        let slides: Vec<SlideContent> = parsed
            .sections
            .iter()
            .flat_map(|section| self.map_section(section))
            .collect();
        info!(
            sections = parsed.sections.len(),
            slides = slides.len(),
            "Mapped sections to slides"
        );
        PresentationData {
            title: parsed.title.clone(),
            subtitle: parsed.subtitle.clone(),
            slides,
            template_id: None,
        }
    }

    pub fn map_section(&self, section: &Section) -> Vec<SlideContent> {
        let kind = classify_title(&section.title);
        debug!(title = %section.title, ?kind, "Classified section");
        match kind {
            SlideKind::TwoColumn => vec![two_column_slide(section)],
            SlideKind::Section => vec![divider_slide(section)],
            SlideKind::Content => self.content_slides(section),
        }
    }

    fn content_slides(&self, section: &Section) -> Vec<SlideContent> {
        let max = self.config.max_bullets_per_slide.max(1);
        let paragraphs = joined_paragraphs(&section.content);
        let bullets: Vec<BulletPoint> = section
            .content
            .iter()
            .filter(|c| !matches!(c, ContentItem::Paragraph(_)))
            .map(|c| BulletPoint::new(c.text()))
            .collect();

        if section.list_item_count() <= max {
            let mut slide = SlideContent::new(LayoutType::Content, "content", &section.title);
            slide.content = paragraphs;
            slide.bullets = bullets;
            return vec![slide];
        }

        let chunks: Vec<&[BulletPoint]> = bullets.chunks(max).collect();
        let total = chunks.len();
        debug!(title = %section.title, parts = total, "Pre-splitting long section");
        chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let title = if total > 1 {
                    format!("{} ({}/{})", section.title, i + 1, total)
                } else {
                    section.title.clone()
                };
                let mut slide = SlideContent::new(LayoutType::Content, "content", title);
                if i == 0 {
                    slide.content = paragraphs.clone();
                }
                slide.bullets = chunk.to_vec();
                slide
            })
            .collect()
    }
}

impl Default for SlideMapper {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}

fn joined_paragraphs(content: &[ContentItem]) -> Option<String> {
    let joined = content
        .iter()
        .filter_map(|c| match c {
            ContentItem::Paragraph(t) => Some(t.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn divider_slide(section: &Section) -> SlideContent {
    let mut slide = SlideContent::new(LayoutType::Section, "section", &section.title);
    slide.subtitle = section.content.iter().find_map(|c| match c {
        ContentItem::Paragraph(t) => Some(t.clone()),
        _ => None,
    });
    slide
}

/// Case-insensitive substring match. Ordinary words such as "work" or
/// "canvas" also flip the column.
pub fn is_column_switch(text: &str) -> bool {
    let text = text.to_lowercase();
    COLUMN_SWITCH_WORDS.iter().any(|w| text.contains(w))
}

pub fn split_columns(items: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut on_right = false;
    for item in items {
        if is_column_switch(item) {
            on_right = !on_right;
            continue;
        }
        if on_right {
            right.push(item.to_string());
        } else {
            left.push(item.to_string());
        }
    }
    if right.is_empty() && left.len() > COLUMN_FALLBACK_THRESHOLD {
        right = left.split_off(left.len() / 2);
    }
    (left, right)
}

fn two_column_slide(section: &Section) -> SlideContent {
    let items: Vec<&str> = section
        .content
        .iter()
        .filter(|c| c.is_list_item())
        .map(ContentItem::text)
        .collect();
    let (left, right) = split_columns(&items);
    let mut slide = SlideContent::new(LayoutType::TwoColumn, "two_column", &section.title);
    slide.content = joined_paragraphs(&section.content);
    slide.left_content = left;
    slide.right_content = right;
    slide
}
