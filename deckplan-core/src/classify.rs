//! Title-keyword slide classification.
//!
//! Rules are evaluated top to bottom and the first match wins. Matching is a
//! case-insensitive substring test, so misclassification is possible and the
//! downstream validator is expected to absorb it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Section,
    TwoColumn,
    Content,
}

impl SlideKind {
    pub fn layout_hint(self) -> &'static str {
        match self {
            SlideKind::Section => "section",
            SlideKind::TwoColumn => "two_column",
            SlideKind::Content => "content",
        }
    }
}

pub const DIVIDER_KEYWORDS: &[&str] = &[
    "introduction",
    "overview",
    "agenda",
    "summary",
    "conclusion",
    "next steps",
    "thank you",
];

pub const COMPARISON_KEYWORDS: &[&str] = &[
    "vs",
    "versus",
    "comparison",
    "before/after",
    "pros/cons",
    "advantages/disadvantages",
];

pub const LAYOUT_RULES: &[(&[&str], SlideKind)] = &[
    (DIVIDER_KEYWORDS, SlideKind::Section),
    (COMPARISON_KEYWORDS, SlideKind::TwoColumn),
];

pub fn classify_title(title: &str) -> SlideKind {
    let lower = title.to_lowercase();
    LAYOUT_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, kind)| *kind)
        .unwrap_or(SlideKind::Content)
}
