//! Structured proposal input, as produced by an upstream language model.
//!
//! ```json
//! {"title": "...", "sections": [{"heading": "...", "content": "...",
//!   "points": ["..."], "table": {"headers": [...], "rows": [[...]]}}]}
//! ```
//!
//! `layout` and `chart` are optional per-section extensions.

use serde::Deserialize;
use tracing::info;

use crate::classify::{classify_title, SlideKind};
use crate::error::ProposalError;
use crate::model::{BulletPoint, ChartData, LayoutType, PresentationData, SlideContent, TableData};

#[derive(Debug, Clone, Deserialize)]
pub struct Proposal {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub sections: Vec<ProposalSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalSection {
    pub heading: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub table: Option<ProposalTable>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub chart: Option<ChartData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalTable {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Proposal {
    pub fn from_json(text: &str) -> Result<Self, ProposalError> {
        Ok(serde_json::from_str(text)?)
    }
}

fn layout_type_for(hint: &str, section: &ProposalSection) -> LayoutType {
    let hint = hint.to_lowercase();
    if section.table.is_some() {
        LayoutType::Table
    } else if section.chart.is_some() {
        LayoutType::Chart
    } else if hint.contains("section") {
        LayoutType::Section
    } else if hint.contains("two_column") || hint.contains("comparison") {
        LayoutType::TwoColumn
    } else {
        LayoutType::Content
    }
}

fn map_section(section: &ProposalSection) -> SlideContent {
    let hint = match (&section.layout, &section.table, &section.chart) {
        (Some(layout), _, _) => layout.clone(),
        (None, Some(_), _) => "table".to_string(),
        (None, None, Some(_)) => "chart".to_string(),
        (None, None, None) => match classify_title(&section.heading) {
            // Comparison headings keep their points as bullets here.
            SlideKind::TwoColumn => SlideKind::Content.layout_hint().to_string(),
            kind => kind.layout_hint().to_string(),
        },
    };
    let mut slide = SlideContent::new(layout_type_for(&hint, section), &hint, &section.heading);
    slide.content = section
        .content
        .as_ref()
        .filter(|c| !c.trim().is_empty())
        .cloned();
    slide.bullets = section
        .points
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| BulletPoint::new(p.trim()))
        .collect();
    slide.table_data = section.table.as_ref().map(|t| TableData {
        headers: t.headers.clone(),
        rows: t.rows.clone(),
        has_header: !t.headers.is_empty(),
    });
    slide.chart_data = section.chart.clone();
    slide
}

/// One slide per proposal section, in order. Unvalidated.
pub fn map_proposal(proposal: &Proposal) -> PresentationData {
    let slides: Vec<SlideContent> = proposal.sections.iter().map(map_section).collect();
    info!(title = %proposal.title, slides = slides.len(), "Mapped proposal to slides");
    PresentationData {
        title: proposal.title.clone(),
        subtitle: proposal.subtitle.clone(),
        slides,
        template_id: None,
    }
}
