//! # model: slide plan data types
//!
//! Plain data shared by every stage of the pipeline. The parser produces
//! [`Section`]s, the mapper turns them into [`SlideContent`]s collected in a
//! [`PresentationData`], and the validator rewrites that slide list in place.
//!
//! Optional slide parts (bullets, table, chart, columns) are modelled as
//! `Option`/empty collections so that "missing" is always a typed absence.
//! The helper predicates on [`SlideContent`] are the single place where the
//! pipeline asks "does this slide say anything?".

use serde::{Deserialize, Serialize};

/// One typed line of content inside a parsed section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ContentItem {
    Bullet(String),
    Numbered(String),
    Paragraph(String),
    Subsection(String),
}

impl ContentItem {
    pub fn text(&self) -> &str {
        match self {
            ContentItem::Bullet(t)
            | ContentItem::Numbered(t)
            | ContentItem::Paragraph(t)
            | ContentItem::Subsection(t) => t,
        }
    }

    /// Bullet or numbered item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, ContentItem::Bullet(_) | ContentItem::Numbered(_))
    }
}

/// A titled span of markdown content. Zero-content sections are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: Vec<ContentItem>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
        }
    }

    pub fn list_item_count(&self) -> usize {
        self.content.iter().filter(|c| c.is_list_item()).count()
    }
}

/// Result of structural parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletPoint {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_bullets: Vec<String>,
}

impl BulletPoint {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sub_bullets: Vec::new(),
        }
    }

    pub fn with_subs(text: impl Into<String>, subs: Vec<String>) -> Self {
        Self {
            text: text.into(),
            sub_bullets: subs,
        }
    }

    /// Grid padding cell.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Characters in the bullet text plus all of its sub-bullets.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
            + self
                .sub_bullets
                .iter()
                .map(|s| s.chars().count())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default = "default_true")]
    pub has_header: bool,
}

fn default_true() -> bool {
    true
}

impl TableData {
    /// A table is worth rendering if it has any header or body cell.
    pub fn is_valid(&self) -> bool {
        !self.headers.is_empty() || self.rows.iter().any(|r| !r.is_empty())
    }

    /// Pads or truncates every row to the header width. Headerless tables get
    /// blank headers sized to their widest row.
    pub fn normalize(&mut self) {
        if self.headers.is_empty() {
            let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
            self.headers = vec![String::new(); width];
            self.has_header = false;
        }
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Pie,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    /// A chart with no positive value anywhere is treated as absent.
    pub fn is_valid(&self) -> bool {
        self.values
            .iter()
            .chain(self.series.iter().flat_map(|s| s.values.iter()))
            .any(|v| *v > 0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    Title,
    #[default]
    Content,
    Section,
    TwoColumn,
    Chart,
    Table,
    Image,
}

/// The unit handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    pub layout_type: LayoutType,
    #[serde(default)]
    pub layout_hint: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<BulletPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub left_content: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right_content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
}

impl SlideContent {
    pub fn new(layout_type: LayoutType, layout_hint: &str, title: impl Into<String>) -> Self {
        Self {
            layout_type,
            layout_hint: layout_hint.to_string(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn is_section_divider(&self) -> bool {
        self.layout_type == LayoutType::Section
            || self.layout_hint.to_lowercase().contains("section")
    }

    pub fn has_bullets(&self) -> bool {
        !self.bullets.is_empty()
    }

    pub fn has_text(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    pub fn has_columns(&self) -> bool {
        self.left_content
            .iter()
            .chain(self.right_content.iter())
            .any(|c| !c.trim().is_empty())
    }

    pub fn valid_table(&self) -> Option<&TableData> {
        self.table_data.as_ref().filter(|t| t.is_valid())
    }

    pub fn valid_chart(&self) -> Option<&ChartData> {
        self.chart_data.as_ref().filter(|c| c.is_valid())
    }

    /// Whether the slide would render anything beyond its title.
    pub fn has_content(&self) -> bool {
        self.has_bullets()
            || self.has_text()
            || self.has_columns()
            || self.valid_table().is_some()
            || self.valid_chart().is_some()
    }
}

/// Root aggregate owned by the caller of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub slides: Vec<SlideContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}
