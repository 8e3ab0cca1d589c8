//! # validate: capacity enforcement and overflow splitting
//!
//! The authoritative second pass over a slide sequence. It walks the slides
//! with an explicit index because a section divider's fate depends on the
//! slide after it. For every slide, in order:
//!
//! 1. Dividers lose any bullets. Closing dividers ("Thank you") are always
//!    kept. Any other divider needs a next slide that survives: either a
//!    kept divider or a non-divider with something to show. Divider runs are
//!    resolved from the back so a dropped divider never leaves an earlier
//!    one stranded.
//! 2. Non-divider slides with no content signal are dropped.
//! 3. Tables longer than the row budget are cut into row chunks, each its own
//!    table slide with the header repeated.
//! 4. Bullet lists that break the layout's count rule, the height estimate, or
//!    the character budget are split: grid layouts into padded groups of
//!    exactly four, agenda layouts into groups of five, everything else by a
//!    single greedy forward pass.
//! 5. Anything else is kept unchanged.
//!
//! Running the validator on its own output changes nothing.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CapacityConfig;
use crate::model::{BulletPoint, LayoutType, SlideContent, TableData};

pub const CONTINUED: &str = "Continued";

const BASE_HEIGHT: f64 = 0.15;
const LINE_HEIGHT: f64 = 0.3;
const LINE_CHARS: usize = 80;
const SUB_LINE_HEIGHT: f64 = 0.25;
const SUB_LINE_CHARS: usize = 70;
const SPACING_WITH_SUBS: f64 = 0.15;
const SPACING: f64 = 0.10;

const MIN_CHART_SLIDES: usize = 3;
const MIN_GRID_SLIDES: usize = 2;

/// Capacity archetype derived from the layout hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Grid,
    Agenda,
    Default,
}

impl Archetype {
    pub fn of(slide: &SlideContent) -> Self {
        let hint = slide.layout_hint.to_lowercase();
        if ["four", "grid", "box"].iter().any(|k| hint.contains(k)) {
            Archetype::Grid
        } else if hint.contains("agenda") {
            Archetype::Agenda
        } else {
            Archetype::Default
        }
    }
}

/// Aggregate statistics and advisory warnings from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub input_slides: usize,
    pub output_slides: usize,
    pub stripped_divider_bullets: usize,
    pub dropped_orphan_dividers: usize,
    pub dropped_blank: usize,
    pub invalid_charts_cleared: usize,
    pub tables_split: usize,
    pub slides_split: usize,
    pub total_bullets: usize,
    pub chart_slides: usize,
    pub grid_slides: usize,
    pub agenda_slides: usize,
    pub table_slides: usize,
    pub warnings: Vec<String>,
}

/// Estimated rendered height in inches of a bullet list.
pub fn estimate_height(bullets: &[BulletPoint], max_sub_bullets: usize) -> f64 {
    BASE_HEIGHT
        + bullets
            .iter()
            .map(|b| {
                let own = LINE_HEIGHT * (b.text.chars().count() / LINE_CHARS).max(1) as f64;
                let subs: f64 = b
                    .sub_bullets
                    .iter()
                    .take(max_sub_bullets)
                    .map(|s| SUB_LINE_HEIGHT * (s.chars().count() / SUB_LINE_CHARS).max(1) as f64)
                    .sum();
                let spacing = if b.sub_bullets.is_empty() {
                    SPACING
                } else {
                    SPACING_WITH_SUBS
                };
                own + subs + spacing
            })
            .sum::<f64>()
}

pub fn total_chars(bullets: &[BulletPoint]) -> usize {
    bullets.iter().map(BulletPoint::char_count).sum()
}

pub struct CapacityValidator {
    config: CapacityConfig,
}

impl Default for CapacityValidator {
    fn default() -> Self {
        Self::new(CapacityConfig::default())
    }
}

impl CapacityValidator {
    pub fn new(config: CapacityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CapacityConfig {
        &self.config
    }

    fn is_closing(&self, slide: &SlideContent) -> bool {
        let title = slide.title.to_lowercase();
        self.config
            .closing_keywords
            .iter()
            .any(|k| title.contains(&k.to_lowercase()))
    }

    /// Which dividers survive, by index. Walks backwards so a divider followed
    /// by another divider sees whether that one is kept.
    fn kept_dividers(&self, slides: &[SlideContent]) -> Vec<bool> {
        let mut kept = vec![false; slides.len()];
        for i in (0..slides.len()).rev() {
            let slide = &slides[i];
            if !slide.is_section_divider() {
                continue;
            }
            kept[i] = self.is_closing(slide)
                || match slides.get(i + 1) {
                    None => false,
                    Some(next) if next.is_section_divider() => kept[i + 1],
                    Some(next) => next.has_content(),
                };
        }
        kept
    }

    /// Does this bullet list break the archetype's capacity?
    pub fn overflows(&self, archetype: Archetype, bullets: &[BulletPoint]) -> bool {
        let count_broken = match archetype {
            Archetype::Grid => bullets.len() != self.config.grid_bullets,
            Archetype::Agenda => bullets.len() > self.config.agenda_max_bullets,
            Archetype::Default => bullets.len() > self.config.max_bullets,
        };
        let height = estimate_height(bullets, self.config.max_sub_bullets);
        count_broken
            || height > self.config.max_content_height
            || total_chars(bullets) > self.config.max_chars
    }

    /// Validates and splits `slides`, returning the new sequence and a report.
    pub fn validate(&self, slides: Vec<SlideContent>) -> (Vec<SlideContent>, ValidationReport) {
        let mut report = ValidationReport {
            input_slides: slides.len(),
            ..ValidationReport::default()
        };
        let mut slides = slides;
        for slide in &mut slides {
            if let Some(table) = slide.table_data.as_mut() {
                table.normalize();
            }
            if slide.chart_data.as_ref().is_some_and(|c| !c.is_valid()) {
                debug!(title = %slide.title, "Clearing chart without positive values");
                slide.chart_data = None;
                report.invalid_charts_cleared += 1;
            }
        }

        let kept_dividers = self.kept_dividers(&slides);
        let mut out = Vec::with_capacity(slides.len());
        let mut i = 0;
        while i < slides.len() {
            let mut slide = slides[i].clone();
            i += 1;

            if slide.is_section_divider() {
                if slide.has_bullets() {
                    info!(index = i - 1, title = %slide.title, "Stripping bullets from section divider");
                    slide.bullets.clear();
                    report.stripped_divider_bullets += 1;
                }
                if kept_dividers[i - 1] {
                    out.push(slide);
                } else {
                    info!(index = i - 1, title = %slide.title, "Dropping orphaned section divider");
                    report.dropped_orphan_dividers += 1;
                }
                continue;
            }

            if !slide.has_content() {
                info!(index = i - 1, title = %slide.title, "Dropping blank slide");
                report.dropped_blank += 1;
                continue;
            }

            let too_many_rows = slide
                .valid_table()
                .is_some_and(|t| t.rows.len() > self.config.table_max_rows);
            if too_many_rows {
                let parts = self.split_table(slide);
                info!(index = i - 1, parts = parts.len(), "Split oversized table");
                report.tables_split += 1;
                out.extend(parts);
                continue;
            }

            let archetype = Archetype::of(&slide);
            let bullet_rules_apply = slide.has_bullets() || archetype == Archetype::Grid;
            if bullet_rules_apply && self.overflows(archetype, &slide.bullets) {
                let parts = self.split_bullets(archetype, slide);
                info!(index = i - 1, parts = parts.len(), ?archetype, "Split overflowing slide");
                report.slides_split += 1;
                out.extend(parts);
                continue;
            }

            out.push(slide);
        }

        self.tally(&out, &mut report);
        (out, report)
    }

    fn split_table(&self, slide: SlideContent) -> Vec<SlideContent> {
        let Some(table) = slide.table_data.clone() else {
            return vec![slide];
        };
        let max = self.config.table_max_rows.max(1);
        table
            .rows
            .chunks(max)
            .enumerate()
            .map(|(k, rows)| SlideContent {
                layout_type: LayoutType::Table,
                layout_hint: "table".to_string(),
                title: slide.title.clone(),
                subtitle: if k == 0 {
                    slide.subtitle.clone()
                } else {
                    Some(format!("(Part {})", k + 1))
                },
                content: if k == 0 { slide.content.clone() } else { None },
                table_data: Some(TableData {
                    headers: table.headers.clone(),
                    rows: rows.to_vec(),
                    has_header: table.has_header,
                }),
                icon_name: slide.icon_name.clone(),
                ..SlideContent::default()
            })
            .collect()
    }

    fn split_bullets(&self, archetype: Archetype, slide: SlideContent) -> Vec<SlideContent> {
        let chunks = match archetype {
            Archetype::Grid => self.grid_chunks(&slide.bullets),
            Archetype::Agenda => slide
                .bullets
                .chunks(self.config.agenda_max_bullets.max(1))
                .map(<[BulletPoint]>::to_vec)
                .collect(),
            Archetype::Default => self.greedy_chunks(&slide.bullets),
        };
        chunks
            .into_iter()
            .enumerate()
            .map(|(k, bullets)| {
                let mut part = slide.clone();
                part.bullets = bullets;
                if k > 0 {
                    part.subtitle = Some(match archetype {
                        Archetype::Grid => format!("Part {}", k + 1),
                        _ => CONTINUED.to_string(),
                    });
                    // Free text, tables and charts stay on the first part.
                    part.content = None;
                    part.table_data = None;
                    part.chart_data = None;
                }
                part
            })
            .collect()
    }

    fn grid_chunks(&self, bullets: &[BulletPoint]) -> Vec<Vec<BulletPoint>> {
        let size = self.config.grid_bullets.max(1);
        if bullets.is_empty() {
            return vec![vec![BulletPoint::placeholder(); size]];
        }
        bullets
            .chunks(size)
            .map(|chunk| {
                let mut cells = chunk.to_vec();
                cells.resize(size, BulletPoint::placeholder());
                cells
            })
            .collect()
    }

    /// Single forward pass: a chunk closes as soon as the next bullet would
    /// exceed the count or the character budget. A lone oversized bullet
    /// still gets a chunk of its own.
    fn greedy_chunks(&self, bullets: &[BulletPoint]) -> Vec<Vec<BulletPoint>> {
        let mut chunks = Vec::new();
        let mut current: Vec<BulletPoint> = Vec::new();
        let mut chars = 0;
        for bullet in bullets {
            let size = bullet.char_count();
            let full = current.len() >= self.config.max_bullets
                || chars + size > self.config.max_chars;
            if !current.is_empty() && full {
                chunks.push(std::mem::take(&mut current));
                chars = 0;
            }
            chars += size;
            current.push(bullet.clone());
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }

    fn tally(&self, slides: &[SlideContent], report: &mut ValidationReport) {
        report.output_slides = slides.len();
        for slide in slides {
            report.total_bullets += slide.bullets.len();
            if slide.valid_chart().is_some() {
                report.chart_slides += 1;
            }
            if slide.valid_table().is_some() {
                report.table_slides += 1;
            }
            match Archetype::of(slide) {
                Archetype::Grid => report.grid_slides += 1,
                Archetype::Agenda => report.agenda_slides += 1,
                Archetype::Default => {}
            }
        }

        if report.chart_slides < MIN_CHART_SLIDES {
            report.warnings.push(format!(
                "only {} chart slide(s); at least {MIN_CHART_SLIDES} recommended",
                report.chart_slides
            ));
        }
        if report.grid_slides < MIN_GRID_SLIDES {
            report.warnings.push(format!(
                "only {} grid slide(s); at least {MIN_GRID_SLIDES} recommended",
                report.grid_slides
            ));
        }
        if report.table_slides == 0 {
            report.warnings.push("no table slide".to_string());
        }
        for w in &report.warnings {
            warn!(advisory = %w, "Content richness advisory");
        }
        info!(
            input = report.input_slides,
            output = report.output_slides,
            bullets = report.total_bullets,
            charts = report.chart_slides,
            tables = report.table_slides,
            grids = report.grid_slides,
            "Validation complete"
        );
    }
}
