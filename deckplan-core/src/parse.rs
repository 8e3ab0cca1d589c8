//! # parse: markdown to titled sections
//!
//! A line-oriented pass over hierarchical markdown:
//!
//! - the first `#` heading is the document title,
//! - the first `##` heading seen before any section is open is the subtitle,
//! - every later `#`/`##` heading closes the open section and starts a new one,
//! - deeper headings inside a section become [`ContentItem::Subsection`]s,
//! - `-`/`*` and `N.` lines become bullets and numbered items, anything else a
//!   paragraph.
//!
//! Content that appears before the first section is ignored. A document with
//! no headings is not an error; it yields "Untitled Presentation" and no
//! sections.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::model::{ContentItem, ParsedDocument, Section};

pub use crate::classify::{classify_title, SlideKind};

pub const UNTITLED: &str = "Untitled Presentation";

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)\s+(.*)$").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+(.*)$").unwrap());
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Heading(usize, &'a str),
    Bullet(&'a str),
    Numbered(&'a str),
    Text(&'a str),
}

fn classify_line(line: &str) -> Line<'_> {
    if let Some(c) = HEADING.captures(line) {
        let level = c.get(1).map_or(1, |m| m.as_str().len());
        return Line::Heading(level, c.get(2).map_or("", |m| m.as_str().trim()));
    }
    if let Some(c) = BULLET.captures(line) {
        return Line::Bullet(c.get(1).map_or("", |m| m.as_str().trim()));
    }
    if let Some(c) = NUMBERED.captures(line) {
        return Line::Numbered(c.get(1).map_or("", |m| m.as_str().trim()));
    }
    Line::Text(line)
}

/// Parses markdown text into a title, optional subtitle, and sections.
pub fn parse_markdown(text: &str) -> ParsedDocument {
    let mut title: Option<String> = None;
    let mut subtitle: Option<String> = None;
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match classify_line(line) {
            Line::Heading(1, h) if title.is_none() => title = Some(h.to_string()),
            Line::Heading(2, h)
                if subtitle.is_none() && current.is_none() && sections.is_empty() =>
            {
                subtitle = Some(h.to_string())
            }
            Line::Heading(1 | 2, h) => {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                current = Some(Section::new(h));
            }
            line => {
                let Some(section) = current.as_mut() else {
                    debug!(?line, "Skipping content outside any section");
                    continue;
                };
                section.content.push(match line {
                    Line::Heading(_, h) => ContentItem::Subsection(h.to_string()),
                    Line::Bullet(t) => ContentItem::Bullet(t.to_string()),
                    Line::Numbered(t) => ContentItem::Numbered(t.to_string()),
                    Line::Text(t) => ContentItem::Paragraph(t.to_string()),
                });
            }
        }
    }
    if let Some(done) = current {
        sections.push(done);
    }

    let doc = ParsedDocument {
        title: title.unwrap_or_else(|| UNTITLED.to_string()),
        subtitle,
        sections,
    };
    info!(
        title = %doc.title,
        sections = doc.sections.len(),
        "Parsed markdown document"
    );
    doc
}
