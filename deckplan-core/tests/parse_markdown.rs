use deckplan_core::model::ContentItem;
use deckplan_core::parse::{classify_title, parse_markdown, SlideKind, UNTITLED};

#[test]
fn test_title_subtitle_and_single_agenda_section() {
    let doc = parse_markdown("# Title\n## Sub\n## Agenda\n- a\n- b\n- c\n- d\n- e\n- f");

    assert_eq!(doc.title, "Title");
    assert_eq!(doc.subtitle.as_deref(), Some("Sub"));
    assert_eq!(doc.sections.len(), 1);
    let agenda = &doc.sections[0];
    assert_eq!(agenda.title, "Agenda");
    assert_eq!(agenda.content.len(), 6);
    assert!(agenda
        .content
        .iter()
        .all(|c| matches!(c, ContentItem::Bullet(_))));
    assert_eq!(agenda.content[0], ContentItem::Bullet("a".into()));
}

#[test]
fn test_document_without_headings_is_untitled_and_empty() {
    let doc = parse_markdown("just some text\n- a stray bullet\n\n");
    assert_eq!(doc.title, UNTITLED);
    assert_eq!(doc.subtitle, None);
    assert!(doc.sections.is_empty());
}

#[test]
fn test_content_items_are_typed_and_markers_stripped() {
    let text = "# Deck\n## Sub\n\n## Plan\nIntro paragraph.\n\n### Phase one\n- first\n* second\n1. numbered one\n12. numbered twelve\n";
    let doc = parse_markdown(text);

    assert_eq!(doc.subtitle.as_deref(), Some("Sub"));
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].title, "Plan");
    assert_eq!(
        doc.sections[0].content,
        vec![
            ContentItem::Paragraph("Intro paragraph.".into()),
            ContentItem::Subsection("Phase one".into()),
            ContentItem::Bullet("first".into()),
            ContentItem::Bullet("second".into()),
            ContentItem::Numbered("numbered one".into()),
            ContentItem::Numbered("numbered twelve".into()),
        ]
    );
}

#[test]
fn test_any_later_heading_opens_a_section_and_empty_sections_are_kept() {
    let doc = parse_markdown("# Deck\n# Part A\n## Part B\n- b1\n# Part C");
    let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Part A", "Part B", "Part C"]);
    assert!(doc.sections[0].content.is_empty());
    assert!(doc.sections[2].content.is_empty());
    assert_eq!(doc.subtitle, None, "a section was open before the first ##");
}

#[test]
fn test_deep_headings_never_open_sections() {
    let doc = parse_markdown("# D\n## S\n## Body\n### Detail\n#### Deeper\n- x");
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(
        doc.sections[0].content[..2],
        [
            ContentItem::Subsection("Detail".into()),
            ContentItem::Subsection("Deeper".into())
        ]
    );
}

#[test]
fn test_classify_title_rules() {
    assert_eq!(classify_title("Introduction"), SlideKind::Section);
    assert_eq!(classify_title("PROJECT OVERVIEW"), SlideKind::Section);
    assert_eq!(classify_title("Next Steps"), SlideKind::Section);
    assert_eq!(classify_title("Thank You!"), SlideKind::Section);
    assert_eq!(classify_title("Cloud vs On-Prem"), SlideKind::TwoColumn);
    assert_eq!(classify_title("Pros/Cons"), SlideKind::TwoColumn);
    assert_eq!(classify_title("Vendor Comparison"), SlideKind::TwoColumn);
    assert_eq!(classify_title("Market Analysis"), SlideKind::Content);
    // Divider rules are checked first.
    assert_eq!(classify_title("Summary: A versus B"), SlideKind::Section);
}
