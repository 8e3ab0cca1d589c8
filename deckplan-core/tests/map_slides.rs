use deckplan_core::config::MapperConfig;
use deckplan_core::mapper::{is_column_switch, split_columns, SlideMapper};
use deckplan_core::model::{ContentItem, LayoutType, Section};
use deckplan_core::parse::parse_markdown;

fn section(title: &str, items: Vec<ContentItem>) -> Section {
    Section {
        title: title.to_string(),
        content: items,
    }
}

fn bullets(texts: &[&str]) -> Vec<ContentItem> {
    texts.iter().map(|t| ContentItem::Bullet(t.to_string())).collect()
}

#[test]
fn test_column_switch_matches_keyword_substrings() {
    assert!(is_column_switch("Buy or rent"));
    assert!(is_column_switch("VS."));
    assert!(is_column_switch("Alternatively, rent"));
    assert!(is_column_switch("Versus"));
    // Substrings inside ordinary words count too.
    assert!(is_column_switch("Work for the team"));
    assert!(is_column_switch("Canvas"));
    assert!(!is_column_switch("Fixed cost"));
    assert!(!is_column_switch("Elastic"));
}

#[test]
fn test_ordinary_word_containing_keyword_flips_columns() {
    let (left, right) = split_columns(&["Elastic", "Network costs", "Fixed cost", "Owned"]);
    assert_eq!(left, vec!["Elastic"]);
    assert_eq!(right, vec!["Fixed cost", "Owned"]);
}

#[test]
fn test_two_column_switch_item_toggles_and_is_dropped() {
    let slides = SlideMapper::default().map_section(&section(
        "Cloud vs On-Prem",
        bullets(&["Elastic", "Pay per use", "versus", "Fixed cost", "Full control"]),
    ));

    assert_eq!(slides.len(), 1);
    let slide = &slides[0];
    assert_eq!(slide.layout_type, LayoutType::TwoColumn);
    assert_eq!(slide.left_content, vec!["Elastic", "Pay per use"]);
    assert_eq!(slide.right_content, vec!["Fixed cost", "Full control"]);
}

#[test]
fn test_two_column_even_split_fallback() {
    let (left, right) = split_columns(&["a", "b", "c", "d", "e"]);
    assert_eq!(left, vec!["a", "b"]);
    assert_eq!(right, vec!["c", "d", "e"]);

    let (left, right) = split_columns(&["a", "b", "c", "d", "e", "f"]);
    assert_eq!(left.len(), 3);
    assert_eq!(right.len(), 3);

    // Four or fewer items stay on the left.
    let (left, right) = split_columns(&["a", "b", "c", "d"]);
    assert_eq!(left.len(), 4);
    assert!(right.is_empty());
}

#[test]
fn test_divider_takes_first_paragraph_and_no_bullets() {
    let slides = SlideMapper::default().map_section(&section(
        "Introduction",
        vec![
            ContentItem::Bullet("ignored".into()),
            ContentItem::Paragraph("Welcome aboard".into()),
            ContentItem::Paragraph("Second".into()),
        ],
    ));
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].layout_type, LayoutType::Section);
    assert_eq!(slides[0].subtitle.as_deref(), Some("Welcome aboard"));
    assert!(slides[0].bullets.is_empty());
}

#[test]
fn test_content_section_joins_paragraphs_and_keeps_subsections() {
    let slides = SlideMapper::default().map_section(&section(
        "Approach",
        vec![
            ContentItem::Paragraph("We start small.".into()),
            ContentItem::Subsection("Phase 1".into()),
            ContentItem::Bullet("Discovery".into()),
            ContentItem::Numbered("Design".into()),
            ContentItem::Paragraph("Then scale.".into()),
        ],
    ));
    assert_eq!(slides.len(), 1);
    let slide = &slides[0];
    assert_eq!(slide.title, "Approach");
    assert_eq!(slide.content.as_deref(), Some("We start small. Then scale."));
    let texts: Vec<&str> = slide.bullets.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["Phase 1", "Discovery", "Design"]);
}

#[test]
fn test_long_section_is_pre_split_with_numbered_titles() {
    let items: Vec<String> = (1..=13).map(|i| format!("point {i}")).collect();
    let refs: Vec<&str> = items.iter().map(String::as_str).collect();
    let mut content = vec![ContentItem::Paragraph("Lead in".into())];
    content.extend(bullets(&refs));

    let slides = SlideMapper::new(MapperConfig {
        max_bullets_per_slide: 6,
    })
    .map_section(&section("Features", content));

    let titles: Vec<&str> = slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Features (1/3)", "Features (2/3)", "Features (3/3)"]);
    let counts: Vec<usize> = slides.iter().map(|s| s.bullets.len()).collect();
    assert_eq!(counts, vec![6, 6, 1]);
    assert_eq!(slides[0].content.as_deref(), Some("Lead in"));
    assert_eq!(slides[1].content, None);
}

#[test]
fn test_exactly_max_bullets_is_not_split() {
    let slides = SlideMapper::default().map_section(&section(
        "Features",
        bullets(&["1", "2", "3", "4", "5", "6"]),
    ));
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].title, "Features");
}

#[test]
fn test_map_preserves_document_metadata_and_order() {
    let doc = parse_markdown("# Deck\n## Tagline\n## Goals\n- grow\n## Risks\n- churn");
    let presentation = SlideMapper::default().map(&doc);
    assert_eq!(presentation.title, "Deck");
    assert_eq!(presentation.subtitle.as_deref(), Some("Tagline"));
    let titles: Vec<&str> = presentation.slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Goals", "Risks"]);
}
