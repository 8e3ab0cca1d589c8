//! Picks an icon name for a slide from its text.
//!
//! Lookup order, first hit wins:
//! 1. the whole normalised title against [`EXACT_TITLES`],
//! 2. the first word of the title against [`FIRST_WORDS`],
//! 3. title and content against the [`CATEGORIES`] keyword groups,
//! 4. `"circle"`.

pub const DEFAULT_ICON: &str = "circle";

pub const EXACT_TITLES: &[(&str, &str)] = &[
    ("team", "users"),
    ("our team", "users"),
    ("timeline", "calendar"),
    ("schedule", "calendar"),
    ("objectives", "target"),
    ("goals", "target"),
    ("budget", "money"),
    ("pricing", "money"),
    ("results", "chart"),
    ("deliverables", "check"),
    ("risks", "warning"),
    ("about us", "building"),
    ("partners", "handshake"),
];

pub const FIRST_WORDS: &[(&str, &str)] = &[
    ("team", "users"),
    ("project", "rocket"),
    ("market", "globe"),
    ("quality", "star"),
    ("security", "shield"),
    ("process", "gear"),
    ("key", "lightbulb"),
    ("next", "rocket"),
    ("financial", "money"),
];

pub const CATEGORIES: &[(&[&str], &str)] = &[
    (&["people", "staff", "role", "hire", "member"], "users"),
    (&["date", "phase", "milestone", "week", "month", "deadline"], "calendar"),
    (&["goal", "objective", "target", "kpi", "aim"], "target"),
    (&["growth", "revenue", "metric", "data", "analysis", "statistic"], "chart"),
    (&["cost", "price", "budget", "invest", "fund"], "money"),
    (&["risk", "issue", "challenge", "threat"], "warning"),
    (&["secure", "compliance", "privacy", "protect"], "shield"),
    (&["idea", "innovation", "insight", "solution"], "lightbulb"),
    (&["method", "workflow", "process", "approach", "technical"], "gear"),
    (&["global", "international", "market", "region"], "globe"),
    (&["company", "organization", "office", "about"], "building"),
    (&["report", "document", "contract", "policy"], "document"),
    (&["launch", "start", "deploy", "release"], "rocket"),
    (&["time", "hour", "duration"], "clock"),
    (&["complete", "done", "deliver", "success"], "check"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, icon)| *icon)
}

/// Selects an icon name for a slide. Pure; never fails.
pub fn auto_select_icon(title: &str, content: &str) -> &'static str {
    let title = title.trim().to_lowercase();
    if let Some(icon) = lookup(EXACT_TITLES, &title) {
        return icon;
    }
    let first = title
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .unwrap_or("");
    if let Some(icon) = lookup(FIRST_WORDS, first) {
        return icon;
    }
    let haystack = format!("{title} {}", content.to_lowercase());
    CATEGORIES
        .iter()
        .find(|(words, _)| words.iter().any(|w| haystack.contains(w)))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
