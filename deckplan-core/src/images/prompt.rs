//! Title-keyword prompt templates for illustration requests.

const STYLE: &str = "Clean, modern corporate illustration, flat design, soft professional colours, \
no text, no letters, no watermark.";

pub const PROMPT_RULES: &[(&[&str], &str)] = &[
    (
        &["team", "role", "staff"],
        "A diverse professional team collaborating around a table in a bright office",
    ),
    (
        &["executive", "summary"],
        "An executive overview: a city skyline at dawn with subtle upward trend lines",
    ),
    (
        &["deliverable"],
        "Neatly arranged project deliverables: documents, a laptop and a checklist on a desk",
    ),
    (
        &["timeline", "schedule", "roadmap"],
        "A horizontal roadmap with milestone markers along a winding path",
    ),
    (
        &["objective", "goal"],
        "An arrow striking the centre of a target, symbolising focused objectives",
    ),
    (
        &["company", "about"],
        "A modern company headquarters building with glass facade",
    ),
    (
        &["methodology", "approach", "process"],
        "Interlocking gears and a flowchart representing a structured methodology",
    ),
    (
        &["quality", "risk"],
        "A protective shield over a checklist, representing quality assurance and risk control",
    ),
];

const GENERIC: &str = "An abstract business concept illustration";

/// Builds the generation prompt for a slide title.
pub fn build_prompt(title: &str) -> String {
    let lower = title.to_lowercase();
    let subject = PROMPT_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, subject)| (*subject).to_string())
        .unwrap_or_else(|| format!("{GENERIC} for \"{}\"", title.trim()));
    format!("{subject}. {STYLE}")
}
