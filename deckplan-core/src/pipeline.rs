//! High-level pipeline: orchestrates parse → map → validate for slide plans.
//!
//! This module ties the stages together for the two accepted inputs:
//!   - raw markdown, parsed into sections and mapped by [`SlideMapper`]
//!   - a structured [`Proposal`], mapped one slide per section
//!
//! Both paths finish with the [`CapacityValidator`], so whatever the input,
//! the returned slides respect the configured capacity rules.
//!
//! # Major Types
//! - [`PlanOutcome`]: the validated [`PresentationData`] plus the
//!   [`ValidationReport`] describing what was corrected
//!
//! # Responsibilities
//! - Pure, synchronous transformation; no shared state between calls
//! - Never fails on user content: defects are corrected and reported
//!
//! # Navigation
//! - Entrypoints: [`plan_from_markdown`], [`plan_from_proposal`]

use serde::Serialize;
use tracing::info;

use crate::config::DeckConfig;
use crate::mapper::SlideMapper;
use crate::model::PresentationData;
use crate::parse::parse_markdown;
use crate::proposal::{map_proposal, Proposal};
use crate::validate::{CapacityValidator, ValidationReport};

#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    pub presentation: PresentationData,
    pub report: ValidationReport,
}

/// Runs the validator over a mapped presentation, replacing its slides.
pub fn finalize(mut presentation: PresentationData, config: &DeckConfig) -> PlanOutcome {
    let validator = CapacityValidator::new(config.capacity.clone());
    let slides = std::mem::take(&mut presentation.slides);
    let (slides, report) = validator.validate(slides);
    presentation.slides = slides;
    info!(
        title = %presentation.title,
        slides = presentation.slides.len(),
        warnings = report.warnings.len(),
        "Slide plan finalised"
    );
    PlanOutcome {
        presentation,
        report,
    }
}

pub fn plan_from_markdown(text: &str, config: &DeckConfig) -> PlanOutcome {
    info!(bytes = text.len(), "[PLAN] Starting markdown pipeline");
    let parsed = parse_markdown(text);
    let mapped = SlideMapper::new(config.mapper.clone()).map(&parsed);
    finalize(mapped, config)
}

pub fn plan_from_proposal(proposal: &Proposal, config: &DeckConfig) -> PlanOutcome {
    info!(sections = proposal.sections.len(), "[PLAN] Starting proposal pipeline");
    finalize(map_proposal(proposal), config)
}
