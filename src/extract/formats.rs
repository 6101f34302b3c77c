//! Format selection and labeling
//!
//! Turns a completed extraction job into the bounded choice set offered to
//! the user. Only the first media variant is consulted; multi-variant jobs
//! are not disambiguated further (documented single-variant behavior).

use crate::core::error::ExtractError;
use crate::extract::types::{ExtractionJob, FormatDescriptor};

/// One selectable rendition: the user-facing button label plus the
/// descriptor it resolves to.
#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub descriptor: FormatDescriptor,
}

/// Ordered, index-addressable set of eligible formats for one extraction job.
///
/// Indices are stable for the lifetime of the set and are only ever replaced
/// wholesale when a new submission overwrites the chat's session entry.
#[derive(Debug, Clone, Default)]
pub struct ChoiceSet {
    choices: Vec<Choice>,
}

impl ChoiceSet {
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }
}

/// Label for one descriptor: resolution string plus an audio-presence marker.
pub fn format_label(fmt: &FormatDescriptor) -> String {
    let marker = if fmt.has_audio() { "🔊" } else { "🔇" };
    format!("{} {}", fmt.resolution_label(), marker)
}

/// Builds the choice set for a resolved job.
///
/// Order matches the order formats appeared in the source list; nothing is
/// re-sorted by quality.
///
/// # Errors
/// * [`ExtractError::NoResult`] when the job's result list is empty
/// * [`ExtractError::NoEligibleFormats`] when no format passes the mp4/video filter
pub fn select_formats(job: &ExtractionJob) -> Result<ChoiceSet, ExtractError> {
    let variant = job.result.first().ok_or(ExtractError::NoResult)?;

    let choices: Vec<Choice> = variant
        .formats
        .iter()
        .filter(|fmt| fmt.is_eligible())
        .map(|fmt| Choice {
            label: format_label(fmt),
            descriptor: fmt.clone(),
        })
        .collect();

    if choices.is_empty() {
        return Err(ExtractError::NoEligibleFormats);
    }

    log::info!(
        "Selected {} of {} formats from extraction result",
        choices.len(),
        variant.formats.len()
    );
    Ok(ChoiceSet { choices })
}
