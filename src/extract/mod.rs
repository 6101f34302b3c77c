//! Extraction-service integration: client, job polling and format selection

pub mod client;
pub mod formats;
pub mod poll;
pub mod types;

// Re-exports for convenience
pub use client::{ExtractionClient, StatusPoller};
pub use formats::{select_formats, Choice, ChoiceSet};
pub use poll::resolve;
pub use types::{ExtractionJob, FormatDescriptor, JobHandle, JobState, MediaVariant};
