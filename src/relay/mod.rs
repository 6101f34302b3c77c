//! Download-then-upload relay with scoped temporary files

pub mod pipeline;
pub mod temp_file;

// Re-exports for convenience
pub use pipeline::{RelayPipeline, RelayProgress, VideoSink};
pub use temp_file::TempMediaFile;
