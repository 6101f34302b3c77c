//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use error::{AppError, AppResult, ExtractError, RelayError, SessionError};
pub use logging::init_logger;
