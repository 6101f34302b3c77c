use thiserror::Error;

/// Errors from the extraction service: submit, polling and format selection.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Transport failure talking to the extraction service
    #[error("extraction request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Status poll answered with a non-success HTTP status
    #[error("extraction status request failed with status: {0}")]
    Http(reqwest::StatusCode),

    /// Job submission refused (non-success status or no job handle in the response)
    #[error("extraction job was rejected by the service")]
    RemoteRejected,

    /// Polling exceeded its attempt budget without reaching a terminal state
    #[error("extraction job timed out")]
    Timeout,

    /// The job reached the failed state; carries the service's reason
    #[error("extraction job failed: {0}")]
    RemoteFailed(String),

    /// The job completed but its result list is empty
    #[error("extraction job produced no result")]
    NoResult,

    /// The job completed but no format passed the mp4/video filter
    #[error("no supported video formats in extraction result")]
    NoEligibleFormats,
}

/// Errors resolving a user's button press against stored choices.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no choice set stored for this chat")]
    NoSuchSession,

    #[error("choice index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors from the download-then-upload relay.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("download failed: {0}")]
    Download(String),

    #[error("upload failed: {0}")]
    Upload(String),
}

/// Centralized error type for the application
///
/// Everything a handler flow can fail with converges here via `#[from]`, so
/// the handler layer maps one enum onto the single user-visible status text.
/// None of these are fatal to the process; only a missing bot credential at
/// startup is.
#[derive(Error, Debug)]
pub enum AppError {
    /// Extraction service errors
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Stale or invalid user selection
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Relay (download/upload) errors
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
