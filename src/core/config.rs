use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot

/// Base URL of the remote video-extraction service
/// Read once at startup from VIDRELAY_API_URL, defaults to the public
/// savethevideo endpoint. No trailing slash; job hrefs are appended as-is.
pub static EXTRACT_API_URL: Lazy<String> = Lazy::new(|| {
    env::var("VIDRELAY_API_URL").unwrap_or_else(|_| "https://api.v02.savethevideo.com".to_string())
});

/// Log file path
/// Read from VIDRELAY_LOG_FILE environment variable
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("VIDRELAY_LOG_FILE").unwrap_or_else(|_| "vidrelay.log".to_string()));

/// Extraction-job polling configuration
pub mod poll {
    use super::Duration;

    /// Maximum number of status polls before giving up
    pub const MAX_ATTEMPTS: u32 = 30;

    /// Delay between status polls (in seconds)
    pub const INTERVAL_SECS: u64 = 2;

    /// Poll interval duration
    pub fn interval() -> Duration {
        Duration::from_secs(INTERVAL_SECS)
    }
}

/// Extraction-service HTTP configuration
pub mod extract {
    use super::Duration;

    /// Timeout for submit and status requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn request_timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Relay (download + upload) configuration
pub mod relay {
    use super::Duration;

    /// Timeout for downloading the chosen rendition (in seconds)
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

    /// Timeout for uploading the file to Telegram (in seconds)
    /// Longer than the download timeout to accommodate larger payloads.
    pub const UPLOAD_TIMEOUT_SECS: u64 = 120;

    /// Download timeout duration
    pub fn download_timeout() -> Duration {
        Duration::from_secs(DOWNLOAD_TIMEOUT_SECS)
    }

    /// Upload timeout duration
    pub fn upload_timeout() -> Duration {
        Duration::from_secs(UPLOAD_TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for the Telegram API client (in seconds)
    /// Matches the relay upload timeout, the largest payload we send.
    pub const REQUEST_TIMEOUT_SECS: u64 = super::relay::UPLOAD_TIMEOUT_SECS;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        super::relay::upload_timeout()
    }
}

/// Validation configuration
pub mod validation {
    /// Maximum URL length (RFC 7230 recommends 8000, but we use 2048 for safety)
    pub const MAX_URL_LENGTH: usize = 2048;
}
