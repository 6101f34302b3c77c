//! Wire types for the extraction service
//!
//! Mirrors the JSON the service returns for submitted jobs. All fields are
//! immutable once fetched; job state only changes server-side between polls.

use serde::Deserialize;

/// Opaque handle to a submitted extraction job.
///
/// Carries the `href` from the submit response; the status resource lives at
/// `{base_url}{href}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remote job state. Anything the service invents beyond the three known
/// states is treated as non-terminal and keeps the poll loop going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Other,
}

/// Error payload embedded in a failed job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobError {
    #[serde(default)]
    pub message: Option<String>,
}

/// One extraction job as reported by the status resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionJob {
    pub state: JobState,
    #[serde(default)]
    pub error: Option<JobError>,
    #[serde(default)]
    pub result: Vec<MediaVariant>,
}

impl ExtractionJob {
    /// Failure reason reported by the service, defaulting to "Unknown error".
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// One media variant of a job's result; carries the concrete formats.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaVariant {
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>,
}

/// One concrete encoded rendition of a video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatDescriptor {
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub url: String,
}

impl FormatDescriptor {
    /// A descriptor is downloadable for us iff it is an mp4 with a video track.
    pub fn is_eligible(&self) -> bool {
        self.ext == "mp4" && self.vcodec.as_deref() != Some("none")
    }

    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }

    /// Resolution string for labels: the service's resolution field, falling
    /// back to `"<height>p"`, then `"?p"`.
    pub fn resolution_label(&self) -> String {
        match (&self.resolution, self.height) {
            (Some(res), _) if !res.is_empty() => res.clone(),
            (_, Some(h)) => format!("{}p", h),
            _ => "?p".to_string(),
        }
    }

    /// Resolution string for progress messages and captions; "video" when
    /// the service did not report one.
    pub fn display_resolution(&self) -> String {
        self.resolution
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "video".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_response() {
        let json = r#"{
            "state": "completed",
            "result": [
                {"formats": [
                    {"ext": "mp4", "vcodec": "avc1", "acodec": "aac", "resolution": "1280x720", "height": 720, "url": "https://cdn.example/v.mp4"},
                    {"ext": "webm", "vcodec": "vp9", "acodec": "opus", "url": "https://cdn.example/v.webm"}
                ]}
            ]
        }"#;
        let job: ExtractionJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.state, JobState::Completed);
        assert_eq!(job.result.len(), 1);
        assert_eq!(job.result[0].formats.len(), 2);
        assert!(job.result[0].formats[0].is_eligible());
        assert!(!job.result[0].formats[1].is_eligible());
    }

    #[test]
    fn test_parse_failed_job() {
        let json = r#"{"state": "failed", "error": {"message": "bad url"}}"#;
        let job: ExtractionJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.state, JobState::Failed);
        assert_eq!(job.error_message(), "bad url");
    }

    #[test]
    fn test_error_message_defaults_when_absent() {
        let json = r#"{"state": "failed"}"#;
        let job: ExtractionJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.error_message(), "Unknown error");
    }

    #[test]
    fn test_unknown_state_is_non_terminal() {
        let json = r#"{"state": "queued"}"#;
        let job: ExtractionJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.state, JobState::Other);
    }

    #[test]
    fn test_eligibility_rejects_audio_only() {
        let fmt = FormatDescriptor {
            ext: "mp4".to_string(),
            vcodec: Some("none".to_string()),
            acodec: Some("aac".to_string()),
            ..Default::default()
        };
        assert!(!fmt.is_eligible());
    }

    #[test]
    fn test_resolution_label_fallbacks() {
        let with_resolution = FormatDescriptor {
            resolution: Some("1920x1080".to_string()),
            height: Some(1080),
            ..Default::default()
        };
        assert_eq!(with_resolution.resolution_label(), "1920x1080");

        let height_only = FormatDescriptor {
            height: Some(720),
            ..Default::default()
        };
        assert_eq!(height_only.resolution_label(), "720p");

        let neither = FormatDescriptor::default();
        assert_eq!(neither.resolution_label(), "?p");

        // Empty resolution string behaves like an absent one
        let empty = FormatDescriptor {
            resolution: Some(String::new()),
            height: Some(480),
            ..Default::default()
        };
        assert_eq!(empty.resolution_label(), "480p");
    }

    #[test]
    fn test_display_resolution_fallback() {
        let fmt = FormatDescriptor {
            resolution: Some("720x1280".to_string()),
            ..Default::default()
        };
        assert_eq!(fmt.display_resolution(), "720x1280");
        assert_eq!(FormatDescriptor::default().display_resolution(), "video");
    }
}
