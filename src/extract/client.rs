//! HTTP client for the extraction service
//!
//! Two remote calls: submit a job and read its status. No retry here; the
//! retry/backoff policy lives in [`crate::extract::poll`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::core::config;
use crate::core::error::ExtractError;
use crate::extract::types::{ExtractionJob, JobHandle};

/// Reads the status resource of a submitted job.
///
/// Split out so the poll loop can be exercised against a fake in tests.
#[async_trait]
pub trait StatusPoller: Send + Sync {
    async fn poll(&self, handle: &JobHandle) -> Result<ExtractionJob, ExtractError>;
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    href: Option<String>,
}

/// Client for the savethevideo-style task API.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    /// Creates a client against the given base URL (no trailing slash).
    ///
    /// # Errors
    /// Fails when the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config::extract::request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Creates a client against the configured service endpoint.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(config::EXTRACT_API_URL.as_str())
    }

    /// Submits an extraction job for `url`.
    ///
    /// POSTs `{"type":"info","url":…}` to `{base}/tasks`. A non-success
    /// status or a response without a job href is surfaced as
    /// [`ExtractError::RemoteRejected`]; the caller decides what to do,
    /// nothing is retried here.
    pub async fn submit(&self, url: &str) -> Result<JobHandle, ExtractError> {
        let endpoint = format!("{}/tasks", self.base_url);
        let resp = self
            .http
            .post(&endpoint)
            .json(&json!({ "type": "info", "url": url }))
            .send()
            .await?;

        if !resp.status().is_success() {
            log::warn!("Extraction submit rejected: url={}, status={}", url, resp.status());
            return Err(ExtractError::RemoteRejected);
        }

        let body: SubmitResponse = resp.json().await?;
        match body.href.filter(|href| !href.is_empty()) {
            Some(href) => {
                log::info!("Extraction job submitted: url={}, href={}", url, href);
                Ok(JobHandle::new(href))
            }
            None => {
                log::warn!("Extraction submit returned no job handle: url={}", url);
                Err(ExtractError::RemoteRejected)
            }
        }
    }
}

#[async_trait]
impl StatusPoller for ExtractionClient {
    async fn poll(&self, handle: &JobHandle) -> Result<ExtractionJob, ExtractError> {
        let endpoint = format!("{}{}", self.base_url, handle.as_str());
        let resp = self.http.get(&endpoint).send().await?;

        if !resp.status().is_success() {
            return Err(ExtractError::Http(resp.status()));
        }

        Ok(resp.json::<ExtractionJob>().await?)
    }
}
