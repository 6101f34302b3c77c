//! The relay pipeline: download the chosen rendition, upload it to the chat
//!
//! States run strictly Downloading -> Uploading -> Cleanup; cleanup happens
//! on every exit path, including panics, via the temp-file guard. The user
//! sees three progressive status edits driven through [`RelayProgress`].

use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use teloxide::types::ChatId;
use tokio::io::AsyncWriteExt;

use crate::core::config;
use crate::core::error::RelayError;
use crate::extract::types::FormatDescriptor;
use crate::relay::temp_file::TempMediaFile;

/// Chat transport capability the pipeline needs: send one video file.
///
/// The production implementation wraps the Telegram bot; tests plug in fakes
/// to drive the upload-failure paths.
#[async_trait]
pub trait VideoSink: Send + Sync {
    async fn send_video(&self, chat_id: ChatId, path: &Path, caption: &str) -> anyhow::Result<()>;
}

/// Receives the three progressive status updates of one relay run.
/// Implementations swallow their own transport errors; a failed status edit
/// must not fail the relay.
#[async_trait]
pub trait RelayProgress: Send {
    async fn downloading(&mut self, resolution: &str);
    async fn uploading(&mut self, resolution: &str);
    async fn done(&mut self, resolution: &str);
}

/// Downloads a format descriptor's source into a scoped temp file and
/// relays it to the chat transport.
#[derive(Debug, Clone)]
pub struct RelayPipeline {
    http: reqwest::Client,
    download_dir: std::path::PathBuf,
}

impl RelayPipeline {
    /// Pipeline writing into the system temp directory.
    ///
    /// # Errors
    /// Fails when the download HTTP client cannot be built.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_download_dir(std::env::temp_dir())
    }

    /// Pipeline writing into `dir`; used by tests to observe cleanup.
    pub fn with_download_dir(dir: impl Into<std::path::PathBuf>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config::relay::download_timeout())
            .build()?;
        Ok(Self {
            http,
            download_dir: dir.into(),
        })
    }

    /// Runs one relay: download, upload, cleanup.
    ///
    /// Returns the relayed file size on success. The temp file is removed on
    /// every path out of this function; a cleanup failure is logged and never
    /// overrides the pipeline's outcome.
    pub async fn relay(
        &self,
        descriptor: &FormatDescriptor,
        sink: &dyn VideoSink,
        chat_id: ChatId,
        progress: &mut dyn RelayProgress,
    ) -> Result<u64, RelayError> {
        let resolution = descriptor.display_resolution();
        let mut tmp = TempMediaFile::new_in(&self.download_dir, &resolution);

        let outcome = self.run(descriptor, sink, chat_id, progress, &mut tmp, &resolution).await;

        // Cleanup state: exactly once, also reached via Drop on panic.
        tmp.cleanup();
        outcome
    }

    async fn run(
        &self,
        descriptor: &FormatDescriptor,
        sink: &dyn VideoSink,
        chat_id: ChatId,
        progress: &mut dyn RelayProgress,
        tmp: &mut TempMediaFile,
        resolution: &str,
    ) -> Result<u64, RelayError> {
        progress.downloading(resolution).await;
        self.download(&descriptor.url, tmp).await?;
        let size = tmp.size_bytes();
        log::info!(
            "Downloaded {} bytes for chat {}: resolution={}, path={}",
            size,
            chat_id,
            resolution,
            tmp.path().display()
        );

        progress.uploading(resolution).await;
        let caption = format!("🎬 {} video", resolution);
        sink.send_video(chat_id, tmp.path(), &caption)
            .await
            .map_err(|e| RelayError::Upload(e.to_string()))?;
        log::info!("Uploaded video to chat {}: resolution={}", chat_id, resolution);

        progress.done(resolution).await;
        Ok(size)
    }

    /// Streams `url` into the temp file under the download timeout and
    /// records the transferred size on the guard.
    async fn download(&self, url: &str, tmp: &mut TempMediaFile) -> Result<(), RelayError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::Download(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(RelayError::Download(format!(
                "source responded with status {}",
                resp.status()
            )));
        }

        let mut file = tokio::fs::File::create(tmp.path())
            .await
            .map_err(|e| RelayError::Download(format!("failed to create temp file: {}", e)))?;

        let mut total: u64 = 0;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| RelayError::Download(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| RelayError::Download(format!("failed to write temp file: {}", e)))?;
            total += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| RelayError::Download(format!("failed to flush temp file: {}", e)))?;

        tmp.set_size_bytes(total);
        Ok(())
    }
}
