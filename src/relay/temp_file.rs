//! Scoped temporary file for one relay run
//!
//! The file is owned exclusively by one pipeline invocation. Removal is
//! attempted exactly once, either through an explicit [`TempMediaFile::cleanup`]
//! call or on drop (which also covers panics mid-write). A removal failure is
//! logged, never surfaced, so it cannot mask the pipeline's real outcome.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Keeps a resolution string safe for use inside a file name.
fn sanitize_for_filename(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// RAII guard for the downloaded media file.
#[derive(Debug)]
pub struct TempMediaFile {
    path: PathBuf,
    size_bytes: u64,
    removed: bool,
}

impl TempMediaFile {
    /// Reserves a unique path under `dir`, shaped `video_{resolution}_{uuid}.mp4`.
    /// The file itself is created by the downloader writing to the path.
    pub fn new_in(dir: &Path, resolution: &str) -> Self {
        let name = format!("video_{}_{}.mp4", sanitize_for_filename(resolution), Uuid::new_v4());
        Self {
            path: dir.join(name),
            size_bytes: 0,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn set_size_bytes(&mut self, size: u64) {
        self.size_bytes = size;
    }

    /// Removes the file if it exists. Runs at most once per guard; the drop
    /// impl skips removal after an explicit cleanup.
    pub fn cleanup(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;

        if !self.path.exists() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::info!("Removed temp media file: {}", self.path.display()),
            Err(e) => log::warn!("Failed to remove temp media file {}: {}", self.path.display(), e),
        }
    }
}

impl Drop for TempMediaFile {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cleanup_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut tmp = TempMediaFile::new_in(dir.path(), "720p");
        fs::write(tmp.path(), b"partial bytes").unwrap();
        assert!(tmp.path().exists());

        tmp.cleanup();
        assert!(!tmp.path().exists());
    }

    #[test]
    fn test_cleanup_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut tmp = TempMediaFile::new_in(dir.path(), "720p");
        // Download never started; nothing to remove
        tmp.cleanup();
        tmp.cleanup();
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path;
        {
            let tmp = TempMediaFile::new_in(dir.path(), "1080p");
            path = tmp.path().to_path_buf();
            fs::write(&path, b"bytes").unwrap();
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_file_on_panic() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = TempMediaFile::new_in(dir.path(), "480p");
        let path = tmp.path().to_path_buf();
        fs::write(&path, b"bytes").unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _tmp = tmp;
            panic!("mid-write crash");
        }));
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_filename_shape() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = TempMediaFile::new_in(dir.path(), "1280x720");
        let name = tmp.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("video_1280x720_"));
        assert!(name.ends_with(".mp4"));
    }
}
