//! Scratch storage for uploaded resumes.
//!
//! Every upload lands in a `NamedTempFile`, which deletes the file when dropped.
//! With retention enabled the file is kept and its path handed back instead.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

/// Something that can write an uploaded document's bytes to a local path.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn download_to(&self, dest: &Path) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct UploadDir {
    dir: PathBuf,
    retain: bool,
}

impl UploadDir {
    pub fn new(dir: PathBuf, retain: bool) -> Self {
        Self { dir, retain }
    }

    /// A fresh scratch file, removed on drop unless passed to `finish`.
    pub fn scratch_file(&self) -> io::Result<NamedTempFile> {
        tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile_in(&self.dir)
    }

    /// Deletes the scratch file, or keeps it and returns its path when retaining.
    pub fn finish(&self, file: NamedTempFile) -> io::Result<Option<PathBuf>> {
        if !self.retain {
            file.close()?;
            return Ok(None);
        }
        let (_, path) = file.keep().map_err(|e| e.error)?;
        Ok(Some(path))
    }
}
