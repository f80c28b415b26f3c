//! Filesystem-based storage implementation

use crate::{StoreOutcome, Storage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::warn;

/// Filesystem-based storage rooted at the upload directory
pub struct FilesystemStorage {
    upload_dir: PathBuf,
}

impl FilesystemStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    fn get_category_dir(&self, category: &str) -> PathBuf {
        self.upload_dir.join(category)
    }

    fn get_temp_path(category_dir: &Path, name: &str) -> PathBuf {
        category_dir.join(format!(".{}.part", name))
    }

    /// Fail early when the volume cannot hold the declared file
    fn ensure_capacity(dir: &Path, needed: u64) -> Result<()> {
        let available = fs2::available_space(dir)
            .with_context(|| format!("Failed to query free space for {:?}", dir))?;
        if available < needed {
            anyhow::bail!(
                "Insufficient disk space in {:?}: {} bytes needed, {} available",
                dir,
                needed,
                available
            );
        }
        Ok(())
    }

    /// Copy at most `limit` bytes into `temp_path` and fsync it.
    /// Returns None when the reader had more than `limit` bytes.
    async fn write_temp(
        temp_path: &Path,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        limit: u64,
    ) -> Result<Option<u64>> {
        let mut file = tokio::fs::File::create(temp_path)
            .await
            .with_context(|| format!("Failed to create temporary file {:?}", temp_path))?;

        let mut limited = reader.take(limit.saturating_add(1));
        let written = tokio::io::copy(&mut limited, &mut file)
            .await
            .context("Failed to write image data")?;

        if written > limit {
            return Ok(None);
        }

        file.sync_all()
            .await
            .context("Failed to sync image file to disk")?;

        Ok(Some(written))
    }

    async fn remove_temp(temp_path: &Path) {
        if let Err(e) = tokio::fs::remove_file(temp_path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove temporary file {:?}: {}", temp_path, e);
            }
        }
    }
}

#[async_trait]
impl Storage for FilesystemStorage {
    async fn store(
        &self,
        category: &str,
        name: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        size_hint: u64,
        limit: u64,
    ) -> Result<StoreOutcome> {
        let category_dir = self.get_category_dir(category);
        tokio::fs::create_dir_all(&category_dir)
            .await
            .with_context(|| format!("Failed to create category directory {:?}", category_dir))?;

        Self::ensure_capacity(&category_dir, size_hint)?;

        let temp_path = Self::get_temp_path(&category_dir, name);
        let file_path = category_dir.join(name);

        let written = match Self::write_temp(&temp_path, reader, limit).await {
            Ok(Some(written)) => written,
            Ok(None) => {
                Self::remove_temp(&temp_path).await;
                return Ok(StoreOutcome::TooLarge);
            }
            Err(e) => {
                Self::remove_temp(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&temp_path, &file_path).await {
            Self::remove_temp(&temp_path).await;
            return Err(e).with_context(|| format!("Failed to move image into {:?}", file_path));
        }

        Ok(StoreOutcome::Stored { bytes: written })
    }

    async fn delete(&self, category: &str, name: &str) -> Result<bool> {
        let file_path = self.get_category_dir(category).join(name);
        match tokio::fs::remove_file(&file_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to delete file: {:?}", file_path)),
        }
    }
}
