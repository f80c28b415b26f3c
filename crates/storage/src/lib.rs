pub mod config;
pub mod filesystem;
pub mod formats;
pub mod service;
pub mod validation;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

pub use common::UploadResult;
pub use config::UploadConfig;
pub use filesystem::FilesystemStorage;
pub use formats::ImageFormat;
pub use service::{ImageUpload, ImageUploadService, StoredImage, UploadError};
pub use validation::ValidationResult;

/// Result of writing an image body to storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The body was written and moved into place
    Stored { bytes: u64 },
    /// The body was longer than the limit; nothing was kept
    TooLarge,
}

/// Storage backend trait for uploaded image files
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `reader` to `<category>/<name>`, reading at most `limit` bytes.
    /// The file only becomes visible under `name` once it is fully written
    /// (temp file + fsync + rename). `size_hint` is the declared size, used
    /// for the free space check.
    async fn store(
        &self,
        category: &str,
        name: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        size_hint: u64,
        limit: u64,
    ) -> Result<StoreOutcome>;

    /// Remove `<category>/<name>`. Returns false if it did not exist.
    async fn delete(&self, category: &str, name: &str) -> Result<bool>;
}
