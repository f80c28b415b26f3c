//! Image upload service: validation, signature check, secure naming and placement

use crate::config::UploadConfig;
use crate::filesystem::FilesystemStorage;
use crate::formats::ImageFormat;
use crate::validation::{
    file_too_large_message, validate_image, ValidationResult, INVALID_EXTENSION_MESSAGE,
};
use crate::{Storage, StoreOutcome};
use common::file_utils::{extension_of, validate_segment};
use common::UploadResult;
use rand::rngs::OsRng;
use rand::RngCore;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{error, info, warn};

/// Category used when the caller does not pick one
pub const DEFAULT_CATEGORY: &str = "events";

/// Public URL prefix under which the upload root is served
pub const URL_PREFIX: &str = "/uploads";

/// Reasons an upload is refused. Only `Io` hides its cause from the caller.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid upload category.")]
    InvalidCategory,
    #[error("Invalid file content. File does not match its extension.")]
    ContentMismatch,
    #[error("{}", file_too_large_message(*.0))]
    TooLarge(u64),
    #[error("An error occurred while uploading the image.")]
    Io(anyhow::Error),
}

/// A successfully stored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub file_name: String,
    pub file_size: u64,
}

impl From<StoredImage> for UploadResult {
    fn from(stored: StoredImage) -> Self {
        UploadResult::stored(stored.url, stored.file_name, stored.file_size)
    }
}

/// One incoming image: a byte stream plus the metadata the client declared
#[derive(Debug)]
pub struct ImageUpload<R> {
    pub reader: R,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl<R> ImageUpload<R> {
    pub fn new(
        reader: R,
        file_name: impl Into<String>,
        content_type: Option<String>,
        size: u64,
    ) -> Self {
        Self {
            reader,
            file_name: file_name.into(),
            content_type,
            size,
        }
    }
}

/// Validates and stores uploaded images under `<root>/<category>/<random>.<ext>`
pub struct ImageUploadService {
    config: UploadConfig,
    storage: Arc<dyn Storage>,
}

impl ImageUploadService {
    /// Create a service storing into the configured upload path
    pub fn new(config: UploadConfig) -> Self {
        let storage = Arc::new(FilesystemStorage::new(config.upload_path.clone()));
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: UploadConfig, storage: Arc<dyn Storage>) -> Self {
        Self { config, storage }
    }

    /// Check declared metadata only; never looks at content
    pub fn validate(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        file_size: i64,
    ) -> ValidationResult {
        validate_image(
            file_name,
            content_type,
            file_size,
            self.config.max_file_size_bytes,
        )
    }

    /// Upload one image. Failures of any kind come back as a failed result.
    pub async fn upload_image<R>(&self, upload: ImageUpload<R>, category: &str) -> UploadResult
    where
        R: AsyncRead + Send + Unpin,
    {
        let file_name = upload.file_name.clone();
        let outcome = self.try_upload(upload, category).await;
        Self::report(Some(&file_name), outcome)
    }

    /// Upload several images in order; one failure does not stop the rest.
    /// Entries that already failed before reaching the service (a part that
    /// could not be read back, say) get their failure result in place.
    pub async fn upload_batch<R>(
        &self,
        uploads: Vec<Result<ImageUpload<R>, UploadError>>,
        category: &str,
    ) -> Vec<UploadResult>
    where
        R: AsyncRead + Send + Unpin,
    {
        let mut results = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let result = match upload {
                Ok(upload) => self.upload_image(upload, category).await,
                Err(e) => Self::report(None, Err(e)),
            };
            results.push(result);
        }
        results
    }

    /// Log an upload outcome and turn it into its wire result.
    /// I/O causes are logged and replaced by the generic message.
    pub fn report(
        file_name: Option<&str>,
        outcome: Result<StoredImage, UploadError>,
    ) -> UploadResult {
        match outcome {
            Ok(stored) => {
                info!(
                    file_name = ?file_name,
                    url = %stored.url,
                    size = stored.file_size,
                    "Image uploaded"
                );
                stored.into()
            }
            Err(UploadError::Io(e)) => {
                error!(file_name = ?file_name, "Error uploading image: {:#}", e);
                UploadResult::failed(UploadError::Io(e).to_string())
            }
            Err(e) => {
                info!(file_name = ?file_name, reason = %e, "Image rejected");
                UploadResult::failed(e.to_string())
            }
        }
    }

    /// Typed upload path behind `upload_image`
    pub async fn try_upload<R>(
        &self,
        upload: ImageUpload<R>,
        category: &str,
    ) -> Result<StoredImage, UploadError>
    where
        R: AsyncRead + Send + Unpin,
    {
        let ImageUpload {
            mut reader,
            file_name,
            content_type,
            size,
        } = upload;

        let declared_size = i64::try_from(size).unwrap_or(i64::MAX);
        let validation = self.validate(&file_name, content_type.as_deref(), declared_size);
        if !validation.is_valid {
            return Err(UploadError::Validation(
                validation.error_message.unwrap_or_default(),
            ));
        }

        validate_segment(category).map_err(|_| UploadError::InvalidCategory)?;

        let extension = extension_of(&file_name)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let format = ImageFormat::from_extension(&extension)
            .ok_or_else(|| UploadError::Validation(INVALID_EXTENSION_MESSAGE.to_string()))?;

        let header = read_header(&mut reader, format.header_len())
            .await
            .map_err(|e| UploadError::Io(anyhow::Error::new(e).context("Failed to read header")))?;

        if !format.matches_signature(&header) {
            return Err(UploadError::ContentMismatch);
        }

        let stored_name = generate_secure_file_name(&extension);

        // Header bytes were consumed, put them back in front of the rest
        let mut body = Cursor::new(header).chain(reader);
        let outcome = self
            .storage
            .store(
                category,
                &stored_name,
                &mut body,
                size,
                self.config.max_file_size_bytes,
            )
            .await
            .map_err(UploadError::Io)?;

        match outcome {
            StoreOutcome::Stored { bytes } => Ok(StoredImage {
                url: format!("{}/{}/{}", URL_PREFIX, category, stored_name),
                file_name: stored_name,
                file_size: bytes,
            }),
            StoreOutcome::TooLarge => Err(UploadError::TooLarge(self.config.max_file_size_mb())),
        }
    }

    /// Delete an image by the URL `upload_image` returned.
    /// Blank, malformed or unknown URLs yield false.
    pub async fn delete_image(&self, image_url: &str) -> bool {
        let image_url = image_url.trim();
        if image_url.is_empty() {
            return false;
        }

        let Some((category, name)) = parse_image_url(image_url) else {
            warn!(image_url = ?image_url, "Refusing to delete image outside the upload root");
            return false;
        };

        match self.storage.delete(category, name).await {
            Ok(true) => {
                info!(image_url = ?image_url, "Image deleted");
                true
            }
            Ok(false) => {
                warn!(image_url = ?image_url, "Image not found for deletion");
                false
            }
            Err(e) => {
                error!(image_url = ?image_url, "Error deleting image: {:#}", e);
                false
            }
        }
    }
}

/// Read up to `len` leading bytes, fewer only if the stream ends first
async fn read_header<R>(reader: &mut R, len: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut header = Vec::with_capacity(len);
    (&mut *reader).take(len as u64).read_to_end(&mut header).await?;
    Ok(header)
}

/// 128 random bits as lowercase hex, followed by the extension
fn generate_secure_file_name(extension: &str) -> String {
    let mut token = [0u8; 16];
    OsRng.fill_bytes(&mut token);
    format!("{}.{}", hex::encode(token), extension.to_ascii_lowercase())
}

/// Map `/uploads/<category>/<name>` (leading slash and `uploads/` optional)
/// to its two path segments. Anything that would not stay one level below
/// the upload root, or that names a hidden file, is rejected.
fn parse_image_url(image_url: &str) -> Option<(&str, &str)> {
    let relative = image_url.trim_start_matches('/');
    let relative = relative.strip_prefix("uploads/").unwrap_or(relative);
    let (category, name) = relative.split_once('/')?;
    validate_segment(category).ok()?;
    validate_segment(name).ok()?;
    // Dot names are in-flight temp files, never published images
    if name.starts_with('.') {
        return None;
    }
    Some((category, name))
}
