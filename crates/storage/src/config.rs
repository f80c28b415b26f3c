//! Upload service configuration

use std::path::PathBuf;

/// Default maximum accepted image size (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Default root directory for stored images
pub const DEFAULT_UPLOAD_PATH: &str = "uploads";

/// Environment variable for the maximum accepted image size in bytes
pub const MAX_FILE_SIZE_ENV: &str = "MAX_FILE_SIZE_BYTES";

/// Environment variable for the upload root directory
pub const UPLOAD_PATH_ENV: &str = "UPLOAD_PATH";

/// Bytes in the megabyte unit used by size messages
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Configuration of the image upload service, resolved once at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Maximum accepted image size in bytes
    pub max_file_size_bytes: u64,
    /// Root directory, images land in `<upload_path>/<category>/`
    pub upload_path: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            upload_path: PathBuf::from(DEFAULT_UPLOAD_PATH),
        }
    }
}

impl UploadConfig {
    pub fn new(max_file_size_bytes: u64, upload_path: impl Into<PathBuf>) -> Self {
        Self {
            max_file_size_bytes,
            upload_path: upload_path.into(),
        }
    }

    /// Load configuration from `MAX_FILE_SIZE_BYTES` and `UPLOAD_PATH`
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(MAX_FILE_SIZE_ENV).ok().as_deref(),
            std::env::var(UPLOAD_PATH_ENV).ok().as_deref(),
        )
    }

    /// Build configuration from raw option values.
    /// Missing, blank or unparsable values fall back to the defaults.
    pub fn from_values(max_file_size_bytes: Option<&str>, upload_path: Option<&str>) -> Self {
        let max_file_size_bytes = max_file_size_bytes
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES);

        let upload_path = upload_path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_PATH);

        Self::new(max_file_size_bytes, upload_path)
    }

    /// Maximum size in whole megabytes, as shown in error messages
    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_bytes / BYTES_PER_MB
    }
}
