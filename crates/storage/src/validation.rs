//! Metadata checks run before any image content is read

use crate::config::BYTES_PER_MB;
use crate::formats::ImageFormat;
use common::file_utils::extension_of;

pub const EMPTY_FILE_MESSAGE: &str = "File is empty.";
pub const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Allowed types: JPG, PNG, GIF, WebP.";
pub const INVALID_EXTENSION_MESSAGE: &str =
    "Invalid file extension. Allowed extensions: .jpg, .jpeg, .png, .gif, .webp";
pub const EXTENSION_MISMATCH_MESSAGE: &str = "File extension does not match content type.";

/// Size error message, `max_mb` is the limit in whole megabytes
pub fn file_too_large_message(max_mb: u64) -> String {
    format!("File size exceeds maximum allowed size of {}MB.", max_mb)
}

/// Result of image metadata validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(error_message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(error_message.into()),
        }
    }
}

/// Validate declared image metadata. The first failing check wins:
/// size, MIME type, extension, then extension/MIME agreement.
pub fn validate_image(
    file_name: &str,
    content_type: Option<&str>,
    file_size: i64,
    max_file_size_bytes: u64,
) -> ValidationResult {
    if file_size <= 0 {
        return ValidationResult::invalid(EMPTY_FILE_MESSAGE);
    }

    if file_size as u64 > max_file_size_bytes {
        return ValidationResult::invalid(file_too_large_message(
            max_file_size_bytes / BYTES_PER_MB,
        ));
    }

    let declared = match content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .and_then(ImageFormat::from_mime_type)
    {
        Some(format) => format,
        None => return ValidationResult::invalid(INVALID_TYPE_MESSAGE),
    };

    let actual = match extension_of(file_name).and_then(ImageFormat::from_extension) {
        Some(format) => format,
        None => return ValidationResult::invalid(INVALID_EXTENSION_MESSAGE),
    };

    if declared != actual {
        return ValidationResult::invalid(EXTENSION_MISMATCH_MESSAGE);
    }

    ValidationResult::valid()
}
