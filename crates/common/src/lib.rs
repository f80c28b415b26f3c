pub mod file_utils;
pub mod utils;

use serde::{Deserialize, Serialize};

/// Outcome of a single image upload, as returned by the upload endpoints
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub url: Option<String>,       // e.g. /uploads/events/<hex>.png
    pub file_name: Option<String>, // Generated storage name, never the client's name
    pub file_size: u64,
    pub error_message: Option<String>,
}

impl UploadResult {
    pub fn stored(url: String, file_name: String, file_size: u64) -> Self {
        Self {
            success: true,
            url: Some(url),
            file_name: Some(file_name),
            file_size,
            error_message: None,
        }
    }

    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            file_name: None,
            file_size: 0,
            error_message: Some(error_message.into()),
        }
    }
}

/// Query parameters for image deletion
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageQuery {
    pub image_url: Option<String>,
}

/// Response from the delete endpoint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeleteImageResponse {
    pub success: bool,
    pub message: String,
}

/// Error body for requests rejected before reaching the upload service
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response from health check endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String, // "ok" when healthy
}
