//! Server application state

use crate::auth::AuthVerifier;
use image_storage::{ImageUploadService, UploadConfig};

/// Shared by all workers; holds only immutable configuration
pub struct AppState {
    pub uploads: ImageUploadService,
    pub auth: AuthVerifier,
}

impl AppState {
    pub fn new(upload_config: UploadConfig, jwt_secret: Option<&str>) -> Self {
        let auth = match jwt_secret {
            Some(secret) => AuthVerifier::new(secret),
            None => AuthVerifier::disabled(),
        };

        Self {
            uploads: ImageUploadService::new(upload_config),
            auth,
        }
    }
}
