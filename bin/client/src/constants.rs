/// Default server URL
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Environment variable holding the admin bearer token
pub const TOKEN_ENV: &str = "UPLOAD_TOKEN";

/// Single image upload endpoint path
pub const UPLOAD_ENDPOINT: &str = "/api/admin/upload/event-image";

/// Batch image upload endpoint path
pub const BATCH_UPLOAD_ENDPOINT: &str = "/api/admin/upload/event-images";

/// Image delete endpoint path
pub const DELETE_ENDPOINT: &str = "/api/admin/upload/image";
