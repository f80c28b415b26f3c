/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: &str = "8080";

/// Route scope of the admin upload endpoints
pub const UPLOAD_SCOPE: &str = "/api/admin/upload";

/// Category that event banner uploads are stored under
pub use image_storage::service::DEFAULT_CATEGORY as EVENT_IMAGE_CATEGORY;

/// Role claim value required on admin endpoints
pub const ADMIN_ROLE: &str = "Admin";

/// Most files accepted in one batch request, used to size the multipart limit
pub const MAX_BATCH_FILES: u64 = 20;

/// Headroom over the raw file bytes for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;
