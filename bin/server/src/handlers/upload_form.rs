use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use image_storage::{ImageUpload, UploadError};

/// Multipart form for a single image upload
#[derive(MultipartForm)]
pub struct ImageUploadForm {
    /// The image being uploaded
    pub file: TempFile,
}

/// Multipart form for a batch upload, one `files` part per image
#[derive(MultipartForm)]
pub struct ImageBatchUploadForm {
    pub files: Vec<TempFile>,
}

/// Metadata the client declared for one uploaded part
#[derive(Debug, Clone)]
pub struct DeclaredFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl DeclaredFile {
    pub fn from_temp_file(file: &TempFile) -> Self {
        Self {
            file_name: file.file_name.clone().unwrap_or_default(),
            content_type: file
                .content_type
                .as_ref()
                .map(|mime| mime.essence_str().to_string()),
            size: file.size as u64,
        }
    }
}

/// Reopen a spooled part as an async reader for the upload service.
/// A part that cannot be read back is an I/O failure of that upload only.
pub async fn open_upload(file: &TempFile) -> Result<ImageUpload<tokio::fs::File>, UploadError> {
    let declared = DeclaredFile::from_temp_file(file);
    let path = file.file.path();
    let reader = tokio::fs::File::open(path).await.map_err(|e| {
        UploadError::Io(
            anyhow::Error::new(e).context(format!("Failed to reopen spooled part {:?}", path)),
        )
    })?;
    Ok(ImageUpload::new(
        reader,
        declared.file_name,
        declared.content_type,
        declared.size,
    ))
}
