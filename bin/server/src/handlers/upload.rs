use crate::constants::EVENT_IMAGE_CATEGORY;
use crate::handlers::error::handle_bad_request;
use crate::handlers::upload_form::{open_upload, DeclaredFile, ImageBatchUploadForm, ImageUploadForm};
use crate::state::AppState;
use actix_multipart::form::MultipartForm;
use actix_web::{post, web, HttpResponse, Result as ActixResult};
use common::UploadResult;
use image_storage::ImageUploadService;
use tracing::info;

/// Upload a single event image (multipart/form-data, field `file`)
#[post("/event-image")]
pub async fn upload_event_image(
    form: MultipartForm<ImageUploadForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let ImageUploadForm { file } = form.into_inner();
    let declared = DeclaredFile::from_temp_file(&file);

    // Structured logging with Debug formatter escapes control characters
    info!(
        file_name = ?declared.file_name,
        content_type = ?declared.content_type,
        size = declared.size,
        "POST /upload/event-image - Request received"
    );

    let validation = state.uploads.validate(
        &declared.file_name,
        declared.content_type.as_deref(),
        declared.size as i64,
    );
    if !validation.is_valid {
        let message = validation.error_message.unwrap_or_default();
        return Ok(HttpResponse::BadRequest().json(UploadResult::failed(message)));
    }

    let result = match open_upload(&file).await {
        Ok(upload) => {
            state
                .uploads
                .upload_image(upload, EVENT_IMAGE_CATEGORY)
                .await
        }
        Err(e) => ImageUploadService::report(Some(&declared.file_name), Err(e)),
    };

    if result.success {
        Ok(HttpResponse::Ok().json(result))
    } else {
        Ok(HttpResponse::BadRequest().json(result))
    }
}

/// Upload several event images (multipart/form-data, repeated field `files`).
/// Every file gets its own result, in the order the files were sent.
#[post("/event-images")]
pub async fn upload_event_images(
    form: MultipartForm<ImageBatchUploadForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let ImageBatchUploadForm { files } = form.into_inner();
    if files.is_empty() {
        return Err(handle_bad_request("No files provided"));
    }

    info!(
        count = files.len(),
        "POST /upload/event-images - Request received"
    );

    let mut uploads = Vec::with_capacity(files.len());
    for file in &files {
        uploads.push(open_upload(file).await);
    }

    let results = state
        .uploads
        .upload_batch(uploads, EVENT_IMAGE_CATEGORY)
        .await;

    info!(
        stored = results.iter().filter(|r| r.success).count(),
        total = results.len(),
        "POST /upload/event-images - Batch processed"
    );

    Ok(HttpResponse::Ok().json(results))
}
