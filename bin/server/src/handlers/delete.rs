use crate::state::AppState;
use actix_web::{delete, web, HttpResponse, Result as ActixResult};
use common::{DeleteImageQuery, DeleteImageResponse};
use tracing::info;

/// Delete a previously uploaded image by its URL (`?imageUrl=/uploads/...`)
#[delete("/image")]
pub async fn delete_image(
    query: web::Query<DeleteImageQuery>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let image_url = query.into_inner().image_url.unwrap_or_default();

    info!(image_url = ?image_url, "DELETE /upload/image - Request received");

    if state.uploads.delete_image(&image_url).await {
        Ok(HttpResponse::Ok().json(DeleteImageResponse {
            success: true,
            message: "Image deleted successfully.".to_string(),
        }))
    } else {
        Ok(HttpResponse::NotFound().json(DeleteImageResponse {
            success: false,
            message: "Image not found.".to_string(),
        }))
    }
}
