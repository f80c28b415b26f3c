use crate::auth::AuthError;
use actix_web::error::InternalError;
use actix_web::HttpResponse;
use common::ErrorResponse;
use tracing::warn;

fn json_error(response: HttpResponse, message: String) -> actix_web::Error {
    InternalError::from_response(message, response).into()
}

/// Helper function for authentication and authorization errors
pub fn handle_auth_error(e: AuthError) -> actix_web::Error {
    warn!("Admin request rejected: {}", e);
    let body = ErrorResponse {
        error: e.to_string(),
    };
    let response = match e {
        AuthError::Forbidden => HttpResponse::Forbidden().json(body),
        AuthError::MissingToken | AuthError::InvalidToken(_) => {
            HttpResponse::Unauthorized().json(body)
        }
    };
    json_error(response, e.to_string())
}

/// Helper function for bad request errors
pub fn handle_bad_request(msg: &str) -> actix_web::Error {
    warn!("Bad request: {}", msg);
    json_error(
        HttpResponse::BadRequest().json(ErrorResponse {
            error: msg.to_string(),
        }),
        msg.to_string(),
    )
}
