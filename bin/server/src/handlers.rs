//! HTTP request handlers

pub mod delete;
pub mod error;
pub mod health;
pub mod upload;
pub mod upload_form;

use crate::auth::require_admin;
use crate::constants::UPLOAD_SCOPE;
use actix_web::middleware::from_fn;
use actix_web::web;

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health).service(
        web::scope(UPLOAD_SCOPE)
            .wrap(from_fn(require_admin))
            .service(upload::upload_event_image)
            .service(upload::upload_event_images)
            .service(delete::delete_image),
    );
}
