mod auth;
mod config;
mod constants;
mod handlers;
mod state;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, App, HttpServer};
use config::ServerConfig;
use constants::{MAX_BATCH_FILES, MULTIPART_OVERHEAD_BYTES};
use state::AppState;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing with env filter
    // Filter out actix-server worker shutdown messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,actix_server::worker=warn,actix_server::accept=warn")
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting event image upload server (PID: {})",
        std::process::id()
    );

    let config = ServerConfig::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    std::fs::create_dir_all(&config.upload.upload_path).map_err(|e| {
        error!(
            "Failed to create upload directory {:?}: {}",
            config.upload.upload_path, e
        );
        e
    })?;
    info!(
        "Using upload directory {:?} (max file size: {} bytes)",
        config.upload.upload_path, config.upload.max_file_size_bytes
    );

    // Files are spooled to disk; the total limit bounds a full batch
    let multipart_limit = config
        .upload
        .max_file_size_bytes
        .saturating_mul(MAX_BATCH_FILES)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let multipart_limit = usize::try_from(multipart_limit).unwrap_or(usize::MAX);

    let state = web::Data::new(AppState::new(
        config.upload.clone(),
        config.jwt_secret.as_deref(),
    ));

    if !state.auth.is_enabled() {
        warn!("No JWT secret configured; admin upload endpoints are NOT protected");
    }

    let bind_address = config.bind_address();
    info!("Starting server on http://{}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(MultipartFormConfig::default().total_limit(multipart_limit))
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .map_err(|e| {
        error!("Failed to bind to {}: {}", bind_address, e);
        e
    })?;

    info!("Server bound successfully to http://{}", bind_address);

    server.run().await
}
