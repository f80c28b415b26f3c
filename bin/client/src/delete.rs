use crate::constants::DELETE_ENDPOINT;
use anyhow::{Context, Result};
use common::DeleteImageResponse;
use log::info;
use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Ask the server to delete an uploaded image by its URL.
/// Returns false when the server reports it as not found.
pub fn delete_image(server: &str, token: Option<&str>, image_url: &str) -> Result<bool> {
    let url = format!("{}{}", server.trim_end_matches('/'), DELETE_ENDPOINT);

    let mut request = Client::new().delete(&url).query(&[("imageUrl", image_url)]);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let response = request.send().context("Failed to connect to server")?;

    let status = response.status();
    if status != StatusCode::OK && status != StatusCode::NOT_FOUND {
        let error_text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        anyhow::bail!("Delete failed for {}: {} - {}", image_url, status, error_text);
    }

    let body: DeleteImageResponse = response
        .json()
        .context("Failed to parse delete response")?;

    info!("Delete {}: {}", image_url, body.message);
    Ok(body.success)
}
