use crate::constants::{BATCH_UPLOAD_ENDPOINT, UPLOAD_ENDPOINT};
use anyhow::{Context, Result};
use common::file_utils;
use common::UploadResult;
use log::info;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};

/// Handles image uploads to the server
pub struct ImageUploader {
    server: String,
    token: Option<String>,
    client: Client,
}

impl ImageUploader {
    /// Create a new image uploader
    pub fn new(server: String, token: Option<String>) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    /// Upload local images. One file goes to the single upload endpoint,
    /// several go to the batch endpoint in one request.
    pub fn upload(&self, paths: &[PathBuf]) -> Result<Vec<UploadResult>> {
        match paths {
            [] => anyhow::bail!("No files given"),
            [path] => Ok(vec![self.upload_single(path)?]),
            _ => self.upload_batch(paths),
        }
    }

    fn upload_single(&self, path: &Path) -> Result<UploadResult> {
        let form = multipart::Form::new().part("file", Self::build_part(path)?);

        let url = format!("{}{}", self.server, UPLOAD_ENDPOINT);
        let response = self
            .authorized(self.client.post(&url))
            .multipart(form)
            .send()
            .context("Failed to connect to server")?;

        // A rejected image still comes back as an UploadResult
        let response = Self::accept_statuses(response, &[StatusCode::BAD_REQUEST])?;
        let result: UploadResult = response.json().context("Failed to parse upload response")?;

        info!("Uploaded {:?}: success={}", path, result.success);
        Ok(result)
    }

    fn upload_batch(&self, paths: &[PathBuf]) -> Result<Vec<UploadResult>> {
        let mut form = multipart::Form::new();
        for path in paths {
            form = form.part("files", Self::build_part(path)?);
        }

        let url = format!("{}{}", self.server, BATCH_UPLOAD_ENDPOINT);
        let response = self
            .authorized(self.client.post(&url))
            .multipart(form)
            .send()
            .context("Failed to connect to server")?;

        let response = Self::accept_statuses(response, &[])?;
        let results: Vec<UploadResult> =
            response.json().context("Failed to parse batch upload response")?;

        info!(
            "Batch upload processed {} files ({} stored)",
            results.len(),
            results.iter().filter(|r| r.success).count()
        );
        Ok(results)
    }

    /// Build a multipart part carrying the local file name and guessed MIME type
    fn build_part(path: &Path) -> Result<multipart::Part> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Invalid file path: {:?}", path))?;

        let content = fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
        let content_type = file_utils::content_type_for(&file_name);

        multipart::Part::bytes(content)
            .file_name(file_name)
            .mime_str(content_type)
            .context("Failed to set MIME type")
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Pass through successful responses and the listed statuses, fail otherwise
    fn accept_statuses(response: Response, allowed: &[StatusCode]) -> Result<Response> {
        let status = response.status();
        if status.is_success() || allowed.contains(&status) {
            return Ok(response);
        }
        let error_text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        anyhow::bail!("Request failed: {} - {}", status, error_text);
    }
}

/// Print one line per upload result
pub fn print_results(paths: &[PathBuf], results: &[UploadResult]) {
    for (path, result) in paths.iter().zip(results) {
        match (&result.url, &result.error_message) {
            (Some(url), _) if result.success => {
                println!("{} -> {} ({} bytes)", path.display(), url, result.file_size)
            }
            (_, error) => println!(
                "{} failed: {}",
                path.display(),
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
