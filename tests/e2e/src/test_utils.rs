use anyhow::{Context, Result};
use common::utils::get_current_timestamp_secs;
use common::UploadResult;
use jsonwebtoken::{encode, EncodingKey, Header};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::Duration;
use tokio::time::sleep;

const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];
const GIF_HEADER: &[u8] = b"GIF89a";

/// Local images used by the scenario
pub struct TestImages {
    pub png: PathBuf,
    pub jpeg: PathBuf,
    pub gif: PathBuf,
    /// PNG bytes behind a `.jpg` name
    pub disguised: PathBuf,
}

fn image_bytes(header: &[u8], len: usize, fill: u8) -> Vec<u8> {
    let mut data = header.to_vec();
    data.resize(len, fill);
    data
}

pub fn create_test_images(dir: &Path) -> Result<TestImages> {
    let images = TestImages {
        png: dir.join("poster.png"),
        jpeg: dir.join("stage.JPG"),
        gif: dir.join("banner.gif"),
        disguised: dir.join("photo.jpg"),
    };

    let contents = [
        (&images.png, image_bytes(&PNG_HEADER, 4096, 0x11)),
        (&images.jpeg, image_bytes(&JPEG_HEADER, 2048, 0x22)),
        (&images.gif, image_bytes(GIF_HEADER, 1024, 0x33)),
        (&images.disguised, image_bytes(&PNG_HEADER, 512, 0x44)),
    ];
    for (path, data) in contents {
        fs::write(path, data)
            .with_context(|| format!("Failed to create test image: {:?}", path))?;
    }

    Ok(images)
}

pub async fn wait_for_server(url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", url);

    println!("Waiting for server to be ready...");
    for i in 0..30 {
        match client.get(&health_url).send().await {
            Ok(response) if response.status().is_success() => {
                println!("Server is ready!");
                return Ok(());
            }
            _ => {
                if i < 29 {
                    sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    anyhow::bail!("Server did not become ready within 30 seconds");
}

/// Mint an admin token when the server under test has a JWT secret
pub fn admin_token(secret: Option<&str>) -> Result<Option<String>> {
    let Some(secret) = secret else {
        return Ok(None);
    };

    let claims = serde_json::json!({
        "sub": "e2e-admin",
        "role": "Admin",
        "exp": get_current_timestamp_secs() + 3600,
    });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to sign admin token")?;

    Ok(Some(token))
}

fn client_command(client_binary: &Path, token: Option<&str>) -> Command {
    let mut command = Command::new(client_binary);
    command.env_remove("UPLOAD_TOKEN");
    if let Some(token) = token {
        command.env("UPLOAD_TOKEN", token);
    }
    command
}

/// Run `client upload --json` and parse the printed results.
/// A non-zero exit is expected whenever one of the files is rejected.
pub fn upload_images(
    client_binary: &Path,
    server_url: &str,
    token: Option<&str>,
    files: &[&Path],
) -> Result<(bool, Vec<UploadResult>)> {
    let output = client_command(client_binary, token)
        .arg("upload")
        .args(files)
        .arg("--server")
        .arg(server_url)
        .arg("--json")
        .output()
        .with_context(|| format!("Failed to run client binary: {:?}", client_binary))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let results: Vec<UploadResult> = serde_json::from_str(&stdout).with_context(|| {
        format!(
            "Upload printed no results:\nSTDOUT: {}\nSTDERR: {}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        )
    })?;

    Ok((output.status.success(), results))
}

/// Run `client delete` and report whether the server removed the image
pub fn delete_image(
    client_binary: &Path,
    server_url: &str,
    token: Option<&str>,
    image_url: &str,
) -> Result<bool> {
    let output: Output = client_command(client_binary, token)
        .arg("delete")
        .arg(image_url)
        .arg("--server")
        .arg(server_url)
        .output()
        .with_context(|| "Failed to run delete command")?;

    if output.status.success() {
        return Ok(true);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.contains("Image not found") {
        return Ok(false);
    }
    anyhow::bail!("Delete failed: {}", stderr);
}
