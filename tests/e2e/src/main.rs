mod filesystem_validator;
mod test_utils;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use test_utils::*;

const EVENT_CATEGORY: &str = "events";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("e2e_tests=debug,info")
        .init();

    println!("🖼️  Running E2E tests against the image upload server...");
    run_upload_tests().await?;

    println!("\n✅ All E2E tests passed!");

    Ok(())
}

async fn run_upload_tests() -> Result<()> {
    let server_url =
        std::env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .context("Failed to locate workspace root")?
        .to_path_buf();
    let upload_dir = std::env::var("UPLOAD_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| workspace_root.join("uploads"));
    let jwt_secret = std::env::var("JWT_SECRET").ok();
    let client_binary = workspace_root.join("target").join("release").join("client");

    let test_data_dir = manifest_dir.join("test_data");
    let test_files_dir = test_data_dir.join("images");
    std::fs::create_dir_all(&test_files_dir)?;

    println!("Server URL: {}", server_url);
    println!("Upload dir: {:?}", upload_dir);
    println!("Client binary: {:?}", client_binary);
    println!(
        "Admin auth: {}",
        if jwt_secret.is_some() { "enabled" } else { "disabled" }
    );

    wait_for_server(&server_url).await?;

    let images = create_test_images(&test_files_dir)?;
    let token = admin_token(jwt_secret.as_deref())?;
    let token = token.as_deref();

    // URLs of everything stored so far, removed again at the end
    let mut stored_urls: Vec<String> = Vec::new();

    let test_result = async {
        println!("\n📤 Testing single upload...");
        let (ok, results) = upload_images(&client_binary, &server_url, token, &[&images.png])?;
        let result = results.first().context("Single upload returned no result")?;
        if !ok || !result.success {
            anyhow::bail!("Single upload failed: {:?}", result.error_message);
        }
        let url = result.url.clone().context("Stored image has no URL")?;
        stored_urls.push(url.clone());

        println!("\n🔍 Validating stored image...");
        let file_name = result.file_name.as_deref().context("Stored image has no name")?;
        filesystem_validator::validate_generated_name(file_name, "png")?;
        filesystem_validator::validate_stored_image(&upload_dir, &url, &images.png)?;
        println!("✅ Single upload validation passed");

        println!("\n📤 Testing batch upload with a disguised file...");
        let (ok, results) = upload_images(
            &client_binary,
            &server_url,
            token,
            &[&images.jpeg, &images.disguised, &images.gif],
        )?;
        if ok {
            anyhow::bail!("Client reported success although one image is disguised");
        }
        if results.len() != 3 {
            anyhow::bail!("Expected 3 batch results, got {}", results.len());
        }
        if !results[0].success || results[1].success || !results[2].success {
            anyhow::bail!(
                "Unexpected batch outcome: {:?}",
                results.iter().map(|r| r.success).collect::<Vec<_>>()
            );
        }
        println!(
            "  ✓ Disguised image rejected: {}",
            results[1].error_message.as_deref().unwrap_or_default()
        );

        for (result, original, extension) in [
            (&results[0], &images.jpeg, "jpg"),
            (&results[2], &images.gif, "gif"),
        ] {
            let url = result.url.clone().context("Stored image has no URL")?;
            stored_urls.push(url.clone());
            let file_name = result.file_name.as_deref().context("Stored image has no name")?;
            filesystem_validator::validate_generated_name(file_name, extension)?;
            filesystem_validator::validate_stored_image(&upload_dir, &url, original)?;
        }
        filesystem_validator::validate_no_partial_files(&upload_dir, EVENT_CATEGORY)?;
        println!("✅ Batch upload validation passed");

        println!("\n🗑️  Testing delete...");
        let url = stored_urls.remove(0);
        if !delete_image(&client_binary, &server_url, token, &url)? {
            anyhow::bail!("Server did not find freshly uploaded image {}", url);
        }
        filesystem_validator::validate_deleted(&upload_dir, &url)?;
        if delete_image(&client_binary, &server_url, token, &url)? {
            anyhow::bail!("Deleting {} twice succeeded", url);
        }
        println!("  ✓ Second delete reports not found");

        let escape = format!("/uploads/{}/../../Cargo.toml", EVENT_CATEGORY);
        if delete_image(&client_binary, &server_url, token, &escape)? {
            anyhow::bail!("Delete escaped the upload directory with {}", escape);
        }
        println!("  ✓ Traversal URL rejected");
        println!("✅ Delete validation passed");

        Ok::<(), anyhow::Error>(())
    };

    let result = test_result.await;

    // Always cleanup, even on error
    for url in &stored_urls {
        if let Err(e) = delete_image(&client_binary, &server_url, token, url) {
            eprintln!("Warning: Failed to delete {}: {}", url, e);
        }
    }
    if let Err(e) = cleanup_test_data(&test_data_dir) {
        eprintln!("Warning: Failed to cleanup test data: {}", e);
    }

    result
}

fn cleanup_test_data(test_data_dir: &Path) -> Result<()> {
    let keep_data = std::env::var("KEEP_TEST_DATA").unwrap_or_else(|_| "false".to_string());
    if keep_data == "true" {
        println!(
            "\n⚠️  Keeping test data (KEEP_TEST_DATA=true): {:?}",
            test_data_dir
        );
        return Ok(());
    }

    println!("\n🧹 Cleaning up test data: {:?}", test_data_dir);
    if test_data_dir.exists() {
        std::fs::remove_dir_all(test_data_dir).with_context(|| {
            format!("Failed to remove test data directory: {:?}", test_data_dir)
        })?;
        println!("✅ Test data cleaned up");
    }
    Ok(())
}
