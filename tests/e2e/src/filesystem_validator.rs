use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Map a public `/uploads/<category>/<name>` URL onto the server's upload root
pub fn stored_path(upload_dir: &Path, image_url: &str) -> Result<PathBuf> {
    let relative = image_url
        .strip_prefix("/uploads/")
        .with_context(|| format!("Unexpected image URL: {}", image_url))?;

    let (category, name) = relative
        .split_once('/')
        .with_context(|| format!("Image URL has no category: {}", image_url))?;

    Ok(upload_dir.join(category).join(name))
}

pub fn validate_stored_image(upload_dir: &Path, image_url: &str, original: &Path) -> Result<()> {
    let stored = stored_path(upload_dir, image_url)?;
    if !stored.is_file() {
        anyhow::bail!("Stored image does not exist: {:?}", stored);
    }

    let stored_bytes =
        fs::read(&stored).with_context(|| format!("Failed to read stored image: {:?}", stored))?;
    let original_bytes = fs::read(original)
        .with_context(|| format!("Failed to read original image: {:?}", original))?;

    if stored_bytes != original_bytes {
        anyhow::bail!(
            "Stored image {:?} differs from {:?} ({} vs {} bytes)",
            stored,
            original,
            stored_bytes.len(),
            original_bytes.len()
        );
    }

    println!("  ✓ {} matches {:?}", image_url, original);
    Ok(())
}

/// The generated name is 32 lowercase hex characters plus the lower-cased extension
pub fn validate_generated_name(file_name: &str, expected_extension: &str) -> Result<()> {
    let (stem, extension) = file_name
        .rsplit_once('.')
        .with_context(|| format!("Generated name has no extension: {}", file_name))?;

    if stem.len() != 32 || !stem.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        anyhow::bail!("Generated name is not 32 hex characters: {}", file_name);
    }
    if extension != expected_extension {
        anyhow::bail!(
            "Expected extension {} in generated name {}",
            expected_extension,
            file_name
        );
    }

    println!("  ✓ Generated name {} is well formed", file_name);
    Ok(())
}

pub fn validate_deleted(upload_dir: &Path, image_url: &str) -> Result<()> {
    let stored = stored_path(upload_dir, image_url)?;
    if stored.exists() {
        anyhow::bail!("Image still exists after delete: {:?}", stored);
    }

    println!("  ✓ {} removed from disk", image_url);
    Ok(())
}

/// Interrupted writes must not leave `.part` files in a category directory
pub fn validate_no_partial_files(upload_dir: &Path, category: &str) -> Result<()> {
    let category_dir = upload_dir.join(category);
    if !category_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(&category_dir)
        .with_context(|| format!("Failed to list {:?}", category_dir))?
    {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".part") {
            anyhow::bail!("Partial upload left behind: {:?}", category_dir.join(&*name));
        }
    }

    println!("  ✓ No partial files under {:?}", category_dir);
    Ok(())
}
