use std::path::Path;

/// Error type for path segment validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentValidationError {
    Empty,
    ContainsNullByte,
    ContainsPathSeparator,
    IsSpecialDirectory,
    InvalidSegment,
}

impl SegmentValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            SegmentValidationError::Empty => "Path segment cannot be empty",
            SegmentValidationError::ContainsNullByte => "Path segment cannot contain null bytes",
            SegmentValidationError::ContainsPathSeparator => {
                "Path segment cannot contain path separators (/ or \\)"
            }
            SegmentValidationError::IsSpecialDirectory => "Path segment cannot be '.' or '..'",
            SegmentValidationError::InvalidSegment => "Invalid path segment",
        }
    }
}

impl std::fmt::Display for SegmentValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SegmentValidationError {}

/// Validate a single path segment (upload category or stored file name)
/// so that joining it onto the upload root can never leave that root.
pub fn validate_segment(segment: &str) -> Result<(), SegmentValidationError> {
    if segment.trim().is_empty() {
        return Err(SegmentValidationError::Empty);
    }

    if segment.contains('\0') {
        return Err(SegmentValidationError::ContainsNullByte);
    }

    if segment.contains('/') || segment.contains('\\') {
        return Err(SegmentValidationError::ContainsPathSeparator);
    }

    if segment == "." || segment == ".." {
        return Err(SegmentValidationError::IsSpecialDirectory);
    }

    // Path::file_name must round-trip, otherwise the OS would normalize it
    if Path::new(segment).file_name().and_then(|n| n.to_str()) != Some(segment) {
        return Err(SegmentValidationError::InvalidSegment);
    }

    Ok(())
}

/// Extension of a client-supplied file name, without the leading dot.
/// Only the final component is considered, for both separator styles.
pub fn extension_of(file_name: &str) -> Option<&str> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (_, ext) = base.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// MIME type a client should declare for a local file, guessed from its extension
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
