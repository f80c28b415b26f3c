//! Accepted image formats: MIME types, extensions and magic bytes

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
}

use ImageFormat::*;

const MIME_TYPES: &[(&str, ImageFormat)] = &[
    ("image/jpeg", Jpeg),
    ("image/jpg", Jpeg),
    ("image/png", Png),
    ("image/gif", Gif),
    ("image/webp", WebP),
];

const EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("jpg", Jpeg),
    ("jpeg", Jpeg),
    ("png", Png),
    ("gif", Gif),
    ("webp", WebP),
];

const JPEG_SIGNATURES: &[&[u8]] = &[&[0xFF, 0xD8, 0xFF]];
const PNG_SIGNATURES: &[&[u8]] = &[&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]];
const GIF_SIGNATURES: &[&[u8]] = &[&[0x47, 0x49, 0x46, 0x38]];
// RIFF container header
const WEBP_SIGNATURES: &[&[u8]] = &[&[0x52, 0x49, 0x46, 0x46]];

impl ImageFormat {
    /// Look up a declared MIME type (case-insensitive)
    pub fn from_mime_type(content_type: &str) -> Option<Self> {
        MIME_TYPES
            .iter()
            .find(|(mime, _)| mime.eq_ignore_ascii_case(content_type))
            .map(|(_, format)| *format)
    }

    /// Look up a file extension given without the leading dot (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<Self> {
        EXTENSIONS
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, format)| *format)
    }

    /// Magic byte signatures, any one of which identifies the format
    pub fn signatures(self) -> &'static [&'static [u8]] {
        match self {
            Jpeg => JPEG_SIGNATURES,
            Png => PNG_SIGNATURES,
            Gif => GIF_SIGNATURES,
            WebP => WEBP_SIGNATURES,
        }
    }

    /// Number of leading bytes needed to check every signature
    pub fn header_len(self) -> usize {
        self.signatures().iter().map(|s| s.len()).max().unwrap_or(0)
    }

    /// Check the leading bytes of a file against the format's signatures.
    /// A format without signatures accepts any content.
    pub fn matches_signature(self, header: &[u8]) -> bool {
        let signatures = self.signatures();
        if signatures.is_empty() {
            return true;
        }

        let shortest = signatures.iter().map(|s| s.len()).min().unwrap_or(0);
        if header.len() < shortest {
            return false;
        }

        signatures.iter().any(|signature| header.starts_with(signature))
    }
}
