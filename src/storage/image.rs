/**
 * Image Content Sniffing
 *
 * Determines an upload's real type from its leading bytes. The client's
 * file name, extension, and declared content type are never consulted -
 * a renamed `.png` full of junk is rejected exactly like any other junk.
 *
 * Only the two accepted avatar formats are recognized.
 */

/// PNG signature: the fixed 8-byte header.
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG files start with the SOI marker followed by another marker byte.
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Accepted avatar image types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// MIME type for this image kind
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension (with leading dot) for stored avatars
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
        }
    }
}

/// Sniff image bytes
///
/// # Returns
/// The detected kind, or None when the bytes are neither PNG nor JPEG.
pub fn sniff_image(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        Some(ImageKind::Png)
    } else if bytes.starts_with(&JPEG_SIGNATURE) {
        Some(ImageKind::Jpeg)
    } else {
        None
    }
}
