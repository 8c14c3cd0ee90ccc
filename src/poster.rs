//! Poster images for film records
//!
//! A poster is stored in `Film::image_url` either as a remote `http(s)` URL or
//! as a `data:` URI holding the base64-encoded file.

use crate::error::{FilmshelfError, Result};
use base64::Engine;
use std::path::Path;
use url::Url;

/// Turn a user-supplied poster reference into the value stored on the film
///
/// `http`, `https` and `data` URLs are kept as given. Anything else is read
/// as a local image file and converted with [`image_to_data_uri`].
///
/// # Errors
///
/// Returns `FilmshelfError::Image` if the file is missing or is not an image
pub fn resolve_image(input: &str) -> Result<String> {
    if let Ok(url) = Url::parse(input) {
        if matches!(url.scheme(), "http" | "https" | "data") {
            return Ok(input.to_string());
        }
    }

    image_to_data_uri(Path::new(input))
}

/// Read an image file and encode it as a `data:<mime>;base64,...` URI
///
/// The format is detected from the file contents, not the extension.
pub fn image_to_data_uri(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        FilmshelfError::Image(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let format = image::guess_format(&bytes).map_err(|_| {
        FilmshelfError::Image(format!("Unsupported image format: {}", path.display()))
    })?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    tracing::debug!(
        path = %path.display(),
        mime = format.to_mime_type(),
        bytes = bytes.len(),
        "Encoded poster"
    );

    Ok(format!("data:{};base64,{}", format.to_mime_type(), encoded))
}
