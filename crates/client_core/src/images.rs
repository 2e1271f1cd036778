//! Banner uploads: local image files become inline `data:` URIs that travel
//! with the next update mutation.

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::domain::ImageRef;

/// Hosted banner images are capped server-side; refuse anything larger up front.
pub const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

pub fn encode_image_bytes(bytes: &[u8], mime_type: &str) -> Result<ImageRef> {
    if !mime_type.starts_with("image/") {
        bail!("unsupported upload type {mime_type}; expected an image");
    }
    if bytes.is_empty() {
        bail!("image is empty");
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        bail!(
            "image is {} bytes; the limit is {MAX_IMAGE_BYTES} bytes",
            bytes.len()
        );
    }
    Ok(ImageRef::upload(format!(
        "data:{mime_type};base64,{}",
        STANDARD.encode(bytes)
    )))
}

pub async fn encode_image_file(path: &Path) -> Result<ImageRef> {
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .with_context(|| format!("cannot infer image type of {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    encode_image_bytes(&bytes, &mime_type)
        .with_context(|| format!("cannot attach {}", path.display()))
}
