//! Image storage for uploaded post attachments.
//!
//! Files are written under the media directory with a generated
//! `<uuid>.<ext>` name; the original file name is never used as a path.

use std::path::Path;

use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("empty image")]
    Empty,
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// File extension for an accepted image MIME type.
#[must_use]
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Write `bytes` under `dir` and return the stored file name.
///
/// # Errors
///
/// Rejects empty payloads and non-image content types; propagates I/O
/// failures.
pub async fn save_image(dir: &Path, content_type: &str, bytes: &[u8]) -> Result<String, MediaError> {
    if bytes.is_empty() {
        return Err(MediaError::Empty);
    }
    let ext = extension_for(content_type).ok_or_else(|| MediaError::UnsupportedType(content_type.to_owned()))?;

    let name = format!("{}.{ext}", Uuid::new_v4());
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&name), bytes).await?;
    Ok(name)
}
