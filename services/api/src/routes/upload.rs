//! Image upload
//!
//! Multipart form with a `name` field (the stored file name, chosen by the
//! client) and a `file` field (the bytes). Bodies over the upload limit get
//! 413.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Accept `name` only if it is a single plain path component
pub fn safe_file_name(name: &str) -> Option<&str> {
    let name = name.trim();
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    (!invalid).then_some(name)
}

/// Store an uploaded image under the images directory
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<&'static str>> {
    let mut name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => {
                name = Some(field.text().await?);
            }
            Some("file") => {
                data = Some(field.bytes().await?);
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ApiError::BadRequest("Missing 'name' field".to_string()))?;
    let data = data.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;
    let file_name = safe_file_name(&name)
        .ok_or_else(|| ApiError::BadRequest("Invalid file name".to_string()))?;

    tokio::fs::create_dir_all(&state.images_dir)
        .await
        .map_err(|e| ApiError::internal("Failed to create images directory", e))?;
    let path = state.images_dir.join(file_name);
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| ApiError::internal("Failed to store upload", e))?;

    info!("Stored upload {} ({} bytes)", file_name, data.len());
    Ok(Json("File has been uploaded :)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass() {
        assert_eq!(safe_file_name("1700000000000me.png"), Some("1700000000000me.png"));
        assert_eq!(safe_file_name("  avatar.jpg "), Some("avatar.jpg"));
    }

    #[test]
    fn traversal_and_empty_names_are_rejected() {
        for name in ["", "  ", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png"] {
            assert_eq!(safe_file_name(name), None, "{name:?} should be rejected");
        }
    }
}
