use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::constants::{ERR_NO_FILE, ERR_UPLOAD_FAILED, UPLOAD_FIELD_NAME};
use crate::error::{AppError, Result};
use crate::models::UploadResponse;
use crate::AppState;

/// Maximum number of `-N` suffixes tried when a timestamped name is taken
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Store one uploaded file and return its public URL
///
/// POST /api/upload (multipart, field `profileImage`)
///
/// The file is written to the upload directory as `<unix-millis><.ext>`
/// and served back unchanged under `/uploads/`. There is no type check.
/// If the caller's follow-up metadata update fails, the file stays on disk
/// unreferenced.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        // A plain form value under the file field is not a file
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await?;

        let extension = file_extension(&original_name);
        let stored_name = write_unique(
            &state.config.upload_dir,
            Utc::now().timestamp_millis(),
            &extension,
            &bytes,
        )
        .await
        .map_err(AppError::io(ERR_UPLOAD_FAILED))?;

        tracing::info!(
            file = %stored_name,
            original = %original_name,
            size = bytes.len(),
            "Stored upload"
        );

        return Ok(Json(UploadResponse {
            url: state.config.upload_url(&stored_name),
        }));
    }

    tracing::warn!("Upload request without a {} field", UPLOAD_FIELD_NAME);
    Err(AppError::invalid(ERR_NO_FILE))
}

/// Extension of the client's file name including the dot, or empty
///
/// Only plain alphanumeric extensions are kept so the stored name can never
/// contain path separators.
pub fn file_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

/// Write `bytes` under a fresh `<stamp>[-N]<ext>` name and return that name
async fn write_unique(
    dir: &Path,
    stamp: i64,
    extension: &str,
    bytes: &[u8],
) -> std::io::Result<String> {
    tokio::fs::create_dir_all(dir).await?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            format!("{}{}", stamp, extension)
        } else {
            format!("{}-{}{}", stamp, attempt, extension)
        };

        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(&name))
            .await;

        match file {
            Ok(mut file) => {
                file.write_all(bytes).await?;
                file.flush().await?;
                return Ok(name);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        "no free upload name",
    ))
}
