use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use super::AppState;
use crate::error::{DocsortError, Result};
use crate::models::{DocumentFormat, ExtractionResult};

const UPLOAD_FIELD: &str = "file";
const UPLOAD_PREFIX: &str = "upload-";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub folder: String,
    pub total_chunks: usize,
    pub file_type: DocumentFormat,
}

/// An uploaded file parked in the upload directory. The file is deleted when
/// this value is discarded or dropped.
struct Upload {
    file: NamedTempFile,
    file_name: String,
}

impl Upload {
    fn path(&self) -> &Path {
        self.file.path()
    }

    fn discard(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Accepts a multipart form with a `file` field and returns its chunked text.
pub async fn extract_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractionResult>> {
    let upload = receive_upload(&state, multipart).await?;
    let result = extract(&state, upload).await?;
    Ok(Json(result))
}

/// Same input as [`extract_upload`]; answers with the suggested folder.
pub async fn classify_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ClassifyResponse>> {
    let upload = receive_upload(&state, multipart).await?;
    let result = extract(&state, upload).await?;

    let folder = state.classifier.classify(&result.joined_text()).await;

    Ok(Json(ClassifyResponse {
        folder,
        total_chunks: result.total_chunks,
        file_type: result.file_type,
    }))
}

async fn extract(state: &AppState, upload: Upload) -> Result<ExtractionResult> {
    let result = state.extractor.extract(upload.path()).await;
    let file_name = upload.file_name.clone();
    upload.discard();

    if let Err(e) = &result {
        tracing::error!(file_name = %file_name, "Extraction failed: {}", e);
    }
    result
}

/// Writes the `file` field to a temp file that keeps the declared extension,
/// so the dispatcher sees the same format the client sent. Unsupported
/// extensions are rejected before anything touches the disk.
async fn receive_upload(state: &AppState, mut multipart: Multipart) -> Result<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DocsortError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let format = DocumentFormat::from_path(Path::new(&file_name))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| DocsortError::Validation(format!("Failed to read file: {e}")))?;

        let upload_dir = &state.config.server.upload_dir;
        tokio::fs::create_dir_all(upload_dir).await?;

        let file = tempfile::Builder::new()
            .prefix(UPLOAD_PREFIX)
            .suffix(&format!(".{}", format.extension()))
            .tempfile_in(upload_dir)?;
        tokio::fs::write(file.path(), &bytes).await?;

        tracing::debug!(
            file_name = %file_name,
            size = bytes.len(),
            "Stored upload at {}",
            file.path().display()
        );

        return Ok(Upload { file, file_name });
    }

    Err(DocsortError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' field in upload"
    )))
}
