//! Request handlers.

use crate::error::{HttpError, HttpResult};
use crate::router::AppState;
use crate::upload::{extension, secure_filename};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::body::Bytes;
use axum::response::Json;
use clausewise::ContractAnalysis;
use serde::Deserialize;
use serde_json::{Value, json};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::info;

const INLINE_FILENAME: &str = "inline.txt";

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "clausewise",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
        "knowledge_version": state.analyzer.knowledge().version(),
        "llm_enabled": state.analyzer.llm_enabled(),
    }))
}

/// POST /api/analyze - multipart upload in field `file`.
pub async fn analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HttpResult<Json<ContractAnalysis>> {
    let limit = state.config.max_body_size;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::from_multipart(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        if original.trim().is_empty() {
            return Err(HttpError::NoFileSelected);
        }
        let ext = extension(&original)
            .filter(|ext| state.config.is_allowed_extension(ext))
            .ok_or(HttpError::FileTypeNotAllowed)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| HttpError::from_multipart(e, limit))?;

        let filename = secure_filename(&original);
        let bytes = data.len();
        let upload = store_upload(state.config.upload_dir.clone(), ext, data).await?;
        info!(
            filename = %filename,
            path = %upload.path().display(),
            bytes = bytes,
            "File uploaded"
        );

        // The temporary file is removed when `upload` drops.
        let analysis = state.analyzer.analyze_file_as(upload.path(), &filename).await?;
        return Ok(Json(analysis));
    }

    Err(HttpError::NoFile)
}

/// Write an upload to its own temporary file under `upload_dir`, keeping the
/// extension so the extractor can pick the format.
async fn store_upload(upload_dir: PathBuf, ext: String, data: Bytes) -> HttpResult<NamedTempFile> {
    let upload = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
        std::fs::create_dir_all(&upload_dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&format!(".{ext}"))
            .tempfile_in(&upload_dir)?;
        file.write_all(&data)?;
        file.flush()?;
        Ok(file)
    })
    .await
    .map_err(std::io::Error::other)??;

    Ok(upload)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub filename: Option<String>,
    pub text: String,
}

/// POST /api/analyze/text
pub async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> HttpResult<Json<ContractAnalysis>> {
    let Json(request) = payload
        .map_err(|rejection| HttpError::from_json_rejection(rejection, state.config.max_body_size))?;

    let filename = request
        .filename
        .as_deref()
        .map(secure_filename)
        .unwrap_or_else(|| INLINE_FILENAME.to_string());

    let analysis = state.analyzer.analyze_text(&filename, &request.text).await?;
    Ok(Json(analysis))
}
