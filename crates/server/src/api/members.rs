//! Roster API handlers.
//!
//! Every route answers 200 with a `RosterResult` body; failures are reported
//! in the body, never as transport errors.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use roster_core::{BatchSize, RosterResult, Upload};
use tracing::debug;

use crate::state::AppState;

/// Multipart field carrying the uploaded archive.
pub const UPLOAD_FIELD: &str = "file";

/// GET /api/v1/members/archive
///
/// Read the configured tar.gz roster.
pub async fn read_archive(State(state): State<Arc<AppState>>) -> Json<RosterResult> {
    let source = state.archive_source();
    Json(
        state
            .ingest()
            .read_local(source, BatchSize::Unbounded)
            .await
            .into(),
    )
}

/// GET /api/v1/members/csv
///
/// Read the configured plain CSV roster.
pub async fn read_csv(State(state): State<Arc<AppState>>) -> Json<RosterResult> {
    let source = state.csv_source();
    Json(
        state
            .ingest()
            .read_local(source, BatchSize::Unbounded)
            .await
            .into(),
    )
}

/// POST /api/v1/members/upload
///
/// Decode an uploaded `.gz` or `.tar.gz` archive.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<RosterResult> {
    Json(ingest_upload(&state, multipart, BatchSize::Unbounded).await)
}

/// POST /api/v1/members/upload/batched
///
/// Same as `upload`, aggregating in batches of `ingest.batch_size` rows.
pub async fn upload_batched(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<RosterResult> {
    let batch_size = state.upload_batch_size();
    Json(ingest_upload(&state, multipart, batch_size).await)
}

async fn ingest_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    batch_size: BatchSize,
) -> RosterResult {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return RosterResult::failed(format!("Failed to read upload: {}", rejection)),
    };
    let upload = match read_upload_field(multipart).await {
        Ok(upload) => upload,
        Err(message) => return RosterResult::failed(message),
    };

    state
        .ingest()
        .read_upload(upload, batch_size)
        .await
        .into()
}

/// Pull the `file` field out of a multipart form; other fields are skipped.
async fn read_upload_field(mut multipart: Multipart) -> Result<Upload, String> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err("No file provided".to_string()),
            Err(e) => return Err(format!("Failed to read upload: {}", e)),
        };

        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| format!("Failed to read upload: {}", e))?;

        return Ok(Upload::new(filename, data));
    }
}
