use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use super::bookings::InlineFile;
use super::require_bearer;
use crate::errors::AppError;
use crate::models::Envelope;
use crate::services::remote::files::StoredFile;
use crate::state::AppState;

// POST /api/admin/files/:folder
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(folder): Path<String>,
    Json(file): Json<InlineFile>,
) -> Result<Json<Envelope<StoredFile>>, AppError> {
    let token = require_bearer(&headers)?;
    let folder = folder.trim();
    if folder.is_empty() {
        return Err(AppError::BadRequest("folder is required".to_string()));
    }
    let file = file.decode()?;
    if file.bytes.is_empty() {
        return Err(AppError::BadRequest("file is empty".to_string()));
    }

    let stored = state.backend(Some(token)).upload_file(folder, &file).await?;
    tracing::info!(folder, url = %stored.url, "file uploaded");
    Ok(Json(Envelope::ok(stored)))
}
