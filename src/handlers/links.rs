use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

use super::require_bearer;
use crate::errors::AppError;
use crate::models::{EnrollmentLink, EnrollmentLinkInput, Envelope};
use crate::state::AppState;

fn checked(input: EnrollmentLinkInput) -> Result<EnrollmentLinkInput, AppError> {
    if input.label.trim().is_empty() {
        return Err(AppError::invalid([("label", "Label is required".to_string())]));
    }
    if input.course_date_id.is_some() && input.course_id.is_none() {
        return Err(AppError::invalid([(
            "courseId",
            "Pick the course for this date".to_string(),
        )]));
    }
    Ok(input)
}

// GET /api/admin/links
pub async fn list_links(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Vec<EnrollmentLink>>>, AppError> {
    let token = require_bearer(&headers)?;
    let links = state.backend(Some(token)).enrollment_links().await?;
    Ok(Json(Envelope::ok(links)))
}

// POST /api/admin/links
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<EnrollmentLinkInput>,
) -> Result<Json<Envelope<EnrollmentLink>>, AppError> {
    let token = require_bearer(&headers)?;
    let input = checked(input)?;
    let link = state.backend(Some(token)).create_enrollment_link(&input).await?;
    tracing::info!(id = %link.id, code = %link.code, "enrollment link created");
    Ok(Json(Envelope::ok_with_message("Link created", link)))
}

// PUT /api/admin/links/:id
pub async fn update_link(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<EnrollmentLinkInput>,
) -> Result<Json<Envelope<EnrollmentLink>>, AppError> {
    let token = require_bearer(&headers)?;
    let input = checked(input)?;
    let link = state
        .backend(Some(token))
        .update_enrollment_link(&id, &input)
        .await?;
    Ok(Json(Envelope::ok_with_message("Link updated", link)))
}

// DELETE /api/admin/links/:id
pub async fn delete_link(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Value>>, AppError> {
    let token = require_bearer(&headers)?;
    let message = state.backend(Some(token)).delete_enrollment_link(&id).await?;
    tracing::info!(id = %id, "enrollment link deleted");
    Ok(Json(Envelope::message(if message.is_empty() {
        "Link deleted".to_string()
    } else {
        message
    })))
}

// POST /api/admin/links/:id/qr
pub async fn regenerate_qr(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Envelope<EnrollmentLink>>, AppError> {
    let token = require_bearer(&headers)?;
    let link = state.backend(Some(token)).regenerate_link_qr(&id).await?;
    Ok(Json(Envelope::ok(link)))
}
