use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::require_bearer;
use crate::errors::AppError;
use crate::models::{Envelope, QuizResult, QuizStatus};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuery {
    pub status: Option<String>,
    pub course_id: Option<String>,
    /// Only attempts an admin can still bypass or reject.
    #[serde(default)]
    pub reviewable: bool,
}

// GET /api/admin/quiz/results
pub async fn list_results(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<QuizQuery>,
) -> Result<Json<Envelope<Vec<QuizResult>>>, AppError> {
    let token = require_bearer(&headers)?;
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(QuizStatus::parse);
    let course_id = query.course_id.as_deref().filter(|c| !c.trim().is_empty());

    let mut results = state
        .backend(Some(token))
        .quiz_results(status.as_ref(), course_id)
        .await?;
    if query.reviewable {
        results.retain(QuizResult::awaits_review);
    }
    Ok(Json(Envelope::ok(results)))
}

#[derive(Deserialize, Default)]
pub struct ReviewRequest {
    #[serde(default)]
    pub note: String,
}

// POST /api/admin/quiz/results/:id/bypass
pub async fn bypass(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<Envelope<QuizResult>>, AppError> {
    let token = require_bearer(&headers)?;
    let result = state
        .backend(Some(token))
        .bypass_quiz(&id, req.note.trim())
        .await?;
    tracing::info!(id = %id, "quiz attempt bypassed");
    Ok(Json(Envelope::ok_with_message("Quiz bypassed", result)))
}

// POST /api/admin/quiz/results/:id/reject
pub async fn reject(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<Envelope<QuizResult>>, AppError> {
    let token = require_bearer(&headers)?;
    let note = req.note.trim();
    if note.is_empty() {
        return Err(AppError::invalid([(
            "note",
            "Please give a reason for rejecting this attempt".to_string(),
        )]));
    }
    let result = state.backend(Some(token)).reject_quiz(&id, note).await?;
    tracing::info!(id = %id, "quiz attempt rejected");
    Ok(Json(Envelope::ok_with_message("Quiz rejected", result)))
}
