use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::{attachment_disposition, require_bearer};
use crate::errors::AppError;
use crate::models::{Envelope, PaymentRecord, PaymentStatus, VerifyDecision};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PaymentsQuery {
    pub status: Option<String>,
}

// GET /api/admin/payments
pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PaymentsQuery>,
) -> Result<Json<Envelope<Vec<PaymentRecord>>>, AppError> {
    let token = require_bearer(&headers)?;
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty() && !s.eq_ignore_ascii_case("all"))
        .map(PaymentStatus::parse);

    let payments = state.backend(Some(token)).payments(status.as_ref()).await?;
    Ok(Json(Envelope::ok(payments)))
}

// PUT /api/admin/payments/:id/verify
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(decision): Json<VerifyDecision>,
) -> Result<Json<Envelope<PaymentRecord>>, AppError> {
    let token = require_bearer(&headers)?;
    let has_notes = decision.notes.as_deref().is_some_and(|n| !n.trim().is_empty());
    if !decision.approved && !has_notes {
        return Err(AppError::invalid([(
            "notes",
            "Please give a reason for rejecting this payment".to_string(),
        )]));
    }

    let record = state.backend(Some(token)).verify_payment(&id, &decision).await?;
    tracing::info!(id = %id, status = %record.status, "payment reviewed");

    let message = if decision.approved {
        "Payment verified"
    } else {
        "Payment rejected"
    };
    Ok(Json(Envelope::ok_with_message(message, record)))
}

// GET /api/admin/payments/:id/receipt
pub async fn download_receipt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let token = require_bearer(&headers)?;
    let file = state.backend(Some(token)).payment_receipt(&id).await?;
    let filename = file.file_name.unwrap_or_else(|| format!("receipt-{id}"));
    let disposition = attachment_disposition(&filename);
    let content_type = if HeaderValue::from_str(&file.content_type).is_ok() {
        file.content_type
    } else {
        "application/octet-stream".to_string()
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
