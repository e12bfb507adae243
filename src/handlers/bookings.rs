use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::viewer_today;
use crate::errors::AppError;
use crate::models::booking::ErrorMap;
use crate::models::{Attachment, BookingForm, BookingOutcome, Envelope, PaymentMethod};
use crate::services::booking;
use crate::services::validation::Validation;
use crate::state::AppState;

/// A file sent inline as base64, optionally as a `data:` URL.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineFile {
    pub file_name: String,
    #[serde(default)]
    pub content_type: String,
    pub data: String,
}

impl InlineFile {
    pub fn decode(self) -> Result<Attachment, AppError> {
        let (header, payload) = match self.data.split_once(',') {
            Some((header, payload)) if header.starts_with("data:") => (Some(header), payload),
            _ => (None, self.data.as_str()),
        };
        let claimed = if self.content_type.trim().is_empty() {
            header
                .and_then(|h| h.strip_prefix("data:"))
                .and_then(|h| h.split(';').next())
                .unwrap_or("")
        } else {
            self.content_type.trim()
        };
        let content_type = if is_mime_like(claimed) {
            claimed.to_string()
        } else {
            "application/octet-stream".to_string()
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|_| AppError::BadRequest("file data is not valid base64".to_string()))?;
        Ok(Attachment {
            file_name: self.file_name,
            content_type,
            bytes,
        })
    }
}

fn is_mime_like(s: &str) -> bool {
    let token = |t: &str| {
        !t.is_empty()
            && t.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"!#$&^_.+-".contains(&b))
    };
    match s.split_once('/') {
        Some((kind, sub)) => token(kind) && token(sub),
        None => false,
    }
}

#[derive(Deserialize)]
pub struct BookingRequest {
    #[serde(flatten)]
    pub form: BookingForm,
    #[serde(default)]
    pub receipt: Option<InlineFile>,
    /// The viewer's local date, used for the card expiry check.
    #[serde(default)]
    pub today: Option<String>,
}

fn prepare(state: &AppState, req: BookingRequest) -> Result<(BookingForm, Validation), AppError> {
    let today = viewer_today(req.today.as_deref())?;
    let mut form = req.form;
    if let Some(receipt) = req.receipt {
        // a rejected file is reported through the form's error map
        let _ = form.attach_receipt(receipt.decode()?);
    }
    let validation = form.check(today, state.config.strict_full_name);
    Ok((form, validation))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRequest {
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub switch_to: PaymentMethod,
    #[serde(default)]
    pub errors: ErrorMap,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSwitch {
    pub payment_method: PaymentMethod,
    pub errors: ErrorMap,
}

// POST /api/bookings/payment-method
pub async fn switch_payment_method(
    Json(req): Json<SwitchRequest>,
) -> Result<Json<Envelope<PaymentSwitch>>, AppError> {
    let mut form = BookingForm {
        payment_method: req.payment_method,
        errors: req.errors,
        ..Default::default()
    };
    form.set_payment_method(req.switch_to);
    Ok(Json(Envelope::ok(PaymentSwitch {
        payment_method: form.payment_method,
        errors: form.errors,
    })))
}

// POST /api/bookings/validate
pub async fn validate_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Envelope<Validation>>, AppError> {
    let (_, validation) = prepare(&state, req)?;
    Ok(Json(Envelope::ok(validation)))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Envelope<BookingOutcome>>, AppError> {
    let (form, validation) = prepare(&state, req)?;
    if !validation.is_ok() {
        return Err(validation.into());
    }

    let Some(_guard) = state.begin_submission(&form.applicant.email) else {
        return Err(AppError::Conflict(
            "A booking for this email is already being processed".to_string(),
        ));
    };

    let outcome = booking::submit(state.backend(None), &form).await?;
    tracing::info!(
        enrollment_id = %outcome.enrollment_id,
        status = %outcome.payment_status,
        "booking completed"
    );

    Ok(Json(Envelope::ok_with_message(
        "Booking received",
        outcome,
    )))
}
