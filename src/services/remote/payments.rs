use serde::Serialize;

use super::{segment, ApiRequest, Backend, Download};
use crate::errors::AppError;
use crate::models::{PaymentRecord, PaymentStatus, VerifyDecision};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl Backend<'_> {
    pub async fn payments(&self, status: Option<&PaymentStatus>) -> Result<Vec<PaymentRecord>, AppError> {
        let mut req = ApiRequest::get("/enrollment/admin/payments");
        if let Some(status) = status {
            req = req.query("status", status);
        }
        self.fetch(req).await
    }

    pub async fn verify_payment(
        &self,
        id: &str,
        decision: &VerifyDecision,
    ) -> Result<PaymentRecord, AppError> {
        let body = VerifyRequest {
            status: decision.status(),
            notes: decision.notes.as_deref(),
        };
        self.fetch(
            ApiRequest::put(format!("/enrollment/admin/payments/{}/verify", segment(id)))
                .json(&body)?,
        )
        .await
    }

    pub async fn payment_receipt(&self, id: &str) -> Result<Download, AppError> {
        self.download(ApiRequest::get(format!(
            "/enrollment/admin/payments/{}/receipt",
            segment(id)
        )))
        .await
    }
}
