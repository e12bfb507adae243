use serde::{Deserialize, Serialize};

use super::{segment, ApiRequest, Backend, Part};
use crate::errors::AppError;
use crate::models::{Applicant, Attachment, PaymentMethod, PaymentStatus, RegisteredUser};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookRequest<'a> {
    #[serde(flatten)]
    applicant: &'a Applicant,
    course_date_id: &'a str,
    payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub enrollment_id: String,
    pub user: RegisteredUser,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofReceipt {
    #[serde(default = "pending")]
    pub status: PaymentStatus,
}

fn pending() -> PaymentStatus {
    PaymentStatus::Pending
}

impl Backend<'_> {
    pub async fn book(
        &self,
        applicant: &Applicant,
        course_date_id: &str,
        payment_method: PaymentMethod,
    ) -> Result<Enrollment, AppError> {
        let body = BookRequest {
            applicant,
            course_date_id,
            payment_method,
        };
        self.fetch(ApiRequest::post("/enrollment/book").json(&body)?)
            .await
    }

    pub async fn upload_payment_proof(
        &self,
        enrollment_id: &str,
        transaction_id: &str,
        receipt: &Attachment,
    ) -> Result<ProofReceipt, AppError> {
        let parts = vec![
            Part::Text {
                name: "transactionId".to_string(),
                value: transaction_id.trim().to_string(),
            },
            Part::File {
                name: "receipt".to_string(),
                file: receipt.clone(),
            },
        ];
        self.fetch(
            ApiRequest::post(format!("/enrollment/{}/payment-proof", segment(enrollment_id)))
                .multipart(parts),
        )
        .await
    }
}
