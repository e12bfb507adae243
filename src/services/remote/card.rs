use serde::{Deserialize, Serialize};

use super::{ApiRequest, Backend};
use crate::errors::AppError;
use crate::models::{CardDetails, PaymentStatus};
use crate::services::card::CardNumber;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCharge {
    pub enrollment_id: String,
    pub card_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
}

impl CardCharge {
    pub fn new(enrollment_id: &str, card: &CardDetails) -> Self {
        Self {
            enrollment_id: enrollment_id.to_string(),
            card_name: card.card_name.trim().to_string(),
            card_number: CardNumber::parse(&card.card_number).digits().to_string(),
            expiry_month: format!("{:0>2}", card.expiry_month.trim()),
            expiry_year: card.expiry_year.trim().to_string(),
            cvv: card.cvv.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentResult {
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl Backend<'_> {
    pub async fn process_card(&self, charge: &CardCharge) -> Result<CardPaymentResult, AppError> {
        self.fetch(ApiRequest::post("/payment/process-card").json(charge)?)
            .await
    }
}
