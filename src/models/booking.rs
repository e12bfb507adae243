use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EnrollmentLink, PaymentStatus};
use crate::services::validation::{self, Validation};

pub const MAX_RECEIPT_BYTES: usize = 10 * 1024 * 1024;

fn receipt_content_type(ext: &str) -> Option<&'static str> {
    match ext {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Bank,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Bank => "bank",
            PaymentMethod::Card => "card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
    Password,
    CourseDate,
    TransactionId,
    ReceiptFile,
    CardName,
    CardNumber,
    Expiry,
    Cvv,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Password => "password",
            Field::CourseDate => "courseDate",
            Field::TransactionId => "transactionId",
            Field::ReceiptFile => "receiptFile",
            Field::CardName => "cardName",
            Field::CardNumber => "cardNumber",
            Field::Expiry => "expiry",
            Field::Cvv => "cvv",
        }
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        match self {
            Field::TransactionId | Field::ReceiptFile => Some(PaymentMethod::Bank),
            Field::CardName | Field::CardNumber | Field::Expiry | Field::Cvv => {
                Some(PaymentMethod::Card)
            }
            _ => None,
        }
    }
}

pub type ErrorMap = BTreeMap<Field, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Size and type rules for a payment receipt. The type is decided by
    /// the file extension alone; on success the matching content type is
    /// returned, whatever the client claimed.
    pub fn check_receipt(&self) -> Result<&'static str, String> {
        if self.bytes.len() > MAX_RECEIPT_BYTES {
            return Err("File size must be less than 10MB".to_string());
        }
        self.extension()
            .and_then(|ext| receipt_content_type(&ext))
            .ok_or_else(|| "Only JPG, PNG, GIF or PDF files are accepted".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransfer {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(skip)]
    pub receipt: Option<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[serde(default)]
    pub card_name: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry_month: String,
    #[serde(default)]
    pub expiry_year: String,
    #[serde(default)]
    pub cvv: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    #[serde(flatten)]
    pub applicant: Applicant,
    #[serde(default)]
    pub course_date_id: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub bank: BankTransfer,
    #[serde(default)]
    pub card: CardDetails,
    #[serde(skip)]
    pub errors: ErrorMap,
}

impl BookingForm {
    /// Switches the active sub-form. Errors belonging to the other method
    /// are dropped; entered values are left alone.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        if self.payment_method == method {
            return;
        }
        self.payment_method = method;
        self.errors
            .retain(|field, _| field.payment_method().map_or(true, |m| m == method));
    }

    pub fn attach_receipt(&mut self, mut file: Attachment) -> Result<(), String> {
        match file.check_receipt() {
            Ok(content_type) => {
                file.content_type = content_type.to_string();
                self.bank.receipt = Some(file);
                self.errors.remove(&Field::ReceiptFile);
                Ok(())
            }
            Err(msg) => {
                self.errors.insert(Field::ReceiptFile, msg.clone());
                Err(msg)
            }
        }
    }

    pub fn prefill_from_link(&mut self, link: &EnrollmentLink) {
        if self.course_date_id.is_none() {
            self.course_date_id = link.course_date_id.clone();
        }
    }

    /// Runs the validator and replaces the error map with its result. A
    /// receipt rejection message is kept in preference to the generic
    /// "required" message while no receipt is attached.
    pub fn check(&mut self, today: NaiveDate, strict_full_name: bool) -> Validation {
        let rejected_receipt = self.errors.get(&Field::ReceiptFile).cloned();
        let mut result = validation::validate(self, today, strict_full_name);
        if let Some(msg) = rejected_receipt {
            if result.errors.contains_key(&Field::ReceiptFile) {
                result.errors.insert(Field::ReceiptFile, msg);
            }
        }
        self.errors = result.errors.clone();
        result
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcome {
    pub enrollment_id: String,
    pub user: RegisteredUser,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}
