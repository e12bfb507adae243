use chrono::NaiveDate;
use serde::Serialize;

use crate::models::booking::ErrorMap;
use crate::models::{BookingForm, Field, PaymentMethod};
use crate::services::card::{self, CardNumber, ExpiryError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    pub errors: ErrorMap,
    #[serde(skip_serializing_if = "ErrorMap::is_empty")]
    pub warnings: ErrorMap,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.starts_with('.'),
        None => false,
    }
}

fn required(errors: &mut ErrorMap, field: Field, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
        false
    } else {
        true
    }
}

pub fn validate(form: &BookingForm, today: NaiveDate, strict_full_name: bool) -> Validation {
    let mut v = Validation::default();
    let applicant = &form.applicant;

    if applicant.full_name.trim().is_empty() {
        let target = if strict_full_name {
            &mut v.errors
        } else {
            &mut v.warnings
        };
        target.insert(Field::FullName, "Full name is required".to_string());
    }

    if required(&mut v.errors, Field::Email, &applicant.email, "Email is required")
        && !is_valid_email(&applicant.email)
    {
        v.errors
            .insert(Field::Email, "Please enter a valid email address".to_string());
    }

    required(&mut v.errors, Field::Phone, &applicant.phone, "Phone number is required");

    if required(&mut v.errors, Field::Password, &applicant.password, "Password is required")
        && applicant.password.chars().count() < MIN_PASSWORD_LEN
    {
        v.errors.insert(
            Field::Password,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }

    required(
        &mut v.errors,
        Field::CourseDate,
        form.course_date_id.as_deref().unwrap_or(""),
        "Please select a course date",
    );

    match form.payment_method {
        PaymentMethod::Bank => validate_bank(form, &mut v.errors),
        PaymentMethod::Card => validate_card(form, today, &mut v.errors),
    }

    v
}

fn validate_bank(form: &BookingForm, errors: &mut ErrorMap) {
    required(
        errors,
        Field::TransactionId,
        &form.bank.transaction_id,
        "Transaction ID is required",
    );
    match &form.bank.receipt {
        None => {
            errors.insert(Field::ReceiptFile, "Payment receipt is required".to_string());
        }
        Some(file) => {
            if let Err(msg) = file.check_receipt() {
                errors.insert(Field::ReceiptFile, msg);
            }
        }
    }
}

fn validate_card(form: &BookingForm, today: NaiveDate, errors: &mut ErrorMap) {
    let card = &form.card;

    required(errors, Field::CardName, &card.card_name, "Cardholder name is required");

    let number = CardNumber::parse(&card.card_number);
    if number.is_empty() {
        errors.insert(Field::CardNumber, "Card number is required".to_string());
    } else if !number.is_valid() {
        errors.insert(Field::CardNumber, "Invalid card number".to_string());
    }

    let expiry = card::check_expiry(&card.expiry_month, &card.expiry_year, today);
    let message = match expiry {
        Ok(()) => None,
        Err(ExpiryError::Missing) => Some("Expiry date is required"),
        Err(ExpiryError::InvalidMonth) => Some("Invalid expiry month"),
        Err(ExpiryError::InvalidYear) => Some("Invalid expiry year"),
        Err(ExpiryError::Expired) => Some("Card has expired"),
    };
    if let Some(message) = message {
        errors.insert(Field::Expiry, message.to_string());
    }

    let cvv = card.cvv.trim();
    let expected = number.brand().cvv_len();
    if cvv.is_empty() {
        errors.insert(Field::Cvv, "CVV is required".to_string());
    } else if cvv.len() != expected || !cvv.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert(Field::Cvv, format!("CVV must be {expected} digits"));
    }
}
