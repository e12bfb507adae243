use crate::errors::AppError;
use crate::models::{BookingForm, BookingOutcome, PaymentMethod};
use crate::services::card::CardNumber;
use crate::services::remote::card::CardCharge;
use crate::services::remote::Backend;

pub async fn submit(backend: Backend<'_>, form: &BookingForm) -> Result<BookingOutcome, AppError> {
    let course_date_id = form
        .course_date_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("course date is required".to_string()))?;

    let enrollment = backend
        .book(&form.applicant, course_date_id, form.payment_method)
        .await?;
    tracing::info!(
        enrollment_id = %enrollment.enrollment_id,
        method = form.payment_method.as_str(),
        "enrollment created"
    );

    let payment_status = match form.payment_method {
        PaymentMethod::Bank => {
            let receipt = form
                .bank
                .receipt
                .as_ref()
                .ok_or_else(|| AppError::BadRequest("payment receipt is required".to_string()))?;
            backend
                .upload_payment_proof(&enrollment.enrollment_id, &form.bank.transaction_id, receipt)
                .await?
                .status
        }
        PaymentMethod::Card => {
            let charge = CardCharge::new(&enrollment.enrollment_id, &form.card);
            let result = backend.process_card(&charge).await?;
            let number = CardNumber::parse(&form.card.card_number);
            tracing::info!(
                enrollment_id = %enrollment.enrollment_id,
                brand = ?number.brand(),
                last4 = number.last4(),
                status = %result.status,
                "card payment processed"
            );
            result.status
        }
    };

    Ok(BookingOutcome {
        enrollment_id: enrollment.enrollment_id,
        user: enrollment.user,
        payment_method: form.payment_method,
        payment_status,
    })
}
