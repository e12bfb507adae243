pub mod app;
pub mod bookings;
pub mod calendar;
pub mod courses;
pub mod files;
pub mod health;
pub mod links;
pub mod payments;
pub mod quiz;

use axum::http::HeaderMap;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;

/// The caller's bearer token, forwarded to the backend as is.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Admin and teacher routes need a token; whether it is valid is for the
/// backend to decide.
pub fn require_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    bearer_token(headers).ok_or(AppError::Unauthorized)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The viewer's local date, sent by the browser as `today=YYYY-MM-DD`.
/// The server's own date is only a fallback.
pub fn viewer_today(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(today()),
        Some(raw) => crate::models::calendar_day::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("invalid today: {raw}"))),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewerDate {
    pub today: Option<String>,
}

impl ViewerDate {
    pub fn resolve(&self) -> Result<NaiveDate, AppError> {
        viewer_today(self.today.as_deref())
    }
}

/// `attachment` disposition with a filename reduced to `[A-Za-z0-9._-]`.
pub fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_matches('.');
    let safe = if safe.is_empty() { "download" } else { safe };
    format!("attachment; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(require_bearer(&headers).is_err());
        headers.insert("authorization", HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_viewer_today() {
        assert_eq!(
            viewer_today(Some("2025-03-12")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
        );
        assert_eq!(viewer_today(None).unwrap(), today());
        assert_eq!(viewer_today(Some(" ")).unwrap(), today());
        assert!(matches!(viewer_today(Some("12/03/2025")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_attachment_disposition_is_a_valid_header() {
        assert_eq!(
            attachment_disposition("event-ev-1.ics"),
            "attachment; filename=\"event-ev-1.ics\""
        );
        let nasty = attachment_disposition("ev\"1\r\nSet-Cookie: x.ics");
        assert_eq!(nasty, "attachment; filename=\"ev_1__Set-Cookie__x.ics\"");
        assert!(HeaderValue::from_str(&nasty).is_ok());
        assert_eq!(attachment_disposition("../"), "attachment; filename=\"_\"");
        assert_eq!(attachment_disposition(""), "attachment; filename=\"download\"");
    }
}
