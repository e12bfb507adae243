use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar_day;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentLink {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_date_id: Option<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(
        default,
        with = "calendar_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<NaiveDate>,
    #[serde(default)]
    pub usage_count: u32,
}

fn active_by_default() -> bool {
    true
}

impl EnrollmentLink {
    pub fn is_usable(&self, today: NaiveDate) -> bool {
        self.active && self.expires_at.map_or(true, |exp| exp >= today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentLinkInput {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_date_id: Option<String>,
    #[serde(
        default,
        with = "calendar_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(active: bool, expires_at: Option<&str>) -> EnrollmentLink {
        EnrollmentLink {
            id: "l1".to_string(),
            code: "SPRING25".to_string(),
            url: "https://academy.example/enroll/SPRING25".to_string(),
            qr_code: None,
            label: "Spring intake".to_string(),
            course_id: Some("c-1".to_string()),
            course_date_id: None,
            active,
            expires_at: expires_at.and_then(calendar_day::parse),
            usage_count: 0,
        }
    }

    #[test]
    fn test_link_usable_until_expiry_day() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert!(link(true, None).is_usable(today));
        assert!(link(true, Some("2025-03-15")).is_usable(today));
        assert!(!link(true, Some("2025-03-14")).is_usable(today));
        assert!(!link(false, None).is_usable(today));
    }

    #[test]
    fn test_link_deserialize_with_null_expiry() {
        let json = r#"{"id":"l1","code":"X","expiresAt":null,"usageCount":3}"#;
        let l: EnrollmentLink = serde_json::from_str(json).unwrap();
        assert!(l.active);
        assert_eq!(l.expires_at, None);
        assert_eq!(l.usage_count, 3);
    }
}
