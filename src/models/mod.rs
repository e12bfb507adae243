/// Backend status/category strings are free-form. These enums accept any
/// casing and keep unrecognised values in an `Unknown` variant so they
/// survive a round trip back to the backend.
macro_rules! lenient_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }

            pub fn parse(s: &str) -> Self {
                $(if s.trim().eq_ignore_ascii_case($text) {
                    return $name::$variant;
                })+
                $name::Unknown(s.to_string())
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::parse(&s)
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> String {
                v.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod booking;
pub mod course;
pub mod envelope;
pub mod enrollment_link;
pub mod payment;
pub mod quiz;
pub mod schedule;

pub use booking::{
    Applicant, Attachment, BankTransfer, BookingForm, BookingOutcome, CardDetails, Field,
    PaymentMethod, RegisteredUser,
};
pub use course::{Course, CourseDate};
pub use envelope::Envelope;
pub use enrollment_link::{EnrollmentLink, EnrollmentLinkInput};
pub use payment::{PaymentRecord, PaymentStatus, VerifyDecision};
pub use quiz::{QuizResult, QuizStatus};
pub use schedule::{CourseRef, EventStatus, EventType, NewScheduleEvent, ScheduleEvent, TeacherRef};

/// Serde adapter for naive calendar days.
///
/// Accepts `YYYY-MM-DD` as well as any ISO-8601 timestamp, keeping only the
/// date prefix as written. The instant is never shifted into another zone,
/// so `2025-03-15T23:30:00-05:00` stays on the 15th.
pub mod calendar_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(s: &str) -> Option<NaiveDate> {
        let prefix = s.trim().get(..10)?;
        NaiveDate::parse_from_str(prefix, FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid calendar day: {raw}")))
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar day: {raw}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_calendar_day_ignores_wall_clock() {
        let a = calendar_day::parse("2025-03-15T00:00:00Z").unwrap();
        let b = calendar_day::parse("2025-03-15T23:59:59-08:00").unwrap();
        let c = calendar_day::parse("2025-03-15").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn test_calendar_day_rejects_garbage() {
        assert!(calendar_day::parse("15/03/2025").is_none());
        assert!(calendar_day::parse("2025-3").is_none());
        assert!(calendar_day::parse("").is_none());
    }

    #[test]
    fn test_lenient_enum_keeps_unknown_value() {
        let t: EventType = serde_json::from_str("\"Workshop\"").unwrap();
        assert_eq!(t, EventType::Unknown("Workshop".to_string()));
        assert!(!t.is_known());
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"Workshop\"");
    }

    #[test]
    fn test_lenient_enum_is_case_insensitive() {
        let s: PaymentStatus = serde_json::from_str("\"VERIFIED\"").unwrap();
        assert_eq!(s, PaymentStatus::Verified);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"verified\"");
    }
}
