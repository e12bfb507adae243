use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar_day;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDate {
    pub id: String,
    pub course_id: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats_available: Option<u32>,
}

impl CourseDate {
    pub fn is_full(&self) -> bool {
        self.seats_available == Some(0)
    }
}
