use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::calendar_day;

lenient_enum!(EventType {
    Theory => "theory",
    Practical => "practical",
    Exam => "exam",
    Meeting => "meeting",
});

lenient_enum!(EventStatus {
    Scheduled => "Scheduled",
    Completed => "Completed",
    Cancelled => "Cancelled",
});

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Scheduled
    }
}

pub const ONLINE_LOCATION: &str = "Online";

pub fn is_online(location: &str) -> bool {
    location.trim().eq_ignore_ascii_case(ONLINE_LOCATION)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub course: CourseRef,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<TeacherRef>,
}

impl ScheduleEvent {
    pub fn is_online(&self) -> bool {
        is_online(&self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEvent {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub course_id: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

impl NewScheduleEvent {
    pub fn normalized(mut self) -> Result<Self, Vec<(&'static str, String)>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(("title", "Title is required".to_string()));
        }
        if self.course_id.trim().is_empty() {
            errors.push(("courseId", "Course is required".to_string()));
        }

        let start = parse_time_of_day(&self.start_time);
        let end = parse_time_of_day(&self.end_time);
        if start.is_none() {
            errors.push(("startTime", "Start time must be HH:MM".to_string()));
        }
        if end.is_none() {
            errors.push(("endTime", "End time must be HH:MM".to_string()));
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push(("endTime", "End time must be after start time".to_string()));
            }
        }

        if self.location.trim().is_empty() {
            errors.push(("location", "Location is required".to_string()));
        }

        let link = self
            .meeting_link
            .take()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        if is_online(&self.location) {
            match link {
                Some(l) => {
                    self.location = ONLINE_LOCATION.to_string();
                    self.meeting_link = Some(l);
                }
                None => errors.push((
                    "meetingLink",
                    "Meeting link is required for online sessions".to_string(),
                )),
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }
}

pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}
