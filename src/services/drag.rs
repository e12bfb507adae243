use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{calendar_day, EventType, NewScheduleEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub course_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEvent {
    pub draft_id: Uuid,
    pub event: NewScheduleEvent,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(EventTemplate),
    Dropped(PendingEvent),
}

#[derive(Debug, Default)]
pub struct DragBinder {
    state: DragState,
}

impl DragBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn start(&mut self, template: EventTemplate) {
        self.state = DragState::Dragging(template);
    }

    /// Releases the held template over `target`, the cell id under the
    /// pointer. A missing or unparseable target puts the binder back to
    /// idle. Returns the pending event when the drop was accepted.
    pub fn drop_on(&mut self, target: Option<&str>) -> Option<&PendingEvent> {
        let template = match std::mem::take(&mut self.state) {
            DragState::Dragging(template) => template,
            other => {
                self.state = other;
                return None;
            }
        };

        let Some(date) = target.and_then(parse_cell_id) else {
            tracing::debug!(cell = ?target, "drop outside a calendar cell");
            return None;
        };

        self.state = DragState::Dropped(PendingEvent {
            draft_id: Uuid::new_v4(),
            event: draft_from_template(template, date),
        });
        match &self.state {
            DragState::Dropped(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn submitted(&mut self) -> Option<PendingEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Dropped(pending) => Some(pending),
            other => {
                self.state = other;
                None
            }
        }
    }
}

pub fn parse_cell_id(id: &str) -> Option<NaiveDate> {
    let id = id.trim();
    if id.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(id, calendar_day::FORMAT).ok()
}

fn draft_from_template(template: EventTemplate, date: NaiveDate) -> NewScheduleEvent {
    NewScheduleEvent {
        title: template.title,
        event_type: template.event_type,
        course_id: template.course_id,
        date,
        start_time: template.start_time,
        end_time: template.end_time,
        location: template.location,
        meeting_link: template.meeting_link,
        teacher_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> EventTemplate {
        EventTemplate {
            title: "Safety exam".to_string(),
            event_type: EventType::Exam,
            course_id: "c-2".to_string(),
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            location: "Hall A".to_string(),
            meeting_link: None,
        }
    }

    #[test]
    fn test_drop_on_cell_creates_draft() {
        let mut binder = DragBinder::new();
        binder.start(template());
        let pending = binder.drop_on(Some("2025-03-12")).unwrap();
        assert_eq!(pending.event.date, NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert_eq!(pending.event.title, "Safety exam");
        assert!(matches!(binder.state(), DragState::Dropped(_)));

        let submitted = binder.submitted().unwrap();
        assert_eq!(submitted.event.course_id, "c-2");
        assert_eq!(binder.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_outside_returns_to_idle() {
        let mut binder = DragBinder::new();
        binder.start(template());
        assert!(binder.drop_on(None).is_none());
        assert_eq!(binder.state(), &DragState::Idle);

        binder.start(template());
        assert!(binder.drop_on(Some("sidebar")).is_none());
        assert_eq!(binder.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_while_idle_is_noop() {
        let mut binder = DragBinder::new();
        assert!(binder.drop_on(Some("2025-03-12")).is_none());
        assert_eq!(binder.state(), &DragState::Idle);
        assert!(binder.submitted().is_none());
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut binder = DragBinder::new();
        binder.start(template());
        binder.drop_on(Some("2025-03-12"));
        binder.cancel();
        assert_eq!(binder.state(), &DragState::Idle);
    }

    #[test]
    fn test_submitted_while_dragging_keeps_template() {
        let mut binder = DragBinder::new();
        binder.start(template());
        assert!(binder.submitted().is_none());
        assert!(matches!(binder.state(), DragState::Dragging(_)));
    }

    #[test]
    fn test_parse_cell_id_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let id = crate::services::calendar::cell_id(date);
        assert_eq!(parse_cell_id(&id), Some(date));
        assert_eq!(parse_cell_id("2025-12-31T00:00:00Z"), None);
        assert_eq!(parse_cell_id("2025-02-30"), None);
    }
}
