use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{attachment_disposition, require_bearer, viewer_today};
use crate::errors::AppError;
use crate::models::{calendar_day, Envelope, NewScheduleEvent, ScheduleEvent};
use crate::services::calendar::{self, CalendarViewState, CellGrid, ViewMode};
use crate::services::drag::{DragBinder, EventTemplate, PendingEvent};
use crate::services::ics::generate_ics;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub date: Option<String>,
    #[serde(default)]
    pub mode: ViewMode,
    /// The viewer's local date.
    pub today: Option<String>,
}

impl CalendarQuery {
    fn view(&self, today: NaiveDate) -> Result<CalendarViewState, AppError> {
        let reference = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => calendar_day::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("invalid date: {raw}")))?,
        };
        Ok(CalendarViewState::new(reference, self.mode))
    }
}

/// One rendered calendar view plus the reference dates the prev/next
/// buttons move to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPage {
    #[serde(flatten)]
    pub grid: CellGrid,
    #[serde(with = "calendar_day")]
    pub range_start: NaiveDate,
    #[serde(with = "calendar_day")]
    pub range_end: NaiveDate,
    #[serde(with = "calendar_day")]
    pub prev: NaiveDate,
    #[serde(with = "calendar_day")]
    pub next: NaiveDate,
}

fn page(view: CalendarViewState, events: &[ScheduleEvent], today: NaiveDate) -> CalendarPage {
    let (range_start, range_end) = view.visible_range();
    let mut prev = view;
    prev.prev();
    let mut next = view;
    next.next();
    CalendarPage {
        grid: calendar::project(events, view.reference, view.mode, today),
        range_start,
        range_end,
        prev: prev.reference,
        next: next.reference,
    }
}

// GET /api/admin/calendar
pub async fn admin_calendar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Envelope<CalendarPage>>, AppError> {
    let token = require_bearer(&headers)?;
    let today = viewer_today(query.today.as_deref())?;
    let view = query.view(today)?;
    let (start, end) = view.visible_range();

    let events = state.backend(Some(token)).schedule_range(start, end).await?;
    tracing::debug!(count = events.len(), %start, %end, "calendar events loaded");

    Ok(Json(Envelope::ok(page(view, &events, today))))
}

// GET /api/teacher/:teacher_id/schedule
pub async fn teacher_schedule(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(teacher_id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Envelope<CalendarPage>>, AppError> {
    let token = require_bearer(&headers)?;
    let today = viewer_today(query.today.as_deref())?;
    let view = query.view(today)?;
    let (start, end) = view.visible_range();

    let events = state
        .backend(Some(token))
        .teacher_schedule(&teacher_id, start, end)
        .await?;

    Ok(Json(Envelope::ok(page(view, &events, today))))
}

// POST /api/admin/schedules
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(event): Json<NewScheduleEvent>,
) -> Result<Json<Envelope<ScheduleEvent>>, AppError> {
    let token = require_bearer(&headers)?;
    let event = event.normalized().map_err(AppError::invalid)?;

    let created = state.backend(Some(token)).create_schedule(&event).await?;
    tracing::info!(id = %created.id, date = %created.date, "schedule event created");

    Ok(Json(Envelope::ok_with_message("Event created", created)))
}

// DELETE /api/admin/schedules/:id
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Value>>, AppError> {
    let token = require_bearer(&headers)?;
    let message = state.backend(Some(token)).delete_schedule(&id).await?;
    tracing::info!(id = %id, "schedule event deleted");
    Ok(Json(Envelope::message(if message.is_empty() {
        "Event deleted".to_string()
    } else {
        message
    })))
}

#[derive(Deserialize)]
pub struct DropRequest {
    pub template: EventTemplate,
    #[serde(default)]
    pub target: Option<String>,
}

// POST /api/admin/schedules/drop
pub async fn drop_template(
    headers: HeaderMap,
    Json(req): Json<DropRequest>,
) -> Result<Json<Envelope<PendingEvent>>, AppError> {
    require_bearer(&headers)?;

    let mut binder = DragBinder::new();
    binder.start(req.template);
    if binder.drop_on(req.target.as_deref()).is_none() {
        return Err(AppError::invalid([(
            "target",
            "Drop the template on a calendar day".to_string(),
        )]));
    }
    match binder.submitted() {
        Some(pending) => Ok(Json(Envelope::ok(pending))),
        None => Err(AppError::BadRequest("nothing was dropped".to_string())),
    }
}

// GET /api/admin/schedules/:id/ics
pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let token = require_bearer(&headers)?;
    let id = raw_id.strip_suffix(".ics").unwrap_or(&raw_id);

    let event = state.backend(Some(token)).schedule_event(id).await?;
    let ics = generate_ics(&event);

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(&format!("event-{id}.ics")),
            ),
        ],
        ics,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_to_today_month() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let view = CalendarQuery::default().view(today).unwrap();
        assert_eq!(view.reference, today);
        assert_eq!(view.mode, ViewMode::Month);
    }

    #[test]
    fn test_query_rejects_bad_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let query = CalendarQuery {
            date: Some("12/03/2025".to_string()),
            mode: ViewMode::Week,
            today: None,
        };
        assert!(matches!(query.view(today), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_page_prev_next_follow_mode() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let page = page(CalendarViewState::new(today, ViewMode::Week), &[], today);
        assert_eq!(page.prev, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert_eq!(page.next, NaiveDate::from_ymd_opt(2025, 3, 19).unwrap());
        assert_eq!(page.grid.cells.len(), 7);
        assert_eq!(page.range_start, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }
}
