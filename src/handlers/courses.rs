use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use super::ViewerDate;
use crate::errors::AppError;
use crate::models::{BookingForm, Course, CourseDate, EnrollmentLink, Envelope};
use crate::state::AppState;

// GET /api/courses
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<Course>>>, AppError> {
    let courses = state.backend(None).courses().await?;
    Ok(Json(Envelope::ok(courses)))
}

// GET /api/courses/:id/dates
pub async fn list_course_dates(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    Query(viewer): Query<ViewerDate>,
) -> Result<Json<Envelope<Vec<CourseDate>>>, AppError> {
    let today = viewer.resolve()?;
    let dates = state
        .backend(None)
        .course_dates(&course_id)
        .await?
        .into_iter()
        .filter(|d| d.date >= today && !d.is_full())
        .collect();
    Ok(Json(Envelope::ok(dates)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStart {
    pub link: EnrollmentLink,
    pub course_date_id: Option<String>,
    pub course_dates: Vec<CourseDate>,
}

// GET /api/enroll/:code
pub async fn resolve_link(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(viewer): Query<ViewerDate>,
) -> Result<Json<Envelope<EnrollmentStart>>, AppError> {
    let today = viewer.resolve()?;
    let backend = state.backend(None);
    let link = backend.resolve_enrollment_link(&code).await?;
    if !link.is_usable(today) {
        tracing::info!(code = %code, "inactive enrollment link used");
        return Err(AppError::NotFound(
            "This enrollment link is no longer active".to_string(),
        ));
    }

    let mut form = BookingForm::default();
    form.prefill_from_link(&link);

    let course_dates = match link.course_id.as_deref() {
        Some(course_id) => backend.course_dates(course_id).await?,
        None => Vec::new(),
    };

    Ok(Json(Envelope::ok(EnrollmentStart {
        course_date_id: form.course_date_id,
        course_dates,
        link,
    })))
}
