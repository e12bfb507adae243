use chrono::NaiveDate;

use super::{segment, ApiRequest, Backend};
use crate::errors::AppError;
use crate::models::{calendar_day, NewScheduleEvent, ScheduleEvent};

fn day(d: NaiveDate) -> String {
    d.format(calendar_day::FORMAT).to_string()
}

impl Backend<'_> {
    pub async fn schedule_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, AppError> {
        self.fetch(
            ApiRequest::get("/schedule/calendar")
                .query("startDate", day(start))
                .query("endDate", day(end)),
        )
        .await
    }

    pub async fn teacher_schedule(
        &self,
        teacher_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, AppError> {
        self.fetch(
            ApiRequest::get(format!("/schedule/teacher/{}", segment(teacher_id)))
                .query("startDate", day(start))
                .query("endDate", day(end)),
        )
        .await
    }

    pub async fn schedule_event(&self, id: &str) -> Result<ScheduleEvent, AppError> {
        self.fetch(ApiRequest::get(format!("/schedule/{}", segment(id))))
            .await
    }

    pub async fn create_schedule(&self, event: &NewScheduleEvent) -> Result<ScheduleEvent, AppError> {
        self.fetch(ApiRequest::post("/schedule").json(event)?).await
    }

    pub async fn delete_schedule(&self, id: &str) -> Result<String, AppError> {
        self.execute(ApiRequest::delete(format!("/schedule/{}", segment(id))))
            .await
    }
}
