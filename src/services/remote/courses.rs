use super::{segment, ApiRequest, Backend};
use crate::errors::AppError;
use crate::models::{Course, CourseDate};

impl Backend<'_> {
    pub async fn courses(&self) -> Result<Vec<Course>, AppError> {
        self.fetch(ApiRequest::get("/courses")).await
    }

    pub async fn course_dates(&self, course_id: &str) -> Result<Vec<CourseDate>, AppError> {
        self.fetch(ApiRequest::get(format!("/courses/{}/dates", segment(course_id))))
            .await
    }
}
