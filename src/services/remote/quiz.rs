use serde::Serialize;

use super::{segment, ApiRequest, Backend};
use crate::errors::AppError;
use crate::models::{QuizResult, QuizStatus};

#[derive(Serialize)]
struct ReviewNote<'a> {
    note: &'a str,
}

impl Backend<'_> {
    pub async fn quiz_results(
        &self,
        status: Option<&QuizStatus>,
        course_id: Option<&str>,
    ) -> Result<Vec<QuizResult>, AppError> {
        let mut req = ApiRequest::get("/admin/quiz/results");
        if let Some(status) = status {
            req = req.query("status", status);
        }
        if let Some(course_id) = course_id {
            req = req.query("courseId", course_id);
        }
        self.fetch(req).await
    }

    pub async fn bypass_quiz(&self, id: &str, note: &str) -> Result<QuizResult, AppError> {
        self.review_quiz(id, "bypass", note).await
    }

    pub async fn reject_quiz(&self, id: &str, note: &str) -> Result<QuizResult, AppError> {
        self.review_quiz(id, "reject", note).await
    }

    async fn review_quiz(&self, id: &str, action: &str, note: &str) -> Result<QuizResult, AppError> {
        self.fetch(
            ApiRequest::post(format!("/admin/quiz/results/{}/{action}", segment(id)))
                .json(&ReviewNote { note })?,
        )
        .await
    }
}
