use serde::{Deserialize, Serialize};

lenient_enum!(QuizStatus {
    Pending => "pending",
    Passed => "passed",
    Failed => "failed",
    Bypassed => "bypassed",
    Rejected => "rejected",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub quiz_title: String,
    pub score: f64,
    pub passing_score: f64,
    #[serde(default = "first_attempt")]
    pub attempt: u32,
    pub status: QuizStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
}

fn first_attempt() -> u32 {
    1
}

impl QuizResult {
    pub fn awaits_review(&self) -> bool {
        matches!(self.status, QuizStatus::Failed | QuizStatus::Pending)
    }
}
