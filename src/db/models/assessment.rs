use serde::{Deserialize, Serialize};
use sqlx::types::{Json, Uuid};
use std::collections::HashMap;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub id: Uuid,
    pub question: String,
    /// Ordered answer options; `correct_answer` letters index into this list.
    pub options: Json<Vec<String>>,
    pub correct_answer: String,
    pub module_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub order: i32,
    pub created_at: OffsetDateTime,
}

/// Learner-facing projection of a question: the answer key stays server-side.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub module_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub order: i32,
}

impl From<AssessmentQuestion> for QuestionView {
    fn from(q: AssessmentQuestion) -> Self {
        QuestionView {
            id: q.id,
            question: q.question,
            options: q.options.0,
            module_id: q.module_id,
            section_id: q.section_id,
            order: q.order,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub module_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    /// Raw submitted map, question id → submitted value, kept verbatim.
    pub answers: Json<HashMap<String, String>>,
    pub passed: bool,
    pub certificate_generated: bool,
    pub date_taken: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewQuestion {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 2, max = 4))]
    pub options: Vec<String>,
    #[validate(length(equal = 1))]
    pub correct_answer: String,
    pub order: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestion {
    #[validate(length(min = 1))]
    pub question: Option<String>,
    #[validate(length(min = 2, max = 4))]
    pub options: Option<Vec<String>>,
    #[validate(length(equal = 1))]
    pub correct_answer: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SubmittedAnswers {
    pub answers: HashMap<String, String>,
}
