use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::entity::question::QuestionType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub text: String,
    pub label: String,
    pub urutan: i32,
    pub question_type: QuestionType,
    pub aktif: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestion {
    pub text: String,
    pub label: String,
    pub urutan: i32,
    pub question_type: QuestionType,
    pub aktif: bool,
}
