use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Question, QuestionType};

/// Labels for scale codes 1..=5
pub const SCALE_LABELS: [&str; 5] = [
    "Sangat Tidak Puas",
    "Tidak Puas",
    "Cukup Puas",
    "Puas",
    "Sangat Puas",
];

pub const YES_NO_CHOICES: [&str; 2] = ["Ya", "Tidak"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: Uuid,
    pub response_id: Uuid,
    pub question_id: Uuid,
    pub value: String,
}

/// Ya/Tidak answer with an optional note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct YesNoAnswer {
    #[serde(default)]
    pub choice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
}

/// Answer as submitted by the form: a scale code ("1".."5") or a choice object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnswerInput {
    Scale(String),
    Choice(YesNoAnswer),
}

/// Answers keyed by question id
pub type AnswerSet = HashMap<Uuid, AnswerInput>;

impl AnswerInput {
    /// Whether this answer counts as filled in for a question of the given type
    pub fn is_answered(&self, question_type: QuestionType) -> bool {
        match (question_type, self) {
            (QuestionType::Scale, AnswerInput::Scale(value)) => !value.trim().is_empty(),
            (QuestionType::YesNoText, AnswerInput::Choice(answer)) => {
                !answer.choice.trim().is_empty()
            }
            _ => false,
        }
    }

    /// Encode the answer into the stored `answers.value` text
    pub fn to_stored_value(&self, question: &Question) -> AppResult<String> {
        match (question.question_type, self) {
            (QuestionType::Scale, AnswerInput::Scale(value)) => {
                let value = value.trim();
                match value.parse::<u8>() {
                    Ok(code) if (1..=5).contains(&code) => Ok(code.to_string()),
                    _ => Err(AppError::Validation(format!(
                        "Nilai skala harus 1-5 untuk pertanyaan: \"{}\"",
                        question.text
                    ))),
                }
            }
            (QuestionType::YesNoText, AnswerInput::Choice(answer)) => {
                if !YES_NO_CHOICES.contains(&answer.choice.as_str()) {
                    return Err(AppError::Validation(format!(
                        "Harap memilih \"Ya\" atau \"Tidak\" untuk pertanyaan: \"{}\"",
                        question.text
                    )));
                }
                let normalized = YesNoAnswer {
                    choice: answer.choice.clone(),
                    keterangan: Some(answer.keterangan.clone().unwrap_or_default()),
                };
                Ok(serde_json::to_string(&normalized)?)
            }
            _ => Err(AppError::Validation(format!(
                "Jenis jawaban tidak sesuai untuk pertanyaan: \"{}\"",
                question.text
            ))),
        }
    }
}
