use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::answer::{self, Column, Entity as AnswerEntity};
use crate::error::AppResult;
use crate::models::Answer;

/// Answer repository for database operations
pub struct AnswerRepository;

impl AnswerRepository {
    /// Answers belonging to any of the given responses
    pub async fn list_by_responses(
        db: &DatabaseConnection,
        response_ids: &[Uuid],
    ) -> AppResult<Vec<Answer>> {
        if response_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = AnswerEntity::find()
            .filter(Column::ResponseId.is_in(response_ids.iter().copied()))
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

impl From<answer::Model> for Answer {
    fn from(m: answer::Model) -> Self {
        Self {
            id: m.id,
            response_id: m.response_id,
            question_id: m.question_id,
            value: m.value,
        }
    }
}
