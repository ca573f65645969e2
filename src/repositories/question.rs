use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::question::{self, ActiveModel, Column, Entity as QuestionEntity};
use crate::error::AppResult;
use crate::models::{CreateQuestion, Question};

/// Question repository for database operations
pub struct QuestionRepository;

impl QuestionRepository {
    /// Create a question inside a questionnaire
    pub async fn create(
        db: &DatabaseConnection,
        questionnaire_id: Uuid,
        input: &CreateQuestion,
    ) -> AppResult<Question> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            questionnaire_id: Set(questionnaire_id),
            text: Set(input.text.clone()),
            label: Set(input.label.clone()),
            urutan: Set(input.urutan),
            question_type: Set(input.question_type),
            aktif: Set(input.aktif),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Active questions shown on the public form, ordered by `urutan`
    pub async fn list_active(
        db: &DatabaseConnection,
        questionnaire_id: Uuid,
    ) -> AppResult<Vec<Question>> {
        let models = QuestionEntity::find()
            .filter(Column::QuestionnaireId.eq(questionnaire_id))
            .filter(Column::Aktif.eq(true))
            .order_by_asc(Column::Urutan)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// All questions of a questionnaire (active or not), ordered by `urutan`
    pub async fn list_by_questionnaire(
        db: &DatabaseConnection,
        questionnaire_id: Uuid,
    ) -> AppResult<Vec<Question>> {
        let models = QuestionEntity::find()
            .filter(Column::QuestionnaireId.eq(questionnaire_id))
            .order_by_asc(Column::Urutan)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

impl From<question::Model> for Question {
    fn from(m: question::Model) -> Self {
        Self {
            id: m.id,
            questionnaire_id: m.questionnaire_id,
            text: m.text,
            label: m.label,
            urutan: m.urutan,
            question_type: m.question_type,
            aktif: m.aktif,
        }
    }
}
