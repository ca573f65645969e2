use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::questionnaire::{self, ActiveModel, Column, Entity as QuestionnaireEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateQuestionnaire, Questionnaire};
use crate::repositories::Repository;

/// Questionnaire repository for database operations
pub struct QuestionnaireRepository;

#[async_trait]
impl Repository<Questionnaire> for QuestionnaireRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Questionnaire> {
        let model = QuestionnaireEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Questionnaire".to_string()))?;

        Ok(model.into())
    }

    async fn list(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Questionnaire>> {
        let models = QuestionnaireEntity::find()
            .order_by_asc(Column::Name)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = QuestionnaireEntity::find().count(db).await?;
        Ok(count)
    }
}

impl QuestionnaireRepository {
    /// Create a new questionnaire
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateQuestionnaire,
    ) -> AppResult<Questionnaire> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") || e.to_string().contains("unique") {
                AppError::Conflict("Questionnaire name already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }

    /// Every questionnaire, ordered by name
    pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<Questionnaire>> {
        let models = QuestionnaireEntity::find()
            .order_by_asc(Column::Name)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Resolve a public form slug ("rawat-inap") to its questionnaire
    pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> AppResult<Questionnaire> {
        Self::list_all(db)
            .await?
            .into_iter()
            .find(|q| q.slug() == slug)
            .ok_or_else(|| AppError::NotFound("Questionnaire".to_string()))
    }
}

impl From<questionnaire::Model> for Questionnaire {
    fn from(m: questionnaire::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
