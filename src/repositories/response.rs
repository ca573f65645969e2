use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entity::answer;
use crate::entity::response::{self, ActiveModel, Column, Entity as ResponseEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateResponse, Response, ResponseFilter};

/// Response repository for database operations
pub struct ResponseRepository;

impl ResponseRepository {
    /// Insert a response and its answers in one transaction.
    ///
    /// `answers` holds `(question_id, stored value)` pairs. Nothing is written
    /// unless every row is.
    pub async fn create_with_answers(
        db: &DatabaseConnection,
        questionnaire_id: Uuid,
        input: &CreateResponse,
        answers: Vec<(Uuid, String)>,
    ) -> AppResult<Response> {
        let txn = db.begin().await?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            questionnaire_id: Set(questionnaire_id),
            created_at: Set(OffsetDateTime::now_utc()),
            nama: Set(input.nama.clone()),
            usia: Set(input.usia),
            jenis_kelamin: Set(input.jenis_kelamin.clone()),
            pekerjaan: Set(input.pekerjaan.clone()),
            jaminan: Set(input.jaminan.clone()),
            saran: Set(input.saran.clone()),
        };
        let response = model.insert(&txn).await?;

        if !answers.is_empty() {
            let rows = answers
                .into_iter()
                .map(|(question_id, value)| answer::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    response_id: Set(response.id),
                    question_id: Set(question_id),
                    value: Set(value),
                });
            answer::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;

        tracing::info!(
            response_id = %response.id,
            questionnaire_id = %questionnaire_id,
            "Response submitted"
        );

        Ok(response.into())
    }

    /// Responses of a questionnaire, newest first
    pub async fn list_by_questionnaire(
        db: &DatabaseConnection,
        questionnaire_id: Uuid,
    ) -> AppResult<Vec<Response>> {
        let models = ResponseEntity::find()
            .filter(Column::QuestionnaireId.eq(questionnaire_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Responses with a non-empty suggestion, newest first.
    ///
    /// The date range covers whole days: `[start, end + 1 day)` in UTC.
    pub async fn list_suggestions(
        db: &DatabaseConnection,
        questionnaire_id: Uuid,
        filter: &ResponseFilter,
    ) -> AppResult<Vec<Response>> {
        let mut query = ResponseEntity::find()
            .filter(Column::QuestionnaireId.eq(questionnaire_id))
            .filter(Column::Saran.is_not_null())
            .filter(Column::Saran.ne(""));

        if let Some(start) = filter.start_date {
            query = query.filter(Column::CreatedAt.gte(start_of_day(start)));
        }
        if let Some(end) = filter.end_date {
            let next_day = end
                .next_day()
                .ok_or_else(|| AppError::Validation("end_date is out of range".to_string()))?;
            query = query.filter(Column::CreatedAt.lt(start_of_day(next_day)));
        }
        if let Some(jenis_kelamin) = &filter.jenis_kelamin {
            query = query.filter(Column::JenisKelamin.eq(jenis_kelamin.as_str()));
        }
        if let Some(pekerjaan) = &filter.pekerjaan {
            query = query.filter(Column::Pekerjaan.eq(pekerjaan.as_str()));
        }
        if let Some(jaminan) = &filter.jaminan {
            query = query.filter(Column::Jaminan.eq(jaminan.as_str()));
        }

        let models = query.order_by_desc(Column::CreatedAt).all(db).await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

fn start_of_day(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

impl From<response::Model> for Response {
    fn from(m: response::Model) -> Self {
        Self {
            id: m.id,
            questionnaire_id: m.questionnaire_id,
            created_at: m.created_at,
            nama: m.nama,
            usia: m.usia,
            jenis_kelamin: m.jenis_kelamin,
            pekerjaan: m.pekerjaan,
            jaminan: m.jaminan,
            saran: m.saran,
        }
    }
}
