use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middlewares::AuthUser;
use crate::models::{Answer, Question, Response};
use crate::repositories::{
    AnswerRepository, QuestionRepository, QuestionnaireRepository, Repository, ResponseRepository,
};
use crate::services::{
    export_filename, format_answer_value, next_sort, to_csv, CsvRecord, ResponseQuery,
    SortDirection, SortKey,
};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RawDataParams {
    /// Case-insensitive match on nama, pekerjaan, jaminan or jenis_kelamin
    pub search: Option<String>,
    /// Column currently sorted on
    pub sort: Option<SortKey>,
    pub direction: Option<SortDirection>,
    /// Column header just clicked; toggles the sort state
    pub clicked: Option<SortKey>,
}

impl RawDataParams {
    /// Sort state after applying a header click, if any
    fn sort_state(&self) -> Option<(SortKey, SortDirection)> {
        let current = self
            .sort
            .map(|key| (key, self.direction.unwrap_or_default()));

        match self.clicked {
            Some(clicked) => Some(next_sort(current, clicked)),
            None => current,
        }
    }

    fn query(&self) -> ResponseQuery {
        let sort = self.sort_state();
        ResponseQuery {
            search: self.search.clone(),
            sort: sort.map(|(key, _)| key),
            direction: sort.map(|(_, direction)| direction).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormattedAnswer {
    pub question_id: Uuid,
    pub question_text: Option<String>,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RawDataRow {
    pub id: Uuid,
    pub created_at: String,
    pub nama: String,
    pub usia: i32,
    pub jenis_kelamin: String,
    pub pekerjaan: String,
    pub jaminan: String,
    pub saran: Option<String>,
    pub answers: Vec<FormattedAnswer>,
    /// `(question: answer)` pairs joined by `; `
    pub summary: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RawDataResponse {
    pub sort: Option<SortKey>,
    pub direction: SortDirection,
    pub total: usize,
    pub data: Vec<RawDataRow>,
}

// ============ Handlers ============

/// Respondents with their formatted answers, searched and sorted
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}/raw-data",
    params(
        ("id" = Uuid, Path, description = "Questionnaire ID"),
        RawDataParams
    ),
    responses(
        (status = 200, description = "Raw respondent data", body = RawDataResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Questionnaire not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn list_raw_data(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RawDataParams>,
) -> AppResult<Json<RawDataResponse>> {
    let query = params.query();
    let data = RawData::load(&state, id).await?;

    let rows = query
        .apply(data.responses.clone())
        .iter()
        .map(|response| data.row(response))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(RawDataResponse {
        sort: query.sort,
        direction: query.direction,
        total: rows.len(),
        data: rows,
    }))
}

/// Download the searched and sorted respondents as CSV
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}/raw-data/export",
    params(
        ("id" = Uuid, Path, description = "Questionnaire ID"),
        RawDataParams
    ),
    responses(
        (status = 200, description = "CSV attachment", body = String, content_type = "text/csv"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Questionnaire not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn export_raw_data(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RawDataParams>,
) -> AppResult<impl IntoResponse> {
    let data = RawData::load(&state, id).await?;

    let records = params
        .query()
        .apply(data.responses.clone())
        .iter()
        .map(|response| data.csv_record(response))
        .collect::<AppResult<Vec<_>>>()?;
    let body = to_csv(&records)?;

    let filename = export_filename(OffsetDateTime::now_utc().date());
    tracing::info!(questionnaire_id = %id, rows = records.len(), "Exported raw data");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

// ============ Helpers ============

/// Responses, questions and answers of one questionnaire
struct RawData {
    responses: Vec<Response>,
    questions: Vec<Question>,
    answers_by_response: HashMap<Uuid, Vec<Answer>>,
}

impl RawData {
    async fn load(state: &AppState, questionnaire_id: Uuid) -> AppResult<Self> {
        let questionnaire = QuestionnaireRepository::find_by_id(&state.db, questionnaire_id).await?;

        let (responses, questions) = futures::try_join!(
            ResponseRepository::list_by_questionnaire(&state.db, questionnaire.id),
            QuestionRepository::list_by_questionnaire(&state.db, questionnaire.id),
        )?;

        let response_ids: Vec<Uuid> = responses.iter().map(|r| r.id).collect();
        let answers = AnswerRepository::list_by_responses(&state.db, &response_ids).await?;

        let mut answers_by_response: HashMap<Uuid, Vec<Answer>> = HashMap::new();
        for answer in answers {
            answers_by_response
                .entry(answer.response_id)
                .or_default()
                .push(answer);
        }

        Ok(Self {
            responses,
            questions,
            answers_by_response,
        })
    }

    fn answers_of(&self, response_id: Uuid) -> &[Answer] {
        self.answers_by_response
            .get(&response_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn row(&self, response: &Response) -> AppResult<RawDataRow> {
        let answers: Vec<FormattedAnswer> = self
            .answers_of(response.id)
            .iter()
            .map(|answer| FormattedAnswer {
                question_id: answer.question_id,
                question_text: self
                    .questions
                    .iter()
                    .find(|q| q.id == answer.question_id)
                    .map(|q| q.text.clone()),
                value: format_answer_value(&answer.value),
            })
            .collect();

        let summary = answers
            .iter()
            .map(|a| format!("({}: {})", a.question_text.as_deref().unwrap_or("?"), a.value))
            .collect::<Vec<_>>()
            .join("; ");

        Ok(RawDataRow {
            id: response.id,
            created_at: rfc3339(response.created_at)?,
            nama: response.nama.clone(),
            usia: response.usia,
            jenis_kelamin: response.jenis_kelamin.clone(),
            pekerjaan: response.pekerjaan.clone(),
            jaminan: response.jaminan.clone(),
            saran: response.saran.clone(),
            answers,
            summary,
        })
    }

    /// Fixed respondent columns, then one column per question text
    fn csv_record(&self, response: &Response) -> AppResult<CsvRecord> {
        let mut record = CsvRecord::new();
        record.insert(
            "Waktu Submit".to_string(),
            Value::from(rfc3339(response.created_at)?),
        );
        record.insert("Nama".to_string(), Value::from(response.nama.clone()));
        record.insert("Usia".to_string(), Value::from(response.usia));
        record.insert(
            "Jenis Kelamin".to_string(),
            Value::from(response.jenis_kelamin.clone()),
        );
        record.insert("Pekerjaan".to_string(), Value::from(response.pekerjaan.clone()));
        record.insert("Jaminan".to_string(), Value::from(response.jaminan.clone()));

        let answers = self.answers_of(response.id);
        for question in &self.questions {
            let value = answers
                .iter()
                .find(|a| a.question_id == question.id)
                .map(|a| format_answer_value(&a.value))
                .unwrap_or_else(|| "N/A".to_string());
            record.insert(question.text.clone(), Value::from(value));
        }

        Ok(record)
    }
}

fn rfc3339(at: OffsetDateTime) -> AppResult<String> {
    at.format(&Rfc3339)
        .map_err(|e| AppError::Internal(format!("Timestamp formatting failed: {}", e)))
}
