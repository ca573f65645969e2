use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AnswerSet, Question, QuestionType, Questionnaire, RespondentInfo};
use crate::repositories::{QuestionRepository, QuestionnaireRepository, ResponseRepository};
use crate::services::{FormPage, FormWizard, Step};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionnaireResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl From<Questionnaire> for QuestionnaireResponse {
    fn from(q: Questionnaire) -> Self {
        Self {
            slug: q.slug(),
            id: q.id,
            name: q.name,
            description: q.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub text: String,
    pub label: String,
    pub urutan: i32,
    pub question_type: QuestionType,
}

impl From<&Question> for QuestionResponse {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text.clone(),
            label: q.label.clone(),
            urutan: q.urutan,
            question_type: q.question_type,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse {
    pub index: usize,
    pub title: String,
    pub page: FormPage,
    pub question_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormResponse {
    pub questionnaire: QuestionnaireResponse,
    pub questions: Vec<QuestionResponse>,
    pub pages: Vec<PageResponse>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Back,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NavigateRequest {
    /// Index of the page currently shown
    pub page: usize,
    pub direction: Direction,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub answers: AnswerSet,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRequest {
    pub respondent: RespondentInfo,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub answers: AnswerSet,
    pub saran: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    pub response_id: Uuid,
    pub answer_count: usize,
}

// ============ Handlers ============

/// List questionnaires available on the public form
#[utoipa::path(
    get,
    path = "/api/questionnaires",
    responses(
        (status = 200, description = "Available questionnaires", body = Vec<QuestionnaireResponse>)
    ),
    tag = "Questionnaires"
)]
pub async fn list_questionnaires(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<QuestionnaireResponse>>> {
    let questionnaires = QuestionnaireRepository::list_all(&state.db).await?;
    Ok(Json(questionnaires.into_iter().map(|q| q.into()).collect()))
}

/// Questionnaire form: active questions and the derived pages
#[utoipa::path(
    get,
    path = "/api/questionnaires/{slug}/form",
    params(
        ("slug" = String, Path, description = "Questionnaire slug, e.g. rawat-inap")
    ),
    responses(
        (status = 200, description = "Form definition", body = FormResponse),
        (status = 404, description = "Questionnaire not found")
    ),
    tag = "Questionnaires"
)]
pub async fn get_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<FormResponse>> {
    let questionnaire = QuestionnaireRepository::find_by_slug(&state.db, &slug).await?;
    let questions = QuestionRepository::list_active(&state.db, questionnaire.id).await?;

    let wizard = FormWizard::new(questions.clone());
    let pages = wizard
        .pages()
        .iter()
        .enumerate()
        .map(|(index, page)| PageResponse {
            index,
            title: page.title().to_string(),
            page: page.clone(),
            question_ids: wizard.page_questions(page).iter().map(|q| q.id).collect(),
        })
        .collect();

    Ok(Json(FormResponse {
        questionnaire: questionnaire.into(),
        questions: questions.iter().map(QuestionResponse::from).collect(),
        pages,
    }))
}

/// Move between form pages; moving forward validates the current page
#[utoipa::path(
    post,
    path = "/api/questionnaires/{slug}/navigate",
    params(
        ("slug" = String, Path, description = "Questionnaire slug")
    ),
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "Next step", body = Step),
        (status = 400, description = "Unanswered question on the current page"),
        (status = 404, description = "Questionnaire not found")
    ),
    tag = "Questionnaires"
)]
pub async fn navigate(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<NavigateRequest>,
) -> AppResult<Json<Step>> {
    let questionnaire = QuestionnaireRepository::find_by_slug(&state.db, &slug).await?;
    let questions = QuestionRepository::list_active(&state.db, questionnaire.id).await?;

    let mut wizard = FormWizard::at(questions, payload.page)?;
    let step = match payload.direction {
        Direction::Next => wizard.next(&payload.answers)?,
        Direction::Back => wizard.back(),
    };

    Ok(Json(step))
}

/// Submit a completed questionnaire
#[utoipa::path(
    post,
    path = "/api/questionnaires/{slug}/responses",
    params(
        ("slug" = String, Path, description = "Questionnaire slug")
    ),
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Response stored", body = SubmitResponse),
        (status = 400, description = "Incomplete respondent info or answers"),
        (status = 404, description = "Questionnaire not found")
    ),
    tag = "Questionnaires"
)]
pub async fn submit_response(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<SubmitRequest>,
) -> AppResult<Json<SubmitResponse>> {
    let questionnaire = QuestionnaireRepository::find_by_slug(&state.db, &slug).await?;
    let create = payload.respondent.into_create(payload.saran)?;

    let questions = QuestionRepository::list_active(&state.db, questionnaire.id).await?;
    FormWizard::new(questions.clone()).validate_all(&payload.answers)?;

    // Only answers to active questions are stored
    let answers = questions
        .iter()
        .map(|question| {
            let answer = payload.answers.get(&question.id).ok_or_else(|| {
                AppError::Validation(format!("Harap menjawab pertanyaan: \"{}\"", question.text))
            })?;
            Ok((question.id, answer.to_stored_value(question)?))
        })
        .collect::<AppResult<Vec<_>>>()?;
    let answer_count = answers.len();

    let response =
        ResponseRepository::create_with_answers(&state.db, questionnaire.id, &create, answers)
            .await?;

    Ok(Json(SubmitResponse {
        response_id: response.id,
        answer_count,
    }))
}
