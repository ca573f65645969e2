use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::{DashboardFilterParams, PaginationParams, QuestionnaireResponse};
use crate::middlewares::AuthUser;
use crate::models::{HeatmapRow, Response, ResponseFilter};
use crate::repositories::{
    AggregateRepository, QuestionRepository, QuestionnaireRepository, Repository,
    ResponseRepository, StatsFilter,
};
use crate::services::{
    demographic_charts, group_question_charts, radar_scores, Chart, LabelGroup, RadarPoint,
};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionnaireListResponse {
    pub data: Vec<QuestionnaireResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Filters as applied, after defaults
#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedFilter {
    pub start_date: String,
    pub end_date: String,
    pub jenis_kelamin: Option<String>,
    pub pekerjaan: Option<String>,
    pub jaminan: Option<String>,
}

impl From<&ResponseFilter> for AppliedFilter {
    fn from(f: &ResponseFilter) -> Self {
        Self {
            start_date: f.start_date.map(|d| d.to_string()).unwrap_or_default(),
            end_date: f.end_date.map(|d| d.to_string()).unwrap_or_default(),
            jenis_kelamin: f.jenis_kelamin.clone(),
            pekerjaan: f.pekerjaan.clone(),
            jaminan: f.jaminan.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub filter: AppliedFilter,
    /// Output of `get_dashboard_stats`, passed through as-is
    #[schema(value_type = Object)]
    pub stats: serde_json::Value,
    pub heatmap: Vec<HeatmapRow>,
    pub radar: Vec<RadarPoint>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DemographicsResponse {
    pub charts: Vec<Chart>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DetailsResponse {
    pub groups: Vec<LabelGroup>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionResponse {
    pub id: Uuid,
    pub created_at: String,
    pub nama: String,
    pub usia: i32,
    pub jenis_kelamin: String,
    pub pekerjaan: String,
    pub jaminan: String,
    pub saran: String,
}

impl TryFrom<Response> for SuggestionResponse {
    type Error = AppError;

    fn try_from(r: Response) -> AppResult<Self> {
        Ok(Self {
            id: r.id,
            created_at: r
                .created_at
                .format(&Rfc3339)
                .map_err(|e| AppError::Internal(e.to_string()))?,
            nama: r.nama,
            usia: r.usia,
            jenis_kelamin: r.jenis_kelamin,
            pekerjaan: r.pekerjaan,
            jaminan: r.jaminan,
            saran: r.saran.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionListResponse {
    pub filter: AppliedFilter,
    pub data: Vec<SuggestionResponse>,
}

// ============ Handlers ============

/// List questionnaires for the dashboard picker
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of questionnaires", body = QuestionnaireListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn list_admin_questionnaires(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<QuestionnaireListResponse>> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100) as u64;
    let offset = params.offset.unwrap_or(0).max(0) as u64;

    let questionnaires = QuestionnaireRepository::list(&state.db, limit, offset).await?;
    let total = QuestionnaireRepository::count(&state.db).await?;

    Ok(Json(QuestionnaireListResponse {
        data: questionnaires.into_iter().map(|q| q.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a questionnaire by ID
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}",
    params(
        ("id" = Uuid, Path, description = "Questionnaire ID")
    ),
    responses(
        (status = 200, description = "Questionnaire details", body = QuestionnaireResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Questionnaire not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn get_admin_questionnaire(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<QuestionnaireResponse>> {
    let questionnaire = QuestionnaireRepository::find_by_id(&state.db, id).await?;
    Ok(Json(questionnaire.into()))
}

/// Headline stats, heatmap and radar scores for the filtered range
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}/overview",
    params(
        ("id" = Uuid, Path, description = "Questionnaire ID"),
        DashboardFilterParams
    ),
    responses(
        (status = 200, description = "Dashboard overview", body = OverviewResponse),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Questionnaire not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn get_overview(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DashboardFilterParams>,
) -> AppResult<Json<OverviewResponse>> {
    let filter = params.resolve(OffsetDateTime::now_utc().date())?;
    let questionnaire = QuestionnaireRepository::find_by_id(&state.db, id).await?;

    let stats_filter = StatsFilter {
        questionnaire_id: questionnaire.id,
        filter,
    };
    let (stats, heatmap, questions) = futures::try_join!(
        AggregateRepository::dashboard_stats(&state.db, &stats_filter),
        AggregateRepository::heatmap_summary(&state.db, &stats_filter),
        QuestionRepository::list_by_questionnaire(&state.db, questionnaire.id),
    )?;

    let radar = radar_scores(&heatmap, &questions);

    Ok(Json(OverviewResponse {
        filter: AppliedFilter::from(&stats_filter.filter),
        stats,
        heatmap,
        radar,
    }))
}

/// Demographic breakdown over all responses
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}/demographics",
    params(
        ("id" = Uuid, Path, description = "Questionnaire ID")
    ),
    responses(
        (status = 200, description = "Demographic charts", body = DemographicsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Questionnaire not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn get_demographics(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DemographicsResponse>> {
    let questionnaire = QuestionnaireRepository::find_by_id(&state.db, id).await?;

    let stats = AggregateRepository::dashboard_stats(
        &state.db,
        &StatsFilter::for_questionnaire(questionnaire.id),
    )
    .await?;

    Ok(Json(DemographicsResponse {
        charts: demographic_charts(&stats),
    }))
}

/// Answer tallies per question, grouped by label
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}/details",
    params(
        ("id" = Uuid, Path, description = "Questionnaire ID")
    ),
    responses(
        (status = 200, description = "Per-question charts", body = DetailsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Questionnaire not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn get_details(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DetailsResponse>> {
    let questionnaire = QuestionnaireRepository::find_by_id(&state.db, id).await?;

    let stats_filter = StatsFilter::for_questionnaire(questionnaire.id);
    let (summary, questions) = futures::try_join!(
        AggregateRepository::questionnaire_summary(&state.db, &stats_filter),
        QuestionRepository::list_by_questionnaire(&state.db, questionnaire.id),
    )?;

    Ok(Json(DetailsResponse {
        groups: group_question_charts(&summary, &questions),
    }))
}

/// Free-text suggestions in the filtered range, newest first
#[utoipa::path(
    get,
    path = "/api/admin/questionnaires/{id}/suggestions",
    params(
        ("id" = Uuid, Path, description = "Questionnaire ID"),
        DashboardFilterParams
    ),
    responses(
        (status = 200, description = "Suggestions", body = SuggestionListResponse),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Questionnaire not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn list_suggestions(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DashboardFilterParams>,
) -> AppResult<Json<SuggestionListResponse>> {
    let filter = params.resolve(OffsetDateTime::now_utc().date())?;
    let questionnaire = QuestionnaireRepository::find_by_id(&state.db, id).await?;

    let responses = ResponseRepository::list_suggestions(&state.db, questionnaire.id, &filter).await?;
    let data = responses
        .into_iter()
        .map(SuggestionResponse::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(SuggestionListResponse {
        filter: AppliedFilter::from(&filter),
        data,
    }))
}
