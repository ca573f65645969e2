use anyhow::Context;
use tokio::signal;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use kuesioner::config::Config;
use kuesioner::handlers::{
    AppliedFilter, AuthResponse, DemographicsResponse, DetailsResponse, Direction,
    FormResponse, FormattedAnswer, LoginRequest, LogoutResponse, NavigateRequest,
    OverviewResponse, PageResponse, QuestionResponse, QuestionnaireListResponse,
    QuestionnaireResponse, RawDataResponse, RawDataRow, RegisterRequest, SubmitRequest,
    SubmitResponse, SuggestionListResponse, SuggestionResponse,
};
use kuesioner::models::{
    AnswerInput, HeatmapRow, QuestionType, RespondentInfo, UserResponse, YesNoAnswer,
};
use kuesioner::services::{
    Chart, ChartPoint, FormPage, LabelGroup, QuestionChart, RadarPoint, SortDirection, SortKey,
    Step,
};
use kuesioner::state::AppState;
use kuesioner::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::questionnaire::list_questionnaires,
        handlers::questionnaire::get_form,
        handlers::questionnaire::navigate,
        handlers::questionnaire::submit_response,
        handlers::dashboard::list_admin_questionnaires,
        handlers::dashboard::get_admin_questionnaire,
        handlers::dashboard::get_overview,
        handlers::dashboard::get_demographics,
        handlers::dashboard::get_details,
        handlers::dashboard::list_suggestions,
        handlers::raw_data::list_raw_data,
        handlers::raw_data::export_raw_data,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        LogoutResponse,
        UserResponse,
        QuestionnaireResponse,
        QuestionnaireListResponse,
        QuestionResponse,
        QuestionType,
        FormPage,
        PageResponse,
        FormResponse,
        Direction,
        NavigateRequest,
        Step,
        RespondentInfo,
        AnswerInput,
        YesNoAnswer,
        SubmitRequest,
        SubmitResponse,
        AppliedFilter,
        HeatmapRow,
        RadarPoint,
        OverviewResponse,
        Chart,
        ChartPoint,
        DemographicsResponse,
        QuestionChart,
        LabelGroup,
        DetailsResponse,
        SuggestionResponse,
        SuggestionListResponse,
        SortKey,
        SortDirection,
        FormattedAnswer,
        RawDataRow,
        RawDataResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Admin authentication endpoints"),
        (name = "Questionnaires", description = "Public questionnaire form"),
        (name = "Dashboard", description = "Admin reporting and export")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();

    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database connection established");

    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
