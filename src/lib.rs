// Library crate for the questionnaire service
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use std::path::Path;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{
    export_raw_data, get_admin_questionnaire, get_demographics, get_details, get_form,
    get_overview, list_admin_questionnaires, list_questionnaires, list_raw_data,
    list_suggestions, login, logout, me, navigate, register, submit_response,
};
use crate::middlewares::{auth_middleware, session_gate};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require an admin session)
    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        // Dashboard routes
        .route("/api/admin/questionnaires", get(list_admin_questionnaires))
        .route("/api/admin/questionnaires/{id}", get(get_admin_questionnaire))
        .route("/api/admin/questionnaires/{id}/overview", get(get_overview))
        .route(
            "/api/admin/questionnaires/{id}/demographics",
            get(get_demographics),
        )
        .route("/api/admin/questionnaires/{id}/details", get(get_details))
        .route("/api/admin/questionnaires/{id}/raw-data", get(list_raw_data))
        .route(
            "/api/admin/questionnaires/{id}/raw-data/export",
            get(export_raw_data),
        )
        .route(
            "/api/admin/questionnaires/{id}/suggestions",
            get(list_suggestions),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Admin pages: static assets, anything else gets the app shell
    let assets = Path::new(&state.config.admin_assets_dir);
    let admin_pages = ServeDir::new(assets)
        .append_index_html_on_directories(false)
        .fallback(ServeFile::new(assets.join("index.html")));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/", get(|| async { "Kuesioner API" }))
        // Public questionnaire routes
        .route("/api/questionnaires", get(list_questionnaires))
        .route("/api/questionnaires/{slug}/form", get(get_form))
        .route("/api/questionnaires/{slug}/navigate", post(navigate))
        .route("/api/questionnaires/{slug}/responses", post(submit_response))
        // Public auth routes
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        // Protected routes
        .merge(protected_routes)
        .nest_service("/admin", admin_pages)
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
