use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::services::AuthService;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Where a page request must be sent instead, if anywhere.
///
/// Dashboard pages need a session; the login page is skipped once signed in.
pub fn gate(path: &str, has_session: bool) -> Option<&'static str> {
    let is_dashboard = path == DASHBOARD_PATH
        || path
            .strip_prefix(DASHBOARD_PATH)
            .is_some_and(|rest| rest.starts_with('/'));

    match (has_session, path) {
        (false, _) if is_dashboard => Some(LOGIN_PATH),
        (true, LOGIN_PATH) => Some(DASHBOARD_PATH),
        _ => None,
    }
}

/// Redirects admin page requests based on the session cookie.
/// API routes are left to `auth_middleware`.
pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let has_session = AuthService::session_token(request.headers(), &jar)
        .is_some_and(|token| AuthService::verify_token(&token, &state.config).is_ok());

    match gate(request.uri().path(), has_session) {
        Some(target) => {
            tracing::debug!(from = %request.uri().path(), to = target, "Session gate redirect");
            Redirect::temporary(target).into_response()
        }
        None => next.run(request).await,
    }
}
