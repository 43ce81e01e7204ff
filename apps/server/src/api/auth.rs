use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::{
    error::{html_page, ApiError, PageError, PageResult},
    main_lib::AppState,
};
use mfolio_core::funds::Account;

/// Query pairs in request order. A repeated key keeps every value.
type QueryPairs = Vec<(String, String)>;

/// First `request_token` value, or empty when absent.
fn request_token(pairs: &QueryPairs) -> String {
    pairs
        .iter()
        .find(|(key, _)| key == "request_token")
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

fn invalid_path(route: &str, segment: &str) -> ApiError {
    ApiError::BadRequest(format!(
        "invalid path /{}/{}, expected (/{}/debt or /{}/equity)",
        route, segment, route, route
    ))
}

fn parse_account(route: &str, segment: &str) -> Result<Account, ApiError> {
    segment
        .parse::<Account>()
        .map_err(|_| invalid_path(route, segment))
}

fn logged(tag: &str, err: impl Into<ApiError>) -> PageError {
    let err = err.into();
    tracing::error!("[{}] {}", tag, err);
    PageError(err)
}

/// Redirect to the broker login page of one account.
async fn login(
    State(state): State<Arc<AppState>>,
    Path(segment): Path<String>,
) -> PageResult<Response> {
    let account = parse_account("login", &segment).map_err(|e| logged("login", e))?;
    let url = state
        .holdings_sync_service
        .login_url(account)
        .map_err(|e| logged("login", e))?;

    tracing::info!("[login] Redirecting {} account to broker login", account);
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}

/// Broker redirect target: trade the request token for holdings and save
/// them as the account's snapshot.
async fn auth_redirect(
    State(state): State<Arc<AppState>>,
    Path(segment): Path<String>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> PageResult<Html<String>> {
    let account = parse_account("auth", &segment).map_err(|e| logged("auth", e))?;
    let Query(pairs) =
        query.map_err(|e| logged("auth", ApiError::BadRequest(e.body_text())))?;
    let request_token = request_token(&pairs);

    let saved = state
        .holdings_sync_service
        .sync_account(account, &request_token)
        .await
        .map_err(|e| logged("auth", e))?;

    tracing::info!("[auth] {} account synced, {} funds saved", account, saved);
    Ok(html_page("Success!"))
}

/// `/login`, `/login/`, `/auth` and `/auth/`: no account segment at all.
async fn missing_account(route: &'static str) -> PageError {
    logged(route, invalid_path(route, ""))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(|| missing_account("login")))
        .route("/login/", get(|| missing_account("login")))
        .route("/login/{*account}", get(login))
        .route("/auth", get(|| missing_account("auth")))
        .route("/auth/", get(|| missing_account("auth")))
        .route("/auth/{*account}", get(auth_redirect))
}
