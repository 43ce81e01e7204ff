use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Current allocation per asset class, always `[equity, debt, gold]`.
async fn get_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let allocations = state
        .valuation_service
        .get_allocations()
        .await
        .map_err(|e| {
            tracing::error!(tag = e.tag(), "[portfolio] {}", e);
            ApiError::from(e)
        })?;

    Ok((
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(allocations),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/portfolio", get(get_portfolio))
}
