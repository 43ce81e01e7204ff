use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

mod auth;
mod portfolio;

/// API and broker login routes, with the UI bundle behind every other path.
pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    Router::new()
        .merge(portfolio::router())
        .merge(auth::router())
        .fallback_service(static_service(&config.static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// UI bundle service: files from `static_dir`, `index.html` for anything
/// else.
pub fn static_service(static_dir: &str) -> ServeDir<ServeFile> {
    let static_dir = PathBuf::from(static_dir);
    let index_file = static_dir.join("index.html");
    ServeDir::new(static_dir).fallback(ServeFile::new(index_file))
}
