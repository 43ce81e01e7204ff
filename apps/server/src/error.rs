use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use mfolio_core::errors::Error as CoreError;
use thiserror::Error;

/// Failure of a JSON API route.
///
/// Rendered as `200 text/plain` with an `error: <message>` body, the
/// contract the UI expects.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("error: {}", self),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a browser facing route (`/login`, `/auth`).
///
/// Rendered as a `200` HTML page holding the message.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        PageError(ApiError::Core(err))
    }
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let message = format!("Error: {}", self.0);
        (StatusCode::OK, html_page(&message)).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;

/// Minimal page with `message` as its heading.
pub fn html_page(message: &str) -> Html<String> {
    Html(format!("<html><h1>{}</h1></html>", escape_html(message)))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
