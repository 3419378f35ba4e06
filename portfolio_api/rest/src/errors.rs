use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn error(code: StatusCode, error: &'static str) -> Response {
    (
        code,
        Json(ApiError {
            success: false,
            error,
        }),
    )
        .into_response()
}

#[derive(Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: &'static str,
}
