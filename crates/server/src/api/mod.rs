use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use shared::error::{ApiError, ErrorCode};
use tracing::{debug, error};

use crate::app_state::AppState;

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

/// Serves the data file as-is. It is read on every request so edits show up without a
/// restart.
pub(crate) async fn user_data(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let body = tokio::fs::read(&state.data_file).await.map_err(|e| {
        error!(path = %state.data_file.display(), error = %e, "failed to read user data file");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(
                ErrorCode::Internal,
                format!("user data unavailable: {e}"),
            )),
        )
    })?;
    debug!(bytes = body.len(), "serving user data");
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
