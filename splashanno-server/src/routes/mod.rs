pub mod admin;
pub mod data;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use splashanno_core::StoreError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, admin_page: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(data::router())
        .merge(admin::router(admin_page))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Convert store errors to plain-text HTTP responses
pub struct AppError(StoreError);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0 {
            StoreError::Validation(_) | StoreError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            StoreError::Read(_)
            | StoreError::Parse(_)
            | StoreError::Structure(_)
            | StoreError::Write(_)
            | StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.0.is_client_error() {
            tracing::warn!(error = %self.0, "Rejected request");
        } else {
            tracing::error!(error = %self.0, "Request failed");
        }

        (status, self.0.to_string()).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}
