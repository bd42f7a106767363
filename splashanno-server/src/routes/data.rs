//! Document read and update endpoints

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
};
use serde_json::Value;
use splashanno_core::{DataQuery, StoreError};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data", get(get_data))
        .route("/update-data", post(update_data))
}

/// GET /data - Enriched, categorized and filtered document
async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<Value>, AppError> {
    let stored = state.store.get().await?;
    let now = chrono::Utc::now();

    let doc = state.pipeline.render(&stored, &query, now)?;

    Ok(Json(doc))
}

/// POST /update-data - Replace the whole document with the request body
async fn update_data(State(state): State<AppState>, body: Bytes) -> Result<&'static str, AppError> {
    let doc = parse_body(&body)?;

    if state.validate_writes {
        state.pipeline.validate(&doc)?;
    }

    state.store.write(doc).await?;

    Ok("Data updated successfully")
}

fn parse_body(body: &[u8]) -> Result<Value, StoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(StoreError::Validation("Content is required".into()));
    }

    let doc: Value = serde_json::from_slice(body)
        .map_err(|e| StoreError::Validation(format!("Invalid JSON body: {e}")))?;

    if doc.is_null() {
        return Err(StoreError::Validation("Content is required".into()));
    }

    Ok(doc)
}
