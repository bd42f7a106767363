//! Admin page

use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

use crate::state::AppState;

/// GET /admin - Serve the static admin page from disk
pub fn router(admin_page: &Path) -> Router<AppState> {
    Router::new().route_service("/admin", ServeFile::new(admin_page))
}
