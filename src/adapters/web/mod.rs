//! Web server adapter.
//!
//! Axum server with an HTMX-driven page: a sidebar period selector and one
//! section per holding. Requests carrying `HX-Request` get only the
//! holdings fragment.

mod error;
mod handlers;
mod templates;

pub use error::{WebError, status_from_error};
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::dashboard::Dashboard;

pub struct AppState {
    pub dashboard: Dashboard,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/chart/{ticker}", get(handlers::chart_svg))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
