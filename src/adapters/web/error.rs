//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::DashboardError;

use super::is_htmx_request;
use super::templates::{ErrorFragmentTemplate, ErrorTemplate};

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
    /// Render only the error fragment, for HTMX swaps.
    pub fragment: bool,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fragment: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn for_request(mut self, headers: &HeaderMap) -> Self {
        self.fragment = is_htmx_request(headers);
        self
    }
}

pub fn status_from_error(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::InvalidPeriod { .. } => StatusCode::BAD_REQUEST,
        DashboardError::TickerNotFound { .. } => StatusCode::NOT_FOUND,
        DashboardError::Provider { .. }
        | DashboardError::Network { .. }
        | DashboardError::MalformedSeries { .. } => StatusCode::BAD_GATEWAY,
        DashboardError::PortfolioParse { .. }
        | DashboardError::ConfigParse { .. }
        | DashboardError::ConfigInvalid { .. }
        | DashboardError::Render { .. }
        | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DashboardError> for WebError {
    fn from(err: DashboardError) -> Self {
        let status = status_from_error(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        } else {
            tracing::warn!(error = %err, "request rejected");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let rendered = if self.fragment {
            ErrorFragmentTemplate {
                message: &self.message,
                status: self.status.as_u16(),
            }
            .render()
        } else {
            ErrorTemplate {
                message: &self.message,
                status: self.status.as_u16(),
            }
            .render()
        };
        match rendered {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}
