//! HTTP request handlers for web adapter.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::adapters::chart_svg::render_candlestick_svg;
use crate::domain::error::DashboardError;
use crate::domain::period::Period;

use super::templates::{DashboardTemplate, HoldingsTemplate, render_template};
use super::{AppState, WebError, is_htmx_request};

#[derive(Debug, Default, serde::Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

impl PeriodQuery {
    /// The requested period, or the first selector option when absent.
    pub fn resolve(&self) -> Result<Period, DashboardError> {
        match self.period.as_deref().map(str::trim) {
            None | Some("") => Ok(Period::default()),
            Some(p) => p.parse(),
        }
    }
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, WebError> {
    let fail = |err: DashboardError| WebError::from(err).for_request(&headers);

    let period = query.resolve().map_err(fail)?;
    let view = state.dashboard.render(period).await.map_err(fail)?;

    let html = if is_htmx_request(&headers) {
        render_template(&HoldingsTemplate::new(&view))
    } else {
        render_template(&DashboardTemplate::new(&view))
    }
    .map_err(fail)?;

    Ok(Html(html).into_response())
}

pub async fn chart_svg(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, WebError> {
    let period = query.resolve()?;
    let section = state.dashboard.section(&ticker, period).await?;
    if section.chart.traces.iter().all(|t| t.is_empty()) {
        return Err(WebError::not_found(format!(
            "no price data for {ticker} over {period}"
        )));
    }

    let svg = render_candlestick_svg(&section.chart);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

pub async fn not_found(headers: HeaderMap) -> WebError {
    WebError::not_found("Page not found").for_request(&headers)
}
