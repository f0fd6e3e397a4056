//! Yahoo Finance adapter.
//!
//! Uses the `yahoo_finance_api` crate. Each fetch makes two calls: the
//! chart range (daily OHLCV plus session metadata) and the quote summary
//! (company profile, key statistics). Both land in one [`TickerInfo`] map,
//! profile fields first.

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{Map, Value};
use std::future::Future;
use std::time::Duration;
use yahoo_finance_api::{YResponse, YahooConnector, YahooError};

use crate::domain::error::DashboardError;
use crate::domain::period::Period;
use crate::domain::price_series::PriceSeries;
use crate::domain::settings::ProviderSettings;
use crate::domain::ticker_info::TickerInfo;
use crate::ports::market_data_port::{MarketDataPort, TickerData, TickerLookup};

const PROVIDER: &str = "Yahoo Finance";

/// Substrings Yahoo uses when a symbol does not exist.
const NOT_FOUND_MARKERS: [&str; 3] = ["Not Found", "404", "No data found"];

pub struct YahooAdapter {
    connector: tokio::sync::Mutex<YahooConnector>,
    timeout: Option<Duration>,
}

impl YahooAdapter {
    pub fn new(settings: &ProviderSettings) -> Result<Self, DashboardError> {
        let connector = YahooConnector::new().map_err(|e| DashboardError::Network {
            reason: format!("failed to create {PROVIDER} connector: {e}"),
        })?;
        Ok(Self {
            connector: tokio::sync::Mutex::new(connector),
            timeout: settings.timeout,
        })
    }

    /// Runs one connector call under the configured timeout.
    async fn limited<T, F>(
        &self,
        ticker: &str,
        request: F,
    ) -> Result<Result<T, YahooError>, DashboardError>
    where
        F: Future<Output = Result<T, YahooError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request).await.map_err(|_| {
                DashboardError::Network {
                    reason: format!("{ticker}: no response within {}s", limit.as_secs()),
                }
            }),
            None => Ok(request.await),
        }
    }

    /// Quote summary as JSON. Failures are logged and leave the profile out.
    async fn profile(&self, ticker: &str) -> Option<Value> {
        let mut connector = self.connector.lock().await;
        match self.limited(ticker, connector.get_ticker_info(ticker)).await {
            Ok(Ok(summary)) => match serde_json::to_value(&summary) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(ticker, error = %e, "unserializable quote summary");
                    None
                }
            },
            Ok(Err(e)) => {
                tracing::warn!(ticker, error = %e, "quote summary unavailable");
                None
            }
            Err(e) => {
                tracing::warn!(ticker, error = %e, "quote summary unavailable");
                None
            }
        }
    }
}

#[async_trait]
impl MarketDataPort for YahooAdapter {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch(&self, ticker: &str, period: Period) -> Result<TickerLookup, DashboardError> {
        tracing::debug!(ticker, %period, "requesting quote range");
        let connector = self.connector.lock().await;
        let response = match self
            .limited(ticker, connector.get_quote_range(ticker, "1d", period.as_str()))
            .await?
        {
            Ok(response) => response,
            Err(err) => return classify_error(ticker, err),
        };
        drop(connector);

        let meta = match response.metadata() {
            Ok(meta) => serde_json::to_value(&meta).map_err(|e| DashboardError::Provider {
                ticker: ticker.to_string(),
                reason: format!("unreadable chart metadata: {e}"),
            })?,
            Err(err) => return classify_error(ticker, err),
        };
        let rows = quote_rows(ticker, &response);
        let profile = self.profile(ticker).await;

        Ok(TickerLookup::Found(TickerData {
            series: series_from_rows(&rows)?,
            info: merge_info(profile.as_ref(), meta),
        }))
    }
}

/// One daily quote, detached from the connector's types.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<&yahoo_finance_api::Quote> for QuoteRow {
    fn from(q: &yahoo_finance_api::Quote) -> Self {
        Self {
            timestamp: q.timestamp,
            open: q.open,
            high: q.high,
            low: q.low,
            close: q.close,
            volume: q.volume,
        }
    }
}

/// Rows of a chart response. A response without usable rows is an empty
/// series rather than an error.
fn quote_rows(ticker: &str, response: &YResponse) -> Vec<QuoteRow> {
    match response.quotes() {
        Ok(quotes) => quotes.iter().map(QuoteRow::from).collect(),
        Err(e) => {
            tracing::debug!(ticker, error = %e, "chart has no quotes");
            Vec::new()
        }
    }
}

pub fn series_from_rows(rows: &[QuoteRow]) -> Result<PriceSeries, DashboardError> {
    let index = rows
        .iter()
        .map(|r| {
            DateTime::from_timestamp(r.timestamp, 0).ok_or_else(|| {
                DashboardError::MalformedSeries {
                    reason: format!("timestamp {} out of range", r.timestamp),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    PriceSeries::from_columns(
        index,
        rows.iter().map(|r| r.open).collect(),
        rows.iter().map(|r| r.high).collect(),
        rows.iter().map(|r| r.low).collect(),
        rows.iter().map(|r| r.close).collect(),
        Some(rows.iter().map(|r| r.volume).collect()),
    )
}

/// Profile fields in provider order, then any chart metadata keys the
/// profile did not already carry.
pub fn merge_info(profile: Option<&Value>, meta: Value) -> TickerInfo {
    let mut fields = Map::new();
    if let Some(profile) = profile {
        collect_fields(profile, &mut fields);
    }
    if let Value::Object(meta) = meta {
        for (key, value) in meta {
            fields.entry(key).or_insert(value);
        }
    }
    TickerInfo::new(fields)
}

/// Flattens quote summary modules into one level. Yahoo's `{raw, fmt}`
/// pairs collapse to the raw value; nested record lists such as company
/// officers are skipped.
fn collect_fields(value: &Value, out: &mut Map<String, Value>) {
    let Value::Object(map) = value else {
        return;
    };
    for (key, field) in map {
        match field {
            Value::Object(inner) if inner.contains_key("raw") || inner.contains_key("fmt") => {
                let flat = inner
                    .get("raw")
                    .or_else(|| inner.get("fmt"))
                    .cloned()
                    .unwrap_or(Value::Null);
                out.entry(key.clone()).or_insert(flat);
            }
            Value::Object(_) => collect_fields(field, out),
            Value::Array(items) if key == "result" => {
                if let Some(first) = items.first() {
                    collect_fields(first, out);
                }
            }
            Value::Array(items) if items.iter().any(Value::is_object) => {}
            _ => {
                out.entry(key.clone()).or_insert_with(|| field.clone());
            }
        }
    }
}

fn classify_error(ticker: &str, err: YahooError) -> Result<TickerLookup, DashboardError> {
    let reason = err.to_string();
    if is_not_found(&reason) {
        return Ok(TickerLookup::NotFound {
            ticker: ticker.to_string(),
        });
    }
    let transport = std::error::Error::source(&err)
        .and_then(|source| source.downcast_ref::<reqwest::Error>());
    match transport {
        Some(source) => Err(DashboardError::from(source)),
        None => Err(DashboardError::Provider {
            ticker: ticker.to_string(),
            reason,
        }),
    }
}

fn is_not_found(reason: &str) -> bool {
    NOT_FOUND_MARKERS.iter().any(|marker| reason.contains(marker))
}
