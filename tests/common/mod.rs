#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use tickerboard::domain::error::DashboardError;
use tickerboard::domain::period::Period;
use tickerboard::domain::price_series::{PriceBar, PriceSeries};
use tickerboard::domain::ticker_info::TickerInfo;
use tickerboard::ports::market_data_port::{MarketDataPort, TickerData, TickerLookup};

/// In-memory provider that records every fetch it serves.
pub struct MockMarketData {
    pub data: HashMap<String, TickerData>,
    pub errors: HashMap<String, String>,
    pub calls: Mutex<Vec<(String, Period)>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_ticker(mut self, ticker: &str, long_name: &str, bars: usize) -> Self {
        let mut meta = serde_json::Map::new();
        meta.insert("symbol".into(), ticker.into());
        meta.insert("longName".into(), long_name.into());
        meta.insert("currency".into(), "USD".into());
        meta.insert("regularMarketVolume".into(), 0.into());
        meta.insert("exchangeTimezoneName".into(), serde_json::Value::Null);
        self.data.insert(
            ticker.to_string(),
            TickerData {
                series: sample_series(bars, 100.0),
                info: TickerInfo::new(meta),
            },
        );
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, Period)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, ticker: &str, period: Period) -> Result<TickerLookup, DashboardError> {
        self.calls
            .lock()
            .unwrap()
            .push((ticker.to_string(), period));
        if let Some(reason) = self.errors.get(ticker) {
            return Err(DashboardError::Provider {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(match self.data.get(ticker) {
            Some(data) => TickerLookup::Found(data.clone()),
            None => TickerLookup::NotFound {
                ticker: ticker.to_string(),
            },
        })
    }
}

/// Daily bars starting 2024-01-02, alternating rising and falling days.
pub fn sample_series(count: usize, base_price: f64) -> PriceSeries {
    let start: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let bars = (0..count)
        .map(|i| {
            let mid = base_price + i as f64;
            let (open, close) = if i % 2 == 0 {
                (mid - 0.5, mid + 0.5)
            } else {
                (mid + 0.5, mid - 0.5)
            };
            PriceBar {
                time: start + Duration::days(i as i64),
                open,
                high: mid + 1.0,
                low: mid - 1.0,
                close,
                volume: Some(1_000 + i as u64),
            }
        })
        .collect();
    PriceSeries::from_bars(bars)
}

/// Portfolio YAML file holding `tickers` in order.
pub fn portfolio_file(tickers: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    if tickers.is_empty() {
        writeln!(file, "[]").unwrap();
    }
    for ticker in tickers {
        writeln!(file, "- ticker: {ticker}").unwrap();
    }
    file.flush().unwrap();
    file
}
