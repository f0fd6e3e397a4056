//! Dashboard orchestration: portfolio → per-holding fetch → chart.
//!
//! [`Dashboard`] owns both memo caches, so their lifetime is the lifetime of
//! the dashboard value. A server keeps one dashboard for the whole process.

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::portfolio_file_adapter::read_portfolio;
use crate::domain::cache::FetchCache;
use crate::domain::chart::{CandlestickChart, build_candlestick};
use crate::domain::error::DashboardError;
use crate::domain::holding::Portfolio;
use crate::domain::period::Period;
use crate::domain::ticker_info::InfoField;
use crate::ports::market_data_port::{MarketDataPort, TickerData, TickerLookup};

/// One holding, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingSection {
    pub ticker: String,
    pub heading: String,
    pub info_fields: Vec<InfoField>,
    pub chart: CandlestickChart,
}

/// Everything a page needs for one run of the loop.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub period: Period,
    pub sections: Vec<HoldingSection>,
}

pub struct Dashboard {
    market_data: Arc<dyn MarketDataPort>,
    portfolio_path: PathBuf,
    portfolios: FetchCache<PathBuf, Portfolio>,
    tickers: FetchCache<(String, Period), TickerData>,
}

impl Dashboard {
    pub fn new(market_data: Arc<dyn MarketDataPort>, portfolio_path: impl Into<PathBuf>) -> Self {
        Self {
            market_data,
            portfolio_path: portfolio_path.into(),
            portfolios: FetchCache::new(),
            tickers: FetchCache::new(),
        }
    }

    /// Loads the configured portfolio, reading the file only on first use.
    pub async fn portfolio(&self) -> Result<Arc<Portfolio>, DashboardError> {
        let path = self.portfolio_path.clone();
        self.portfolios
            .get_or_fetch(path.clone(), || async move {
                tracing::info!(path = %path.display(), "loading portfolio");
                read_portfolio(&path)
            })
            .await
    }

    /// Drops the cached portfolio so the next run re-reads the file.
    pub async fn reload_portfolio(&self) {
        self.portfolios.invalidate(&self.portfolio_path).await;
    }

    /// Drops every cached ticker fetch.
    pub async fn clear_ticker_cache(&self) {
        self.tickers.clear().await;
    }

    pub async fn cached_tickers(&self) -> usize {
        self.tickers.len().await
    }

    /// Price history and metadata for `ticker`, fetched once per
    /// (ticker, period).
    pub async fn ticker_data(
        &self,
        ticker: &str,
        period: Period,
    ) -> Result<Arc<TickerData>, DashboardError> {
        let market_data = Arc::clone(&self.market_data);
        self.tickers
            .get_or_fetch((ticker.to_string(), period), || async move {
                tracing::info!(ticker, %period, provider = market_data.name(), "fetching");
                match market_data.fetch(ticker, period).await {
                    Ok(TickerLookup::Found(data)) => Ok(data),
                    Ok(TickerLookup::NotFound { ticker }) => {
                        Err(DashboardError::TickerNotFound { ticker })
                    }
                    Err(err) => Err(err),
                }
            })
            .await
    }

    /// Heading, info fields and chart for one holding.
    pub async fn section(
        &self,
        ticker: &str,
        period: Period,
    ) -> Result<HoldingSection, DashboardError> {
        let data = self.ticker_data(ticker, period).await?;
        Ok(HoldingSection {
            ticker: ticker.to_string(),
            heading: data.info.display_name(ticker).to_string(),
            info_fields: data.info.visible_fields(),
            chart: build_candlestick(&data.series),
        })
    }

    /// Runs the loop for every holding in file order. The first failing
    /// holding aborts the whole run.
    pub async fn render(&self, period: Period) -> Result<DashboardView, DashboardError> {
        let portfolio = self.portfolio().await?;
        let mut sections = Vec::with_capacity(portfolio.len());
        for holding in portfolio.iter() {
            sections.push(self.section(&holding.ticker, period).await?);
        }
        tracing::debug!(%period, holdings = sections.len(), "dashboard rendered");
        Ok(DashboardView { period, sections })
    }
}
