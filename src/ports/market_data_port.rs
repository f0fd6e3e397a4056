//! Market data access port.

use async_trait::async_trait;

use crate::domain::error::DashboardError;
use crate::domain::period::Period;
use crate::domain::price_series::PriceSeries;
use crate::domain::ticker_info::TickerInfo;

/// Price history and metadata for one (ticker, period) request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerData {
    pub series: PriceSeries,
    pub info: TickerInfo,
}

/// Outcome of asking the provider for a ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerLookup {
    Found(TickerData),
    NotFound { ticker: String },
}

/// Port for remote market data providers.
///
/// A ticker the provider does not know is `Ok(TickerLookup::NotFound)`;
/// `Err` is reserved for transport and decoding failures.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Human-readable name of the provider, for logs.
    fn name(&self) -> &str;

    async fn fetch(&self, ticker: &str, period: Period) -> Result<TickerLookup, DashboardError>;
}
