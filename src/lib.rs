//! tickerboard: candlestick dashboard for a portfolio of tickers.
//!
//! Hexagonal architecture: domain types in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. [`dashboard`] ties a portfolio
//! file and a market data provider together into a rendered view.

pub mod adapters;
pub mod cli;
pub mod dashboard;
pub mod domain;
pub mod ports;
