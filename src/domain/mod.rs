//! Core domain types and logic.

pub mod cache;
pub mod chart;
pub mod error;
pub mod holding;
pub mod period;
pub mod price_series;
pub mod settings;
pub mod ticker_info;
