//! Concrete adapter implementations for ports.

pub mod chart_svg;
pub mod file_config_adapter;
pub mod portfolio_file_adapter;
#[cfg(feature = "web")]
pub mod web;
pub mod yahoo_adapter;
