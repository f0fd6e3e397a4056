//! YAML portfolio file reader.
//!
//! The file is a sequence of mappings, each with a `ticker` key:
//!
//! ```yaml
//! - ticker: AAPL
//! - ticker: MSFT
//! ```

use std::fs;
use std::path::Path;

use crate::domain::error::DashboardError;
use crate::domain::holding::Portfolio;

pub fn read_portfolio<P: AsRef<Path>>(path: P) -> Result<Portfolio, DashboardError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_portfolio(&content, &path.display().to_string())
}

/// Parses portfolio YAML; `file` is only used in error messages.
pub fn parse_portfolio(content: &str, file: &str) -> Result<Portfolio, DashboardError> {
    let portfolio: Portfolio =
        serde_yaml::from_str(content).map_err(|e| DashboardError::PortfolioParse {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
    tracing::debug!(file, holdings = portfolio.len(), "portfolio parsed");
    Ok(portfolio)
}
