//! Domain error types.

/// Top-level error type for tickerboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("portfolio parse error in {file}: {reason}")]
    PortfolioParse { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid period {value:?}, expected one of {expected}")]
    InvalidPeriod { value: String, expected: String },

    #[error("ticker not found: {ticker}")]
    TickerNotFound { ticker: String },

    #[error("provider error for {ticker}: {reason}")]
    Provider { ticker: String, reason: String },

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("malformed price series: {reason}")]
    MalformedSeries { reason: String },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) | DashboardError::Render { .. } => 1,
            DashboardError::PortfolioParse { .. }
            | DashboardError::ConfigParse { .. }
            | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::Provider { .. } | DashboardError::Network { .. } => 3,
            DashboardError::TickerNotFound { .. } => 4,
            DashboardError::InvalidPeriod { .. } | DashboardError::MalformedSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

impl From<&reqwest::Error> for DashboardError {
    fn from(err: &reqwest::Error) -> Self {
        DashboardError::Network {
            reason: redact_query(err.to_string()),
        }
    }
}

/// reqwest errors carry the full request URL, including Yahoo's crumb
/// token; keep only the path.
fn redact_query(msg: String) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg,
    }
}
