//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::portfolio_file_adapter::read_portfolio;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::domain::period::Period;
use crate::domain::settings::{DEFAULT_PORTFOLIO_PATH, Settings};

#[derive(Parser, Debug)]
#[command(name = "tickerboard", about = "Candlestick dashboard for a portfolio of tickers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web dashboard
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        portfolio: Option<PathBuf>,
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Render the dashboard once as a standalone HTML page
    Render {
        #[arg(long, default_value = "1d")]
        period: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        portfolio: Option<PathBuf>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a portfolio file and list its tickers
    Validate {
        #[arg(short, long, default_value = DEFAULT_PORTFOLIO_PATH)]
        portfolio: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve {
            config,
            portfolio,
            listen,
        } => run_serve(config.as_deref(), portfolio, listen.as_deref()),
        Command::Render {
            period,
            config,
            portfolio,
            output,
        } => run_render(&period, config.as_deref(), portfolio, output.as_deref()),
        Command::Validate { portfolio } => run_validate(&portfolio),
    }
}

fn report(err: &DashboardError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

/// Settings from the optional INI file, with command-line overrides applied.
pub fn resolve_settings(
    config_path: Option<&Path>,
    portfolio: Option<PathBuf>,
    listen: Option<&str>,
) -> Result<Settings, DashboardError> {
    let adapter = match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path).map_err(|e| DashboardError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => FileConfigAdapter::empty(),
    };
    let mut settings = Settings::from_config(&adapter)?;

    if let Some(path) = portfolio {
        settings.portfolio_path = path;
    }
    if let Some(addr) = listen {
        settings.listen = addr.parse().map_err(|_| DashboardError::ConfigInvalid {
            section: "server".to_string(),
            key: "listen".to_string(),
            reason: format!("{addr:?} is not a socket address"),
        })?;
    }
    Ok(settings)
}

/// Dashboard backed by the Yahoo Finance adapter.
pub fn build_dashboard(settings: &Settings) -> Result<Dashboard, DashboardError> {
    let provider = YahooAdapter::new(&settings.provider)?;
    Ok(Dashboard::new(
        Arc::new(provider),
        settings.portfolio_path.clone(),
    ))
}

fn run_serve(config_path: Option<&Path>, portfolio: Option<PathBuf>, listen: Option<&str>) -> ExitCode {
    #[cfg(feature = "web")]
    {
        let settings = match resolve_settings(config_path, portfolio, listen) {
            Ok(s) => s,
            Err(e) => return report(&e),
        };
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => return report(&e.into()),
        };
        match runtime.block_on(serve(settings)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => report(&e),
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (config_path, portfolio, listen);
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}

#[cfg(feature = "web")]
async fn serve(settings: Settings) -> Result<(), DashboardError> {
    use crate::adapters::web::{AppState, build_router};

    let dashboard = build_dashboard(&settings)?;
    let router = build_router(AppState { dashboard });

    let listener = tokio::net::TcpListener::bind(settings.listen).await?;
    tracing::info!(
        addr = %settings.listen,
        portfolio = %settings.portfolio_path.display(),
        "serving dashboard"
    );
    axum::serve(listener, router).await?;
    Ok(())
}

/// Runs the loop once and renders the standalone page.
#[cfg(feature = "web")]
pub async fn render_page(dashboard: &Dashboard, period: Period) -> Result<String, DashboardError> {
    use crate::adapters::web::{DashboardTemplate, render_template};

    let view = dashboard.render(period).await?;
    render_template(&DashboardTemplate::standalone(&view))
}

fn run_render(
    period: &str,
    config_path: Option<&Path>,
    portfolio: Option<PathBuf>,
    output: Option<&Path>,
) -> ExitCode {
    #[cfg(feature = "web")]
    {
        let result = (|| {
            let period: Period = period.parse()?;
            let settings = resolve_settings(config_path, portfolio, None)?;
            let dashboard = build_dashboard(&settings)?;
            let runtime = tokio::runtime::Runtime::new()?;
            let html = runtime.block_on(render_page(&dashboard, period))?;
            match output {
                Some(path) => {
                    fs::write(path, html)?;
                    eprintln!("Wrote {} ({period})", path.display());
                }
                None => println!("{html}"),
            }
            Ok::<_, DashboardError>(())
        })();

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => report(&e),
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (period, config_path, portfolio, output);
        eprintln!("error: web feature is required for render");
        ExitCode::from(1)
    }
}

fn run_validate(path: &Path) -> ExitCode {
    match read_portfolio(path) {
        Ok(portfolio) => {
            eprintln!("{}: {} holdings", path.display(), portfolio.len());
            for ticker in portfolio.tickers() {
                println!("{ticker}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}
