//! HTML templates using Askama.

use askama::Template;

use crate::adapters::chart_svg::render_candlestick_svg;
use crate::dashboard::{DashboardView, HoldingSection};
use crate::domain::error::DashboardError;
use crate::domain::period::Period;
use crate::domain::ticker_info::InfoField;

pub struct PeriodOption {
    pub label: &'static str,
    pub selected: bool,
}

pub struct SectionView<'a> {
    pub ticker: &'a str,
    pub heading: &'a str,
    pub info_fields: &'a [InfoField],
    pub chart_svg: String,
}

impl<'a> SectionView<'a> {
    pub fn new(section: &'a HoldingSection) -> Self {
        Self {
            ticker: &section.ticker,
            heading: &section.heading,
            info_fields: &section.info_fields,
            chart_svg: render_candlestick_svg(&section.chart),
        }
    }
}

fn section_views(view: &DashboardView) -> Vec<SectionView<'_>> {
    view.sections.iter().map(SectionView::new).collect()
}

/// Full page: sidebar selector plus every holding.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub period: &'static str,
    pub periods: Vec<PeriodOption>,
    pub sections: Vec<SectionView<'a>>,
    /// Written to a file rather than served; the selector is replaced by a
    /// plain label.
    pub standalone: bool,
}

impl<'a> DashboardTemplate<'a> {
    pub fn new(view: &'a DashboardView) -> Self {
        Self {
            period: view.period.as_str(),
            periods: Period::ALL
                .iter()
                .map(|p| PeriodOption {
                    label: p.as_str(),
                    selected: *p == view.period,
                })
                .collect(),
            sections: section_views(view),
            standalone: false,
        }
    }

    pub fn standalone(view: &'a DashboardView) -> Self {
        Self {
            standalone: true,
            ..Self::new(view)
        }
    }
}

/// Holdings fragment swapped into `#content` by HTMX.
#[derive(Template)]
#[template(path = "holdings.html")]
pub struct HoldingsTemplate<'a> {
    pub sections: Vec<SectionView<'a>>,
}

impl<'a> HoldingsTemplate<'a> {
    pub fn new(view: &'a DashboardView) -> Self {
        Self {
            sections: section_views(view),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

#[derive(Template)]
#[template(path = "error_fragment.html")]
pub struct ErrorFragmentTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

pub fn render_template(template: &impl Template) -> Result<String, DashboardError> {
    template.render().map_err(|e| DashboardError::Render {
        reason: e.to_string(),
    })
}
