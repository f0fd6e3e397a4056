//! Inline SVG rendering for candlestick charts.

use std::fmt::Write;

use crate::domain::chart::{CandlestickChart, CandlestickTrace};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 320.0;
const PADDING: f64 = 48.0;
const RISING: &str = "#3D9970";
const FALLING: &str = "#FF4136";

pub const NO_DATA: &str = "<p class=\"no-data\">No price data available.</p>";

/// Maps row index and price onto plot coordinates.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    rows: usize,
    min_price: f64,
    max_price: f64,
}

impl Viewport {
    fn plot_width(&self) -> f64 {
        WIDTH - 2.0 * PADDING
    }

    fn plot_height(&self) -> f64 {
        HEIGHT - 2.0 * PADDING
    }

    fn slot(&self) -> f64 {
        self.plot_width() / self.rows.max(1) as f64
    }

    fn x(&self, row: usize) -> f64 {
        PADDING + self.slot() * (row as f64 + 0.5)
    }

    fn y(&self, price: f64) -> f64 {
        let range = self.max_price - self.min_price;
        if range > 0.0 {
            HEIGHT - PADDING - (price - self.min_price) * self.plot_height() / range
        } else {
            HEIGHT / 2.0
        }
    }

    fn body_width(&self) -> f64 {
        (self.slot() * 0.6).max(1.0)
    }
}

fn viewport(chart: &CandlestickChart) -> Option<Viewport> {
    let rows = chart.traces.iter().map(CandlestickTrace::len).max()?;
    let (min_price, max_price) = chart
        .traces
        .iter()
        .filter_map(CandlestickTrace::price_range)
        .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))?;
    Some(Viewport {
        rows,
        min_price,
        max_price,
    })
}

pub fn render_candlestick_svg(chart: &CandlestickChart) -> String {
    let Some(view) = viewport(chart) else {
        return NO_DATA.to_string();
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="candlestick" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}" width="{WIDTH:.0}" height="{HEIGHT:.0}">"#
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

    let _ = write!(
        svg,
        r##"<line x1="{p:.1}" y1="{p:.1}" x2="{p:.1}" y2="{b:.1}" stroke="#999"/><line x1="{p:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#999"/>"##,
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING,
    );

    for trace in &chart.traces {
        write_candles(&mut svg, trace, &view);
    }
    write_labels(&mut svg, chart, &view);

    svg.push_str("</svg>");
    svg
}

fn write_candles(svg: &mut String, trace: &CandlestickTrace, view: &Viewport) {
    let half = view.body_width() / 2.0;
    for row in 0..trace.len() {
        let (open, high, low, close) = (
            trace.open[row],
            trace.high[row],
            trace.low[row],
            trace.close[row],
        );
        let color = if close >= open { RISING } else { FALLING };
        let x = view.x(row);
        let top = view.y(open.max(close));
        let bottom = view.y(open.min(close));

        let _ = write!(
            svg,
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{color}"/>"#,
            view.y(high),
            view.y(low),
        );
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{top:.1}" width="{:.1}" height="{:.1}" fill="{color}"><title>{} O {open:.2} H {high:.2} L {low:.2} C {close:.2}</title></rect>"#,
            x - half,
            view.body_width(),
            (bottom - top).max(1.0),
            trace.x[row].format("%Y-%m-%d"),
        );
    }
}

fn label(svg: &mut String, x: f64, y: f64, anchor: &str, text: &str) {
    let _ = write!(
        svg,
        r##"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="{anchor}" fill="#444">{text}</text>"##
    );
}

fn write_labels(svg: &mut String, chart: &CandlestickChart, view: &Viewport) {
    label(
        svg,
        PADDING - 4.0,
        view.y(view.max_price) + 4.0,
        "end",
        &format!("{:.2}", view.max_price),
    );
    label(
        svg,
        PADDING - 4.0,
        view.y(view.min_price) + 4.0,
        "end",
        &format!("{:.2}", view.min_price),
    );

    let Some(axis) = chart.traces.iter().find(|t| !t.is_empty()) else {
        return;
    };
    let baseline = HEIGHT - PADDING + 16.0;
    if let Some(first) = axis.x.first() {
        label(svg, view.x(0), baseline, "start", &first.format("%Y-%m-%d").to_string());
    }
    if axis.len() > 1 {
        if let Some(last) = axis.x.last() {
            label(
                svg,
                view.x(axis.len() - 1),
                baseline,
                "end",
                &last.format("%Y-%m-%d").to_string(),
            );
        }
    }
}
