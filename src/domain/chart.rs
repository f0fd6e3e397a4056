//! Candlestick chart model built from a price series.

use chrono::{DateTime, Utc};

use super::price_series::PriceSeries;

/// Open/high/low/close vectors sharing one time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CandlestickTrace {
    pub x: Vec<DateTime<Utc>>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl CandlestickTrace {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (lowest low, highest high), or `None` for an empty trace.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let min = self.low.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.high.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandlestickChart {
    pub traces: Vec<CandlestickTrace>,
}

/// Builds a single-trace candlestick chart from `series`.
pub fn build_candlestick(series: &PriceSeries) -> CandlestickChart {
    CandlestickChart {
        traces: vec![CandlestickTrace {
            x: series.index(),
            open: series.open(),
            high: series.high(),
            low: series.low(),
            close: series.close(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn two_row_series() -> (Vec<DateTime<Utc>>, PriceSeries) {
        let index = vec![
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
        ];
        let series = PriceSeries::from_columns(
            index.clone(),
            vec![1.0, 2.0],
            vec![2.0, 3.0],
            vec![0.0, 1.0],
            vec![1.5, 2.5],
            None,
        )
        .unwrap();
        (index, series)
    }

    #[test]
    fn one_trace_aligned_on_index() {
        let (index, series) = two_row_series();
        let chart = build_candlestick(&series);

        assert_eq!(chart.traces.len(), 1);
        let trace = &chart.traces[0];
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.x, index);
        assert_eq!(trace.open, vec![1.0, 2.0]);
        assert_eq!(trace.high, vec![2.0, 3.0]);
        assert_eq!(trace.low, vec![0.0, 1.0]);
        assert_eq!(trace.close, vec![1.5, 2.5]);
    }

    #[test]
    fn price_range_spans_lows_and_highs() {
        let (_, series) = two_row_series();
        let chart = build_candlestick(&series);
        assert_eq!(chart.traces[0].price_range(), Some((0.0, 3.0)));
    }

    #[test]
    fn empty_series_gives_empty_trace() {
        let chart = build_candlestick(&PriceSeries::default());
        assert_eq!(chart.traces.len(), 1);
        assert!(chart.traces[0].is_empty());
        assert_eq!(chart.traces[0].price_range(), None);
    }
}
