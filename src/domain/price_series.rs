//! Time-indexed OHLCV table.

use chrono::{DateTime, Utc};

use super::error::DashboardError;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceBar {
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

/// Price rows in index order. Open, High, Low and Close are always present
/// for every row; Volume may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn from_bars(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }

    /// Builds a series from column vectors. Every column must have one
    /// entry per index row.
    pub fn from_columns(
        index: Vec<DateTime<Utc>>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Option<Vec<u64>>,
    ) -> Result<Self, DashboardError> {
        let rows = index.len();
        for (name, len) in [
            ("Open", open.len()),
            ("High", high.len()),
            ("Low", low.len()),
            ("Close", close.len()),
        ] {
            if len != rows {
                return Err(DashboardError::MalformedSeries {
                    reason: format!("column {name} has {len} rows, index has {rows}"),
                });
            }
        }
        if let Some(v) = &volume {
            if v.len() != rows {
                return Err(DashboardError::MalformedSeries {
                    reason: format!("column Volume has {} rows, index has {rows}", v.len()),
                });
            }
        }

        let bars = (0..rows)
            .map(|i| PriceBar {
                time: index[i],
                open: open[i],
                high: high[i],
                low: low[i],
                close: close[i],
                volume: volume.as_ref().map(|v| v[i]),
            })
            .collect();
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn index(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.time).collect()
    }

    pub fn open(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn high(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn low(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn close(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
