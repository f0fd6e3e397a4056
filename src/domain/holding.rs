//! Portfolio holdings.

use serde::Deserialize;

/// One portfolio entry. Only the ticker is consumed; other keys in the
/// source mapping are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holding {
    pub ticker: String,
}

impl Holding {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
        }
    }
}

/// Ordered sequence of holdings, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    pub fn tickers(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.ticker.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
