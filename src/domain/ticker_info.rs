//! Provider metadata for a ticker.
//!
//! The key set is whatever the provider returns, so the map is kept open
//! and every lookup is optional.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerInfo {
    fields: Map<String, Value>,
}

/// A metadata field as shown in the info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoField {
    pub name: String,
    pub value: String,
}

impl TickerInfo {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `longName`, then `shortName`, then the ticker itself.
    pub fn display_name<'a>(&'a self, ticker: &'a str) -> &'a str {
        ["longName", "shortName"]
            .iter()
            .filter_map(|key| self.get_str(key))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or(ticker)
    }

    /// Fields worth showing, in provider order. Null, false, empty strings
    /// and empty collections are hidden; numeric zero is shown.
    pub fn visible_fields(&self) -> Vec<InfoField> {
        self.fields
            .iter()
            .filter(|(_, value)| is_present(value))
            .map(|(name, value)| InfoField {
                name: name.clone(),
                value: format_value(value),
            })
            .collect()
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) => true,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
