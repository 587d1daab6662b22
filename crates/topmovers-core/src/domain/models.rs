use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One ranked row of a movers category, exactly as the provider sent it.
///
/// Numeric-looking fields stay strings; formatting is a display concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub ticker: String,
    pub price: String,
    pub change_amount: String,
    pub change_percentage: String,
    pub volume: String,
}

/// Point-in-time gainers, losers and most-active lists.
///
/// List order is the provider's ranking and is never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoversSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    pub last_updated: String,
    pub top_gainers: Vec<StockEntry>,
    pub top_losers: Vec<StockEntry>,
    pub most_actively_traded: Vec<StockEntry>,
    /// Decoded provider body, unknown fields included. Set by the upstream
    /// parser only; never serialized with the typed view.
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl MoversSnapshot {
    /// Entry counts as `(gainers, losers, most_active)`.
    pub fn lens(&self) -> (usize, usize, usize) {
        (
            self.top_gainers.len(),
            self.top_losers.len(),
            self.most_actively_traded.len(),
        )
    }

    /// The provider body as received, or the typed view when none was kept.
    pub fn full_data(&self) -> Value {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => serde_json::to_value(self).unwrap_or(Value::Null),
        }
    }
}
