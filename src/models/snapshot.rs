use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PriceError, Result};
use crate::models::Grade;

// ---------------------------------------------------------------------------
// DailySnapshot: one day's prices as published by the external feed
// ---------------------------------------------------------------------------

/// `{ "fecha": "...", "precios": { "<label>": { "precio_eur_kg": n }, ... } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Date as published by the feed. Informational only; updates are
    /// anchored to the caller's as-of date.
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "precios")]
    pub prices: HashMap<String, SnapshotPrice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotPrice {
    /// Kept raw: feeds have been seen publishing numbers as well as
    /// localized strings.
    #[serde(rename = "precio_eur_kg", default)]
    pub price: Option<Value>,
}

impl DailySnapshot {
    pub fn new<S: Into<String>>(date: S) -> Self {
        Self {
            date: date.into(),
            prices: HashMap::new(),
        }
    }

    /// Add or replace the raw price for a grade.
    pub fn with_price<V: Into<Value>>(mut self, grade: Grade, price: V) -> Self {
        self.prices.insert(
            grade.label().to_string(),
            SnapshotPrice {
                price: Some(price.into()),
            },
        );
        self
    }

    /// Parse a snapshot document. Any structural problem is a feed error.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| PriceError::Feed(format!("malformed daily snapshot: {}", e)))
    }

    /// Raw price published for `grade`, if any.
    pub fn raw_price(&self, grade: Grade) -> Option<&Value> {
        self.prices
            .get(grade.label())
            .and_then(|p| p.price.as_ref())
            .filter(|v| !v.is_null())
    }
}
