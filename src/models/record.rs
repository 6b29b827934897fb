use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceRecord: one dated quotation in EUR/kg
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "fecha")]
    date: NaiveDate,
    #[serde(rename = "precio_eur_kg")]
    price: f64,
}

impl PriceRecord {
    /// Build a record from an already-normalized price.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}
