//! Shared fixtures for the olive-prices integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use olive_prices::{merge, Grade, PriceRecord, Store};

/// Two days of quotations, including a noise line and a market-closed notice.
pub const SAMPLE_TEXT: &str = "\
26-08-2025
Aceite de oliva virgen extra ... 3,833 €
Aceite de oliva virgen ... 3,250 €
Aceite de oliva lampante ... 3,100 €
Sin cierre de operaciones
27-08-2025
Aceite de oliva virgen extra ... 3,900 €
";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn record(d: &str, price: f64) -> PriceRecord {
    PriceRecord::new(date(d), price)
}

/// Build a store from `(grade, [(date, price)])` pairs.
pub fn store_with(entries: &[(Grade, &[(&str, f64)])]) -> Store {
    let mut store = Store::new();
    for (grade, points) in entries {
        let records = points.iter().map(|(d, p)| record(d, *p)).collect();
        store.replace(*grade, merge::merge_series(records));
    }
    store
}

/// Write `contents` to `name` inside a fresh temp dir.
///
/// Returns `(path, TempDir)`; keep the `TempDir` alive for the test.
pub fn write_temp(name: &str, contents: &str) -> (PathBuf, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (path, tmp_dir)
}

pub fn assert_canonical(store: &Store) {
    for (grade, series) in store.iter() {
        assert!(series.is_strictly_ascending(), "{} is not strictly ascending", grade);
    }
}
