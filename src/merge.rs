//! Series merger: ordering and same-day deduplication.

use crate::models::{PriceRecord, Series, Store};
use crate::parser::RawSeries;

/// Turn raw per-grade records into a canonical store.
pub fn merge(raw: RawSeries) -> Store {
    let mut store = Store::new();
    for (grade, records) in raw.into_parts() {
        store.replace(grade, merge_series(records));
    }
    store
}

/// Stable-sort by date and keep the last-seen record for each date.
pub fn merge_series(mut records: Vec<PriceRecord>) -> Series {
    records.sort_by_key(|r| r.date());

    let mut kept: Vec<PriceRecord> = Vec::with_capacity(records.len());
    for record in records {
        match kept.last_mut() {
            Some(last) if last.date() == record.date() => *last = record,
            _ => kept.push(record),
        }
    }
    Series::from_canonical(kept)
}
