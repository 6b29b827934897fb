//! Chart-oriented views of a series: yearly and monthly averages, a
//! trailing-year daily window, and an overall price trend.
//!
//! Only points with `0 < price < FEED_UPPER_BOUND` take part, matching what
//! the published chart plots.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::FEED_UPPER_BOUND;
use crate::models::{PriceRecord, Series};
use crate::normalize::round3;

// ---------------------------------------------------------------------------
// Bucket: one averaged period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// `YYYY` for yearly buckets, `YYYY-MM` for monthly ones.
    pub label: String,
    pub average: f64,
    pub points: usize,
}

// ---------------------------------------------------------------------------
// PriceTrend: aggregated statistics over a whole series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceTrend {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub data_points: usize,
}

fn plotted(series: &Series) -> impl Iterator<Item = &PriceRecord> {
    series
        .iter()
        .filter(|r| r.price() > 0.0 && r.price() < FEED_UPPER_BOUND)
}

fn average(values: &[f64]) -> f64 {
    round3(values.iter().sum::<f64>() / values.len() as f64)
}

fn to_buckets(groups: BTreeMap<String, Vec<f64>>) -> Vec<Bucket> {
    groups
        .into_iter()
        .map(|(label, values)| Bucket {
            average: average(&values),
            points: values.len(),
            label,
        })
        .collect()
}

/// Records of `year`, or of the twelve months up to the latest record.
fn window(series: &Series, year: Option<i32>) -> Vec<PriceRecord> {
    let points: Vec<PriceRecord> = plotted(series).copied().collect();
    match year {
        Some(y) => points.into_iter().filter(|r| r.date().year() == y).collect(),
        None => {
            let Some(latest) = points.last().map(|r| r.date()) else {
                return Vec::new();
            };
            let from = latest.checked_sub_months(Months::new(12)).unwrap_or(NaiveDate::MIN);
            points.into_iter().filter(|r| r.date() >= from).collect()
        }
    }
}

/// Average price per calendar year.
pub fn yearly_averages(series: &Series) -> Vec<Bucket> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in plotted(series) {
        groups.entry(r.date().year().to_string()).or_default().push(r.price());
    }
    to_buckets(groups)
}

/// Average price per month of `year`, or of the trailing year when `None`.
pub fn monthly_averages(series: &Series, year: Option<i32>) -> Vec<Bucket> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in window(series, year) {
        let key = format!("{}-{:02}", r.date().year(), r.date().month());
        groups.entry(key).or_default().push(r.price());
    }
    to_buckets(groups)
}

/// Daily points of `year`, or of the trailing year when `None`.
pub fn daily(series: &Series, year: Option<i32>) -> Vec<PriceRecord> {
    window(series, year)
}

/// Distinct years present in the plotted points, ascending.
pub fn years(series: &Series) -> Vec<i32> {
    let mut years: Vec<i32> = plotted(series).map(|r| r.date().year()).collect();
    years.dedup();
    years
}

pub fn trend(series: &Series) -> Option<PriceTrend> {
    let points: Vec<&PriceRecord> = plotted(series).collect();
    let first = points.first()?;
    let last = points.last()?;
    let prices: Vec<f64> = points.iter().map(|r| r.price()).collect();

    Some(PriceTrend {
        min_price: prices.iter().copied().fold(f64::INFINITY, f64::min),
        max_price: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg_price: average(&prices),
        first_date: first.date(),
        last_date: last.date(),
        data_points: prices.len(),
    })
}
