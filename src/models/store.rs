use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Grade, PriceRecord};

// ---------------------------------------------------------------------------
// Series: ordered price history of one grade
// ---------------------------------------------------------------------------

/// Price history for one grade: strictly ascending dates, one record per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<PriceRecord>);

impl Series {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap records that are already in canonical order.
    pub(crate) fn from_canonical(records: Vec<PriceRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&PriceRecord> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PriceRecord> {
        self.0.last()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&PriceRecord> {
        self.0.iter().find(|r| r.date() == date)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.get(date).is_some()
    }

    /// Append a record and restore ascending date order.
    ///
    /// Callers must check [`contains_date`](Self::contains_date) first; this
    /// does not deduplicate.
    pub(crate) fn push_sorted(&mut self, record: PriceRecord) {
        self.0.push(record);
        self.0.sort_by_key(|r| r.date());
    }

    /// True when every adjacent pair has `date[i] < date[i + 1]`.
    pub fn is_strictly_ascending(&self) -> bool {
        self.0.windows(2).all(|w| w[0].date() < w[1].date())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Store: one series per grade, the unit of persistence
// ---------------------------------------------------------------------------

/// Mapping from every [`Grade`] to its [`Series`].
///
/// Always holds all three grades. Serializes as a JSON object keyed by grade
/// label in canonical order; grades missing from the input deserialize as
/// empty series, unknown labels are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Grade, Series>", into = "BTreeMap<Grade, Series>")]
pub struct Store {
    series: BTreeMap<Grade, Series>,
}

impl Store {
    /// A store with three empty series.
    pub fn new() -> Self {
        Self {
            series: Grade::ALL.into_iter().map(|g| (g, Series::new())).collect(),
        }
    }

    pub fn get(&self, grade: Grade) -> &Series {
        &self.series[&grade]
    }

    pub(crate) fn get_mut(&mut self, grade: Grade) -> &mut Series {
        self.series.entry(grade).or_default()
    }

    /// Replace a grade's whole series.
    pub fn replace(&mut self, grade: Grade, series: Series) {
        self.series.insert(grade, series);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Grade, &Series)> {
        self.series.iter().map(|(g, s)| (*g, s))
    }

    /// Number of records across all grades.
    pub fn total_points(&self) -> usize {
        self.series.values().map(Series::len).sum()
    }

    /// Grades whose series break the ordering invariant.
    pub fn unordered_grades(&self) -> Vec<Grade> {
        self.iter()
            .filter(|(_, s)| !s.is_strictly_ascending())
            .map(|(g, _)| g)
            .collect()
    }

    /// Grades holding a price outside `(0, upper_bound)`.
    pub fn out_of_range_grades(&self, upper_bound: f64) -> Vec<Grade> {
        self.iter()
            .filter(|(_, s)| {
                s.iter()
                    .any(|r| !(r.price().is_finite() && r.price() > 0.0 && r.price() < upper_bound))
            })
            .map(|(g, _)| g)
            .collect()
    }

    /// Describe the first broken series invariant, if any.
    ///
    /// Dates must be strictly ascending and every price must lie inside
    /// `(0, upper_bound)`.
    pub fn invariant_violation(&self, upper_bound: f64) -> Option<String> {
        let labels = |grades: Vec<Grade>| {
            grades.iter().map(|g| g.label()).collect::<Vec<_>>().join(", ")
        };
        let unordered = self.unordered_grades();
        if !unordered.is_empty() {
            return Some(format!("unordered or duplicated dates in: {}", labels(unordered)));
        }
        let out_of_range = self.out_of_range_grades(upper_bound);
        if !out_of_range.is_empty() {
            return Some(format!(
                "prices outside (0, {}) in: {}",
                upper_bound,
                labels(out_of_range)
            ));
        }
        None
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Grade, Series>> for Store {
    fn from(mut series: BTreeMap<Grade, Series>) -> Self {
        for grade in Grade::ALL {
            series.entry(grade).or_default();
        }
        Self { series }
    }
}

impl From<Store> for BTreeMap<Grade, Series> {
    fn from(store: Store) -> Self {
        store.series
    }
}
