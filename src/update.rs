//! Daily updater: merges one day's feed snapshot into a canonical store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::models::{DailySnapshot, Grade, PriceRecord, Store};
use crate::normalize::normalize_json;

/// What happened to one grade during an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// A record with this price was appended.
    Added(f64),
    /// The series already had a record for the as-of date.
    AlreadyPresent,
    /// The snapshot carried no price for the grade.
    Missing,
    /// The snapshot price did not normalize within the bound.
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub as_of: NaiveDate,
    pub outcomes: BTreeMap<Grade, UpdateOutcome>,
}

impl UpdateReport {
    /// True when at least one grade gained a record.
    pub fn changed(&self) -> bool {
        self.outcomes
            .values()
            .any(|o| matches!(o, UpdateOutcome::Added(_)))
    }

    pub fn added(&self) -> Vec<Grade> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, UpdateOutcome::Added(_)))
            .map(|(g, _)| *g)
            .collect()
    }
}

/// Append `as_of` records from `snapshot` to every grade that lacks one.
///
/// Running this twice with the same inputs leaves the store as after the
/// first run.
pub fn apply_snapshot(
    store: &mut Store,
    snapshot: &DailySnapshot,
    as_of: NaiveDate,
    upper_bound: f64,
) -> UpdateReport {
    let mut outcomes = BTreeMap::new();

    for grade in Grade::ALL {
        let outcome = update_grade(store, snapshot, grade, as_of, upper_bound);
        debug!("{} {}: {:?}", as_of, grade.key(), outcome);
        outcomes.insert(grade, outcome);
    }

    UpdateReport { as_of, outcomes }
}

fn update_grade(
    store: &mut Store,
    snapshot: &DailySnapshot,
    grade: Grade,
    as_of: NaiveDate,
    upper_bound: f64,
) -> UpdateOutcome {
    let series = store.get_mut(grade);
    if series.contains_date(as_of) {
        return UpdateOutcome::AlreadyPresent;
    }

    let Some(raw) = snapshot.raw_price(grade) else {
        return UpdateOutcome::Missing;
    };

    match normalize_json(raw, upper_bound) {
        Some(price) => {
            series.push_sorted(PriceRecord::new(as_of, price));
            UpdateOutcome::Added(price)
        }
        None => {
            warn!("{}: rejecting feed price {} for {}", as_of, raw, grade);
            UpdateOutcome::Rejected
        }
    }
}
