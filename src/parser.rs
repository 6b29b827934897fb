//! Series parser: walks raw quotation lines and collects per-grade records.
//!
//! Malformed input never fails the parse. Lines before the first date, lines
//! under an invalid date, noise, unknown products and unparseable prices are
//! all dropped and only counted in the [`ParseReport`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;

use crate::classify::{price_token, LineClassifier, LineKind};
use crate::config::ParserConfig;
use crate::merge;
use crate::models::{Grade, PriceRecord, Store};
use crate::normalize::parse_price;

// ---------------------------------------------------------------------------
// ParseCursor
// ---------------------------------------------------------------------------

/// Current date context while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseCursor {
    current: Option<NaiveDate>,
}

impl ParseCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NaiveDate> {
        self.current
    }

    /// Move to the date of a header line; an invalid header clears the context.
    pub fn advance(&mut self, date: Option<NaiveDate>) {
        self.current = date;
    }
}

// ---------------------------------------------------------------------------
// RawSeries: unsorted, possibly duplicated records per grade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    records: BTreeMap<Grade, Vec<PriceRecord>>,
}

impl RawSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, grade: Grade, record: PriceRecord) {
        self.records.entry(grade).or_default().push(record);
    }

    /// Records for `grade` in the order they were seen.
    pub fn records(&self, grade: Grade) -> &[PriceRecord] {
        self.records.get(&grade).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort and deduplicate into a canonical store.
    pub fn into_store(self) -> Store {
        merge::merge(self)
    }

    pub(crate) fn into_parts(self) -> BTreeMap<Grade, Vec<PriceRecord>> {
        self.records
    }
}

// ---------------------------------------------------------------------------
// ParseReport
// ---------------------------------------------------------------------------

/// Line accounting for one parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub lines: usize,
    pub date_headers: usize,
    pub invalid_dates: usize,
    pub records: usize,
    pub noise: usize,
    pub undated: usize,
    pub unrecognized: usize,
    pub missing_price: usize,
}

impl ParseReport {
    /// Lines that looked like content but produced nothing.
    pub fn dropped(&self) -> usize {
        self.undated + self.unrecognized + self.missing_price
    }
}

// ---------------------------------------------------------------------------
// SeriesParser
// ---------------------------------------------------------------------------

pub struct SeriesParser {
    classifier: LineClassifier,
    upper_bound: f64,
}

impl SeriesParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            classifier: LineClassifier::new(config),
            upper_bound: config.upper_bound,
        }
    }

    /// Scan `lines` in order and collect records per grade.
    pub fn parse_lines<I, S>(&self, lines: I) -> (RawSeries, ParseReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cursor = ParseCursor::new();
        let mut raw = RawSeries::new();
        let mut report = ParseReport::default();

        for line in lines {
            report.lines += 1;
            if let Some((grade, record)) = self.step(&mut cursor, line.as_ref(), &mut report) {
                raw.push(grade, record);
                report.records += 1;
            }
        }

        (raw, report)
    }

    /// Parse a whole text blob.
    pub fn parse_str(&self, text: &str) -> (RawSeries, ParseReport) {
        self.parse_lines(text.lines())
    }

    /// Process one line against the cursor.
    fn step(
        &self,
        cursor: &mut ParseCursor,
        line: &str,
        report: &mut ParseReport,
    ) -> Option<(Grade, PriceRecord)> {
        let line = line.trim();
        let kind = self.classifier.classify(line);

        if let LineKind::DateHeader(date) = kind {
            report.date_headers += 1;
            if date.is_none() {
                debug!("invalid date header {:?}, clearing current date", line);
                report.invalid_dates += 1;
            }
            cursor.advance(date);
            return None;
        }

        if kind == LineKind::Blank {
            return None;
        }
        let Some(date) = cursor.current() else {
            report.undated += 1;
            return None;
        };

        let grade = match kind {
            LineKind::Noise => {
                report.noise += 1;
                return None;
            }
            LineKind::Product(grade) => grade,
            _ => {
                debug!("{}: unrecognized line {:?}", date, line);
                report.unrecognized += 1;
                return None;
            }
        };

        match price_token(line).and_then(|t| parse_price(t, self.upper_bound)) {
            Some(price) => Some((grade, PriceRecord::new(date, price))),
            None => {
                debug!("{}: no usable price for {} in {:?}", date, grade.key(), line);
                report.missing_price += 1;
                None
            }
        }
    }
}

impl Default for SeriesParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

/// Parse and merge in one go.
pub fn parse_to_store<I, S>(lines: I, config: &ParserConfig) -> (Store, ParseReport)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (raw, report) = SeriesParser::new(config).parse_lines(lines);
    (raw.into_store(), report)
}
