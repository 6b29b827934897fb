//! Line classification for the raw quotation text.
//!
//! Categories overlap lexically, so [`LineClassifier::classify`] applies a
//! fixed precedence: date header, blank, noise, then product grade.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::{ParserConfig, CURRENCY_MARKER};
use crate::models::Grade;

static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})-([0-9]{2})-([0-9]{4})\s*$").expect("valid date regex"));

static VIRGEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvirgen\b").expect("valid grade regex"));

// ASCII digits with loose separators, then optional spaces, then the marker.
// Grouped tokens are captured whole so the normalizer can reject them.
static PRICE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[0-9][0-9.,]*\s*{}", regex::escape(CURRENCY_MARKER)))
        .expect("valid price regex")
});

// ---------------------------------------------------------------------------
// LineKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `DD-MM-YYYY`. `None` when the digits do not form a calendar date.
    DateHeader(Option<NaiveDate>),
    Blank,
    Noise,
    Product(Grade),
    Unrecognized,
}

// ---------------------------------------------------------------------------
// LineClassifier
// ---------------------------------------------------------------------------

pub struct LineClassifier {
    noise_phrases: Vec<String>,
    header_terms: Vec<String>,
}

impl LineClassifier {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            noise_phrases: config.noise_phrases.iter().map(|p| p.to_lowercase()).collect(),
            header_terms: config.header_terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Classify one line. The line is trimmed first.
    pub fn classify(&self, line: &str) -> LineKind {
        let line = line.trim();
        if let Some(date) = parse_date_header(line) {
            return LineKind::DateHeader(date);
        }
        if line.is_empty() {
            return LineKind::Blank;
        }
        if self.is_noise(line) {
            return LineKind::Noise;
        }
        match grade_of(line) {
            Some(grade) => LineKind::Product(grade),
            None => LineKind::Unrecognized,
        }
    }

    pub fn is_noise(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        if self.noise_phrases.iter().any(|p| lower.contains(p.as_str())) {
            return true;
        }
        !self.header_terms.is_empty() && self.header_terms.iter().all(|t| lower.contains(t.as_str()))
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

/// Recognize a `DD-MM-YYYY` header.
///
/// Returns `None` for anything else, `Some(None)` for a header whose numbers
/// are not a real date (e.g. `31-02-2024`), `Some(Some(date))` otherwise.
pub fn parse_date_header(line: &str) -> Option<Option<NaiveDate>> {
    let caps = DATE_HEADER.captures(line.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    Some(NaiveDate::from_ymd_opt(year, month, day))
}

/// Grade named by a product line.
///
/// "virgen extra" is tested first; plain "virgen" must be a standalone word
/// on a line without "extra".
pub fn grade_of(line: &str) -> Option<Grade> {
    let lower = line.to_lowercase();
    if lower.contains("virgen extra") {
        Some(Grade::VirgenExtra)
    } else if VIRGEN_WORD.is_match(&lower) && !lower.contains("extra") {
        Some(Grade::Virgen)
    } else if lower.contains("lampante") {
        Some(Grade::Lampante)
    } else {
        None
    }
}

/// Rightmost number followed by the currency marker, marker included.
pub fn price_token(line: &str) -> Option<&str> {
    PRICE_TOKEN.find_iter(line).last().map(|m| m.as_str())
}
