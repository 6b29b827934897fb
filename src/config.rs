use std::time::Duration;

use chrono_tz::Tz;

/// Display labels of the three tracked grades, in canonical order.
pub const GRADE_LABELS: [&str; 3] = [
    "Aceite de oliva virgen extra",
    "Aceite de oliva virgen",
    "Aceite de oliva lampante",
];

/// Upper plausibility bound for prices scraped from the free-text history.
pub const HISTORICAL_UPPER_BOUND: f64 = 50.0;

/// Upper plausibility bound for prices taken from the curated daily feed.
pub const FEED_UPPER_BOUND: f64 = 20.0;

pub const FEED_TIMEOUT: Duration = Duration::from_secs(20);

pub const CURRENCY_MARKER: &str = "€";

pub const DEFAULT_RAW_FILE: &str = "historico.txt";
pub const DEFAULT_SERIES_FILE: &str = "precio-aceite-historico.json";

/// Any line containing one of these (case-insensitive) is boilerplate.
pub const NOISE_PHRASES: [&str; 2] = ["sin cierre de operaciones", "about:blank"];

/// A line containing all of these (case-insensitive) is the table header.
pub const HEADER_TERMS: [&str; 2] = ["tipo de aceite", "precio"];

/// Time zone in which "today" is evaluated for daily updates.
pub fn reference_timezone() -> Tz {
    chrono_tz::Europe::Madrid
}

// ---------------------------------------------------------------------------
// ParserConfig
// ---------------------------------------------------------------------------

/// Tunables shared by the line classifier and the numeric normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Exclusive upper bound a normalized price must stay under.
    pub upper_bound: f64,
    /// Lowercase phrases that mark a whole line as noise.
    pub noise_phrases: Vec<String>,
    /// Lowercase terms that, when all present, mark a table header line.
    pub header_terms: Vec<String>,
}

impl ParserConfig {
    /// Configuration for bulk ingestion of the historical text file.
    pub fn historical() -> Self {
        Self {
            upper_bound: HISTORICAL_UPPER_BOUND,
            noise_phrases: NOISE_PHRASES.iter().map(|s| s.to_string()).collect(),
            header_terms: HEADER_TERMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Configuration for values arriving through the daily feed.
    pub fn feed() -> Self {
        Self {
            upper_bound: FEED_UPPER_BOUND,
            ..Self::historical()
        }
    }

    pub fn upper_bound(mut self, bound: f64) -> Self {
        self.upper_bound = bound;
        self
    }

    pub fn noise_phrase<S: Into<String>>(mut self, phrase: S) -> Self {
        self.noise_phrases.push(phrase.into().to_lowercase());
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::historical()
    }
}
