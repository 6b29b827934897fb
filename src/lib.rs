//! Olive-oil price history for Rust.
//!
//! Turns a hand-maintained text log of daily olive-oil quotations into a
//! normalized JSON time series per grade, and merges single-day snapshots
//! from an external feed into that series.
//!
//! # Quick start
//!
//! ```no_run
//! use olive_prices::PriceTracker;
//! use chrono::NaiveDate;
//!
//! let mut tracker = PriceTracker::builder()
//!     .raw_path("historico.txt")
//!     .series_path("precio-aceite-historico.json")
//!     .feed_url("https://example.org/precio-aceite-hoy.json")
//!     .build()
//!     .unwrap();
//!
//! // Rebuild the canonical series from the raw text
//! let store = tracker.convert().unwrap();
//!
//! // Add today's quotation, if not already present
//! let today = NaiveDate::from_ymd_opt(2025, 8, 27).unwrap();
//! let report = tracker.update(today).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod feed;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod storage;
pub mod update;

#[cfg(feature = "async")]
pub use async_client::AsyncPriceTracker;
pub use config::ParserConfig;
pub use error::{PriceError, Result};
pub use feed::FeedClient;
pub use models::{DailySnapshot, Grade, PriceRecord, Series, Store};
pub use parser::{ParseReport, SeriesParser};
pub use storage::InputKind;
pub use update::{UpdateOutcome, UpdateReport};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use log::info;

// ---------------------------------------------------------------------------
// PriceTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceTracker`].
///
/// Use [`PriceTracker::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PriceTrackerBuilder::build).
pub struct PriceTrackerBuilder {
    raw_path: PathBuf,
    series_path: PathBuf,
    feed_url: Option<String>,
    timeout: Duration,
    parser_config: ParserConfig,
}

impl Default for PriceTrackerBuilder {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from(config::DEFAULT_RAW_FILE),
            series_path: PathBuf::from(config::DEFAULT_SERIES_FILE),
            feed_url: None,
            timeout: config::FEED_TIMEOUT,
            parser_config: ParserConfig::historical(),
        }
    }
}

impl PriceTrackerBuilder {
    /// Path of the raw quotation text. Defaults to `historico.txt`.
    pub fn raw_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.raw_path = path.as_ref().to_path_buf();
        self
    }

    /// Path of the canonical series file.
    ///
    /// Defaults to `precio-aceite-historico.json`.
    pub fn series_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.series_path = path.as_ref().to_path_buf();
        self
    }

    /// URL of the daily snapshot feed. Required for [`PriceTracker::update`].
    pub fn feed_url<S: Into<String>>(mut self, url: S) -> Self {
        self.feed_url = Some(url.into());
        self
    }

    /// HTTP timeout for the feed. Defaults to 20 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parser settings for historical conversion.
    pub fn parser_config(mut self, config: ParserConfig) -> Self {
        self.parser_config = config;
        self
    }

    pub fn build(self) -> Result<PriceTracker> {
        if self.timeout.is_zero() {
            return Err(PriceError::InvalidArgument(
                "feed timeout must be greater than zero".into(),
            ));
        }
        let bound = self.parser_config.upper_bound;
        if bound.is_nan() || bound <= 0.0 {
            return Err(PriceError::InvalidArgument(format!(
                "upper bound must be positive, got {}",
                bound
            )));
        }
        let feed = match self.feed_url {
            Some(url) if url.trim().is_empty() => {
                return Err(PriceError::InvalidArgument("feed URL is empty".into()));
            }
            Some(url) => Some(FeedClient::new(url, self.timeout)),
            None => None,
        };
        Ok(PriceTracker {
            raw_path: self.raw_path,
            series_path: self.series_path,
            parser_config: self.parser_config,
            feed,
        })
    }
}

// ---------------------------------------------------------------------------
// PriceTracker
// ---------------------------------------------------------------------------

/// Entry point tying together conversion, loading and daily updates of the
/// canonical series file.
///
/// Created via [`PriceTracker::builder()`].
pub struct PriceTracker {
    raw_path: PathBuf,
    series_path: PathBuf,
    parser_config: ParserConfig,
    feed: Option<FeedClient>,
}

impl PriceTracker {
    pub fn builder() -> PriceTrackerBuilder {
        PriceTrackerBuilder::default()
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    pub fn series_path(&self) -> &Path {
        &self.series_path
    }

    // -- Historical conversion ---------------------------------------------

    /// Parse and merge lines into a fresh store, without touching disk.
    pub fn convert_lines<I, S>(&self, lines: I) -> (Store, ParseReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        parser::parse_to_store(lines, &self.parser_config)
    }

    /// Rebuild the canonical file from the raw text.
    ///
    /// Fails with [`PriceError::MissingInput`] before writing anything when
    /// the raw file does not exist.
    pub fn convert(&self) -> Result<Store> {
        let lines = storage::read_raw_lines(&self.raw_path)?;
        let (store, report) = self.convert_lines(&lines);
        info!(
            "Parsed {} lines from {}: {} records, {} dropped",
            report.lines,
            self.raw_path.display(),
            report.records,
            report.dropped()
        );
        storage::save_store(&self.series_path, &store)?;
        for (grade, series) in store.iter() {
            info!("  - {}: {} points", grade, series.len());
        }
        Ok(store)
    }

    /// Load the canonical file, regenerating it first if it holds raw text.
    ///
    /// Returns the store and whether it had to be regenerated. Nothing is
    /// renamed; the raw content is parsed in place and replaced by its
    /// canonical form.
    pub fn ensure_canonical(&self) -> Result<(Store, bool)> {
        match storage::detect_input(&self.series_path)? {
            InputKind::Canonical(store) => Ok((store, false)),
            InputKind::RawText(lines) => {
                info!(
                    "{} holds raw text, regenerating canonical series",
                    self.series_path.display()
                );
                let (store, _) = self.convert_lines(&lines);
                storage::save_store(&self.series_path, &store)?;
                Ok((store, true))
            }
        }
    }

    /// Load the canonical file as-is.
    pub fn load(&self) -> Result<Store> {
        storage::load_store(&self.series_path)
    }

    // -- Daily update ------------------------------------------------------

    /// Fetch today's snapshot and merge it for `as_of`.
    ///
    /// A fetch failure aborts before the store is read or written. The file
    /// is rewritten only when at least one grade gained a record.
    pub fn update(&mut self, as_of: NaiveDate) -> Result<UpdateReport> {
        let feed = self.feed.as_mut().ok_or_else(|| {
            PriceError::InvalidArgument("no feed URL configured for daily update".into())
        })?;
        let snapshot = feed.fetch()?;
        self.update_with_snapshot(&snapshot, as_of)
    }

    /// Merge an already retrieved snapshot for `as_of`.
    pub fn update_with_snapshot(
        &self,
        snapshot: &DailySnapshot,
        as_of: NaiveDate,
    ) -> Result<UpdateReport> {
        let mut store = self.load()?;
        let report = update::apply_snapshot(&mut store, snapshot, as_of, config::FEED_UPPER_BOUND);
        if report.changed() {
            storage::save_store(&self.series_path, &store)?;
            info!("Updated {} for {}", self.series_path.display(), as_of);
        } else {
            info!("No changes for {}", as_of);
        }
        Ok(report)
    }

    // -- Reporting -----------------------------------------------------------

    /// Point count per grade in the canonical file.
    pub fn summary(&self) -> Result<Vec<(Grade, usize)>> {
        let store = self.load()?;
        Ok(store.iter().map(|(g, s)| (g, s.len())).collect())
    }

    /// Close the feed's HTTP client, if open.
    pub fn close(&mut self) {
        if let Some(feed) = self.feed.as_mut() {
            feed.close();
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PriceTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PriceTracker(raw={}, series={}, feed={})",
            self.raw_path.display(),
            self.series_path.display(),
            self.feed.as_ref().map(FeedClient::url).unwrap_or("none")
        )
    }
}
