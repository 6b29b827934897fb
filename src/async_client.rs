//! Async wrapper around [`PriceTracker`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all tracker operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking feed client and file I/O run.
//!
//! # Example
//!
//! ```no_run
//! use olive_prices::{AsyncPriceTracker, PriceTracker};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let tracker = PriceTracker::builder()
//!         .feed_url("https://example.org/precio-aceite-hoy.json")
//!         .build()
//!         .unwrap();
//!     let tracker = AsyncPriceTracker::new(tracker);
//!
//!     let today = chrono::NaiveDate::from_ymd_opt(2025, 8, 27).unwrap();
//!     let report = tracker.update(today).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::error::{PriceError, Result};
use crate::models::Store;
use crate::update::UpdateReport;
use crate::PriceTracker;

/// Async wrapper around [`PriceTracker`].
///
/// The tracker is protected by a [`Mutex`] so concurrent calls never
/// interleave reads and writes of the canonical file.
pub struct AsyncPriceTracker {
    inner: Arc<Mutex<PriceTracker>>,
}

impl AsyncPriceTracker {
    pub fn new(tracker: PriceTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Run a sync tracker operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PriceTracker) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let tracker = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = tracker
                .lock()
                .map_err(|_| PriceError::InvalidArgument("tracker lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| PriceError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Rebuild the canonical file from the raw text.
    pub async fn convert(&self) -> Result<Store> {
        self.run(|t| t.convert()).await
    }

    /// Fetch today's snapshot and merge it for `as_of`.
    pub async fn update(&self, as_of: NaiveDate) -> Result<UpdateReport> {
        self.run(move |t| t.update(as_of)).await
    }

    pub async fn load(&self) -> Result<Store> {
        self.run(|t| t.load()).await
    }
}
