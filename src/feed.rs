//! Retrieval of the external daily price snapshot.

use std::time::Duration;

use log::info;
use reqwest::blocking::Client;

use crate::error::{PriceError, Result};
use crate::models::DailySnapshot;

/// Blocking HTTP client for the daily feed.
pub struct FeedClient {
    url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl FeedClient {
    pub fn new<S: Into<String>>(url: S, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            client: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| PriceError::Feed("HTTP client unavailable".into()))
    }

    /// Fetch and parse today's snapshot.
    ///
    /// Network errors, timeouts and non-success statuses surface as
    /// [`PriceError::Http`]; an unparseable body as [`PriceError::Feed`].
    pub fn fetch(&mut self) -> Result<DailySnapshot> {
        info!("Fetching daily snapshot from {}", self.url);
        let url = self.url.clone();
        let resp = self.client()?.get(&url).send()?.error_for_status()?;
        let body = resp.text()?;
        let snapshot = DailySnapshot::from_json(&body)?;
        if snapshot.prices.is_empty() {
            return Err(PriceError::Feed(format!("snapshot from {} has no prices", url)));
        }
        Ok(snapshot)
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
