use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use frigate_core::{FrigateConfig, ReviewEvent};

pub mod error;

pub use error::FetchError;

/// The `[after, before]` range passed to `/api/review`, as given on the
/// command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWindow {
    pub after: String,
    pub before: String,
}

impl ReviewWindow {
    pub fn new(after: impl Into<String>, before: impl Into<String>) -> Self {
        Self {
            after: after.into(),
            before: before.into(),
        }
    }
}

/// Anything that can list the review items of a window.
pub trait ReviewSource {
    fn fetch_reviews(&self, window: &ReviewWindow) -> Result<Vec<ReviewEvent>, FetchError>;
}

/// Single blocking GET against a Frigate instance. No retries.
pub struct HttpReviewSource {
    client: Client,
    api_base: String,
    timeout: Duration,
}

impl HttpReviewSource {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|err| FetchError::Client(err.to_string()))?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &FrigateConfig) -> Result<Self, FetchError> {
        Self::new(&config.api_base, Duration::from_secs(config.timeout_secs))
    }

    pub fn review_url(&self) -> String {
        format!("{}/api/review", self.api_base)
    }

    fn fetch_body(&self, window: &ReviewWindow) -> Result<Value, FetchError> {
        let url = self.review_url();
        debug!(%url, after = %window.after, before = %window.before, "querying review API");

        let response = self
            .client
            .get(&url)
            .query(&[("after", &window.after), ("before", &window.before)])
            .send()
            .map_err(|err| FetchError::classify(err, self.timeout))?
            .error_for_status()
            .map_err(|err| FetchError::classify(err, self.timeout))?;

        response
            .json::<Value>()
            .map_err(|err| FetchError::classify(err, self.timeout))
    }
}

impl ReviewSource for HttpReviewSource {
    fn fetch_reviews(&self, window: &ReviewWindow) -> Result<Vec<ReviewEvent>, FetchError> {
        let body = self.fetch_body(window)?;
        let events = ReviewEvent::list_from_response(&body);
        debug!(count = events.len(), "review API answered");
        Ok(events)
    }
}
