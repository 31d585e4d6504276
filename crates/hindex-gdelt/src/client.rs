//! HTTP client for the GDELT Doc 2.0 API.
//!
//! Queries the `ArtList` endpoint for recent worldwide headlines and
//! normalizes the response into [`HeadlineRecord`]s.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use hindex_core::HeadlineRecord;

use crate::error::GdeltError;
use crate::normalize::normalize_article;
use crate::retry::retry_with_backoff;
use crate::types::GdeltResponse;

const DEFAULT_BASE_URL: &str = "https://api.gdeltproject.org/api/v2/doc/doc";

/// Client for the GDELT Doc API.
///
/// Use [`GdeltClient::new`] for production or
/// [`GdeltClient::with_base_url`] to point at a mock server in tests.
pub struct GdeltClient {
    client: Client,
    base_url: Url,
}

impl GdeltClient {
    /// Creates a new client pointed at the production GDELT API.
    ///
    /// # Errors
    ///
    /// Returns [`GdeltError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GdeltError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GdeltError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GdeltError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GdeltError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| GdeltError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches recent headlines for a trailing day window.
    ///
    /// `fallback_date` is used for articles whose `seendate` cannot be
    /// parsed; pass the run's "today" so results stay reproducible for a
    /// fixed input. Articles missing a title, URL, or domain are skipped,
    /// not errors.
    ///
    /// # Errors
    ///
    /// Returns [`GdeltError::Http`] on request failure or a non-2xx
    /// status, [`GdeltError::Deserialize`] on a malformed body.
    pub async fn fetch_headlines(
        &self,
        days: u32,
        max_records: u32,
        fallback_date: NaiveDate,
    ) -> Result<Vec<HeadlineRecord>, GdeltError> {
        let url = self.build_url(days, max_records);
        let response: GdeltResponse = self.request_json(&url).await?;

        let records: Vec<HeadlineRecord> = response
            .articles
            .iter()
            .filter_map(|article| normalize_article(article, fallback_date))
            .collect();

        tracing::debug!(
            fetched = response.articles.len(),
            usable = records.len(),
            "fetched GDELT headline batch"
        );

        Ok(records)
    }

    /// [`Self::fetch_headlines`] wrapped in exponential back-off for
    /// transient failures (timeout, connection reset, 5xx).
    ///
    /// # Errors
    ///
    /// Returns the final [`GdeltError`] once retries are exhausted, or
    /// immediately for non-transient errors.
    pub async fn fetch_headlines_with_retry(
        &self,
        days: u32,
        max_records: u32,
        fallback_date: NaiveDate,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Vec<HeadlineRecord>, GdeltError> {
        retry_with_backoff(max_retries, backoff_base_ms, || {
            self.fetch_headlines(days, max_records, fallback_date)
        })
        .await
    }

    /// Builds the `ArtList` request URL with percent-encoded parameters.
    fn build_url(&self, days: u32, max_records: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", "*");
            pairs.append_pair("mode", "ArtList");
            pairs.append_pair("maxrecords", &max_records.to_string());
            pairs.append_pair("format", "json");
            pairs.append_pair("timespan", &format!("{days}d"));
            pairs.append_pair("sort", "datedesc");
        }
        url
    }

    async fn request_json(&self, url: &Url) -> Result<GdeltResponse, GdeltError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GdeltError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
