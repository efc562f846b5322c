//! HTTP client for Apify's synchronous actor-run endpoint.
//!
//! One call to `run-sync-get-dataset-items` starts the actor, blocks until it
//! finishes, and returns the dataset as a JSON array. The timeout therefore
//! has to cover the whole actor run, not just the HTTP round trip.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::types::{ApifyItem, RunInput};

const DEFAULT_BASE_URL: &str = "https://api.apify.com/";

/// Client for the Apify API.
///
/// Use [`ApifyClient::new`] for production or [`ApifyClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ApifyClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl ApifyClient {
    /// Creates a client pointed at the production Apify API.
    ///
    /// `timeout_secs` bounds the whole synchronous actor run; scrapes of a
    /// full profile routinely take minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, ScraperError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ttmon/0.1 (tiktok-monitoring)")
            .build()?;

        // Ensure exactly one trailing slash so joins append to the path
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.trim().to_owned(),
            base_url,
        })
    }

    /// Runs the actor synchronously and returns its dataset items.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx response.
    /// - [`ScraperError::Http`]: network or TLS failure, including the run
    ///   outliving the configured timeout.
    /// - [`ScraperError::Deserialize`]: response body is not a JSON array of
    ///   dataset items.
    pub async fn run_actor_sync(
        &self,
        actor_id: &str,
        input: &RunInput,
    ) -> Result<Vec<ApifyItem>, ScraperError> {
        let mut url = self
            .base_url
            .join(&format!("v2/acts/{actor_id}/run-sync-get-dataset-items"))
            .map_err(|e| ScraperError::InvalidUrl {
                url: format!("{}v2/acts/{actor_id}/run-sync-get-dataset-items", self.base_url),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("token", &self.token);

        let response = self.client.post(url.clone()).json(input).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: redacted(&url),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Vec<ApifyItem>>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("dataset items from actor {actor_id}"),
            source: e,
        })
    }
}

/// URL without its query string, safe for logs and error messages (the query
/// carries the API token).
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_url_drops_token_query() {
        let url = Url::parse("https://api.apify.com/v2/acts/x/run?token=secret").unwrap();
        assert_eq!(redacted(&url), "https://api.apify.com/v2/acts/x/run");
    }

    #[test]
    fn base_url_gains_single_trailing_slash() {
        let client = ApifyClient::with_base_url("t", 5, "http://localhost:9999").unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:9999/");
    }
}
