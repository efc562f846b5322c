//! Per-target-kind scrape dispatch.

use chrono::Utc;

use ttmon_core::{ContentItem, MonitoringTarget, TargetKind};

use crate::client::ApifyClient;
use crate::error::ScraperError;
use crate::normalize::normalize_items;
use crate::types::RunInput;

/// Scrapes one monitoring target into normalized content.
///
/// Only profile targets are implemented; hashtag and search targets return
/// [`ScraperError::UnsupportedTarget`] so the caller can report them without
/// aborting the run.
pub struct Scraper {
    client: ApifyClient,
    actor_id: String,
}

impl Scraper {
    #[must_use]
    pub fn new(client: ApifyClient, actor_id: &str) -> Self {
        Self {
            client,
            actor_id: actor_id.to_owned(),
        }
    }

    /// Scrape one target.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnsupportedTarget`]: hashtag and search targets.
    /// - Any error from [`ApifyClient::run_actor_sync`].
    pub async fn scrape_target(
        &self,
        target: &MonitoringTarget,
    ) -> Result<Vec<ContentItem>, ScraperError> {
        match target.kind {
            TargetKind::Profile => self.scrape_profile(target).await,
            kind @ (TargetKind::Hashtag | TargetKind::Search) => {
                Err(ScraperError::UnsupportedTarget { kind })
            }
        }
    }

    async fn scrape_profile(
        &self,
        target: &MonitoringTarget,
    ) -> Result<Vec<ContentItem>, ScraperError> {
        tracing::info!(target = %target.target_value, "scraping profile");

        let input = RunInput::profile(&target.target_value, target.results_limit);
        let items = self.client.run_actor_sync(&self.actor_id, &input).await?;
        let contents = normalize_items(&items, target, Utc::now());

        tracing::info!(
            target = %target.target_value,
            raw = items.len(),
            normalized = contents.len(),
            "scrape complete"
        );
        Ok(contents)
    }
}
