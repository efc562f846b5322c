//! TikTok scraping via the Apify actor API.
//!
//! [`Scraper`] dispatches a [`ttmon_core::MonitoringTarget`] to its
//! kind-specific procedure (profiles today), runs the actor synchronously
//! through [`ApifyClient`], and normalizes the raw dataset into
//! [`ttmon_core::ContentItem`]s ready for filtering.

pub mod client;
pub mod error;
pub mod normalize;
pub mod processor;
pub mod types;

pub use client::ApifyClient;
pub use error::ScraperError;
pub use normalize::{normalize_item, normalize_items, parse_count};
pub use processor::Scraper;
pub use types::{ApifyItem, CountField, RunInput};
