//! Data model shared across the pipeline.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::strategy::MonitoringStrategy;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid target kind: {0}")]
    InvalidTargetKind(String),
}

/// What kind of source a monitoring target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Profile,
    Hashtag,
    Search,
}

impl TargetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Profile => "profile",
            TargetKind::Hashtag => "hashtag",
            TargetKind::Search => "search",
        }
    }

    /// Parse a kind string as stored in the targets table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTargetKind`] for anything outside the
    /// closed set; the store boundary skips such records with a warning.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "profile" => Ok(TargetKind::Profile),
            "hashtag" => Ok(TargetKind::Hashtag),
            "search" => Ok(TargetKind::Search),
            other => Err(CoreError::InvalidTargetKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured source to pull content from. Immutable for the duration of
/// one run.
#[derive(Debug, Clone)]
pub struct MonitoringTarget {
    /// Record id in the store; opaque.
    pub record_id: String,
    /// The handle, tag, or query this target watches (e.g. `@blinkist`).
    pub target_value: String,
    pub kind: TargetKind,
    pub active: bool,
    /// Cap on results per scrape.
    pub results_limit: u32,
    /// Operator-facing strategy label, if assigned. Kept as the raw string;
    /// routing parses it (unknown labels must survive to the skip report).
    pub monitoring_strategy: Option<String>,
}

/// Mutable AI-analysis payload on a content item. Written in place by the
/// batch orchestrator.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPayload {
    /// Stage-1 free-text analysis.
    pub general_analysis: Option<String>,
    /// Strategic score, 0-10.
    pub score: Option<u8>,
    /// Category for non-niche strategies. Mutually exclusive with
    /// `niche_category`.
    pub content_type: Option<String>,
    /// Category for the Niche Deep-Dive strategy only.
    pub niche_category: Option<String>,
    /// Numbered insight text.
    pub insights: Option<String>,
    pub analyzed: bool,
}

/// One scraped TikTok post plus engagement stats and (eventually) its
/// analysis payload. Owned by the pipeline for one run.
#[derive(Debug, Clone)]
pub struct ContentItem {
    /// Source post id. Required; an item without one is rejected during
    /// normalization, before it reaches the pipeline.
    pub content_id: String,
    /// The `target_value` of the owning monitoring target.
    pub target_value: String,
    /// Public share URL of the post.
    pub video_url: String,
    pub author_username: String,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,
    pub views: u64,
    /// Cached engagement percentage. `0.0` means not yet computed; use
    /// [`ContentItem::engagement_rate`] rather than reading this directly.
    pub engagement_rate: f64,
    pub discovered_at: Option<DateTime<Utc>>,
    /// Watermark-free downloadable video, when the scraper found one.
    pub video_download_url: Option<String>,
    pub subtitle_url: Option<String>,
    /// Strategy label inherited from the owning target.
    pub monitoring_strategy: Option<String>,
    pub analysis: AnalysisPayload,
}

impl ContentItem {
    /// Engagement rate as a percentage: `(likes + comments) / views * 100`,
    /// or `0.0` when there are no views.
    #[must_use]
    pub fn computed_engagement_rate(&self) -> f64 {
        if self.views == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = (self.likes + self.comments) as f64 / self.views as f64 * 100.0;
        rate
    }

    /// Cached engagement rate, computing and storing it on first read.
    /// Within one pipeline pass the value never changes once computed.
    pub fn engagement_rate(&mut self) -> f64 {
        if self.engagement_rate == 0.0 {
            self.engagement_rate = self.computed_engagement_rate();
        }
        self.engagement_rate
    }

    /// Age in whole days relative to `now`, if a discovery timestamp exists.
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.discovered_at.map(|d| (now - d).num_days())
    }
}

/// An operator-authored quality bar, scoped to a strategy and optionally
/// narrowed to a target kind and/or value. `None` kind/value means wildcard.
///
/// Content passes a rule when ANY configured threshold is met (OR logic);
/// a rule with no thresholds passes everything.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRule {
    pub monitoring_strategy: String,
    pub target_kind: Option<String>,
    pub target_value: Option<String>,
    pub min_likes: Option<u64>,
    pub min_views: Option<u64>,
    /// Minimum engagement rate in percent (e.g. `2.5` for 2.5%).
    pub min_engagement_rate: Option<f64>,
    pub max_age_days: Option<i64>,
    pub active: bool,
}

impl FilterRule {
    /// Whether any threshold is configured at all.
    #[must_use]
    pub fn has_thresholds(&self) -> bool {
        self.min_likes.is_some()
            || self.min_views.is_some()
            || self.min_engagement_rate.is_some()
            || self.max_age_days.is_some()
    }
}

/// Structured result of one AI analysis attempt. Always complete: every
/// field has a default substituted when extraction fails.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub content_id: String,
    /// Which strategy's prompt/parser produced this result. Decides whether
    /// `category` lands in `content_type` or `niche_category` on the item.
    pub strategy: MonitoringStrategy,
    /// Stage-1 free-text analysis.
    pub general_analysis: String,
    /// Strategic score in `[0, 10]`.
    pub score: u8,
    /// Category label from the strategy's vocabulary.
    pub category: String,
    /// 2-3 insight strings when well-formed; may be fewer after degraded
    /// parsing, never more than the response contained.
    pub insights: Vec<String>,
}
