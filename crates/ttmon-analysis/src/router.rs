//! Strategy routing: one item in, an analysis result or a documented skip
//! out.

use ttmon_core::{AnalysisResult, ContentItem, MonitoringStrategy};

use crate::media::MediaFetcher;
use crate::model::{AnalysisModel, VideoPart};
use crate::parser::{parse_competitor_response, parse_niche_response};
use crate::prompts::{competitor_intelligence_prompt, niche_deepdive_prompt, video_context_preamble};

/// Why an item was not analyzed. None of these are errors; they are
/// reported so operators can tell configuration gaps from real failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Known strategy whose prompt is not implemented yet.
    AwaitingImplementation,
    /// The item carries no strategy label.
    NoStrategy,
    /// The label is not in the known strategy set.
    UnknownStrategy,
    /// The analysis call itself failed; the item stays unanalyzed.
    AnalysisFailed,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::AwaitingImplementation => "awaiting prompt implementation",
            SkipReason::NoStrategy => "no strategy assigned",
            SkipReason::UnknownStrategy => "unknown strategy",
            SkipReason::AnalysisFailed => "analysis failed",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of routing one item. Total over the label's value space: every
/// item maps to exactly one of these, and routing never raises.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    Analyzed(AnalysisResult),
    Skipped(SkipReason),
}

/// Dispatches content to the strategy-specific analysis procedure.
pub struct Analyzer<M: AnalysisModel> {
    model: M,
    media: MediaFetcher,
}

impl<M: AnalysisModel> Analyzer<M> {
    pub fn new(model: M, media: MediaFetcher) -> Self {
        Self { model, media }
    }

    /// Route one item by its strategy label.
    pub async fn analyze_item(&self, item: &ContentItem) -> RouteOutcome {
        let label = item.monitoring_strategy.as_deref().unwrap_or("").trim();
        if label.is_empty() {
            tracing::warn!(content_id = %item.content_id, "no monitoring strategy, skipping");
            return RouteOutcome::Skipped(SkipReason::NoStrategy);
        }

        match MonitoringStrategy::parse_label(label) {
            Some(strategy @ MonitoringStrategy::CompetitorIntelligence)
            | Some(strategy @ MonitoringStrategy::NicheDeepDive) => {
                match self.run_two_stage(item, strategy).await {
                    Ok(result) => RouteOutcome::Analyzed(result),
                    Err(e) => {
                        tracing::warn!(content_id = %item.content_id, error = %e, "analysis failed");
                        RouteOutcome::Skipped(SkipReason::AnalysisFailed)
                    }
                }
            }
            Some(MonitoringStrategy::TrendDiscovery) => {
                tracing::info!(
                    content_id = %item.content_id,
                    strategy = label,
                    "skipping, prompt not implemented"
                );
                RouteOutcome::Skipped(SkipReason::AwaitingImplementation)
            }
            None => {
                tracing::warn!(content_id = %item.content_id, strategy = label, "unknown strategy");
                RouteOutcome::Skipped(SkipReason::UnknownStrategy)
            }
        }
    }

    /// Shared two-stage procedure: gather optional media, build the
    /// strategy's prompt, call the model, parse the response.
    async fn run_two_stage(
        &self,
        item: &ContentItem,
        strategy: MonitoringStrategy,
    ) -> Result<AnalysisResult, crate::AnalysisError> {
        let subtitles = self.fetch_subtitles(item).await;
        let video = self.fetch_video(item).await;

        let mut prompt = match strategy {
            MonitoringStrategy::NicheDeepDive => niche_deepdive_prompt(item, &subtitles),
            _ => competitor_intelligence_prompt(item, &subtitles),
        };
        if video.is_some() {
            prompt = format!("{}{prompt}", video_context_preamble(strategy));
        }

        tracing::debug!(
            content_id = %item.content_id,
            strategy = %strategy,
            video_mode = video.is_some(),
            "requesting analysis"
        );

        let response = self.model.generate(&prompt, video.as_ref()).await?;

        let result = match strategy {
            MonitoringStrategy::NicheDeepDive => parse_niche_response(&item.content_id, &response),
            _ => parse_competitor_response(&item.content_id, &response),
        };
        Ok(result)
    }

    /// Subtitle fetch failure degrades to empty subtitles, never an error.
    async fn fetch_subtitles(&self, item: &ContentItem) -> String {
        let Some(url) = item.subtitle_url.as_deref().filter(|u| !u.is_empty()) else {
            return String::new();
        };
        match self.media.fetch_subtitle_text(url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(content_id = %item.content_id, error = %e, "subtitle fetch failed");
                String::new()
            }
        }
    }

    /// Video fetch failure degrades to text-only analysis, never an error.
    async fn fetch_video(&self, item: &ContentItem) -> Option<VideoPart> {
        let url = item.video_download_url.as_deref().filter(|u| !u.is_empty())?;
        match self.media.fetch_video(url).await {
            Ok(bytes) => Some(VideoPart::mp4(bytes)),
            Err(e) => {
                tracing::warn!(
                    content_id = %item.content_id,
                    error = %e,
                    "video download failed, falling back to text-only analysis"
                );
                None
            }
        }
    }
}
