//! Batch analysis orchestration.
//!
//! Drives routing across a batch, mutates each analyzed item's payload in
//! place, and tallies analyzed/skipped counts per strategy label. One item's
//! failure never aborts its siblings.

use std::collections::BTreeMap;

use ttmon_core::{AnalysisResult, ContentItem, MonitoringStrategy};

use crate::model::AnalysisModel;
use crate::router::{Analyzer, RouteOutcome, SkipReason};

/// Cost-control gate: items already analyzed are skipped; otherwise an item
/// must reach the engagement-rate floor or strictly exceed the view floor
/// to be worth a model call.
#[derive(Debug, Clone)]
pub struct AnalysisGate {
    pub min_engagement_rate: f64,
    pub min_views: u64,
}

impl Default for AnalysisGate {
    fn default() -> Self {
        Self {
            min_engagement_rate: 5.0,
            min_views: 10_000,
        }
    }
}

impl AnalysisGate {
    /// Whether this item is worth an analysis call.
    pub fn should_analyze(&self, item: &mut ContentItem) -> bool {
        if item.analysis.analyzed {
            return false;
        }
        if item.engagement_rate() >= self.min_engagement_rate {
            return true;
        }
        item.views > self.min_views
    }
}

/// Per-strategy analyzed/skipped counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyTally {
    pub analyzed: usize,
    pub skipped: usize,
}

/// Final batch tally, keyed by strategy label with an "Unknown" bucket for
/// anything outside the known set.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub per_strategy: BTreeMap<String, StrategyTally>,
}

impl BatchReport {
    pub const UNKNOWN_BUCKET: &'static str = "Unknown";

    fn bucket(item: &ContentItem) -> String {
        item.monitoring_strategy
            .as_deref()
            .and_then(MonitoringStrategy::parse_label)
            .map_or_else(|| Self::UNKNOWN_BUCKET.to_string(), |s| s.label().to_string())
    }

    fn record_analyzed(&mut self, item: &ContentItem) {
        self.per_strategy.entry(Self::bucket(item)).or_default().analyzed += 1;
    }

    fn record_skipped(&mut self, item: &ContentItem) {
        self.per_strategy.entry(Self::bucket(item)).or_default().skipped += 1;
    }

    #[must_use]
    pub fn total_analyzed(&self) -> usize {
        self.per_strategy.values().map(|t| t.analyzed).sum()
    }

    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.per_strategy.values().map(|t| t.skipped).sum()
    }

    /// Emit the human-readable summary operators read after a run.
    pub fn log_summary(&self) {
        for (strategy, tally) in &self.per_strategy {
            if tally.analyzed > 0 {
                tracing::info!(strategy = %strategy, analyzed = tally.analyzed, "analysis complete");
            }
            if tally.skipped > 0 {
                tracing::info!(strategy = %strategy, skipped = tally.skipped, "items skipped");
            }
        }
        tracing::info!(
            analyzed = self.total_analyzed(),
            skipped = self.total_skipped(),
            "batch analysis finished"
        );
    }
}

/// Analyze a batch in place.
///
/// Items failing the gate, or routed to a skip, are counted and left
/// untouched; analyzed items get their payload fields updated and their
/// `analyzed` flag set. Returns the structured results alongside the tally.
pub async fn analyze_batch<M: AnalysisModel>(
    analyzer: &Analyzer<M>,
    items: &mut [ContentItem],
    gate: &AnalysisGate,
) -> (Vec<AnalysisResult>, BatchReport) {
    let mut results = Vec::new();
    let mut report = BatchReport::default();

    for item in items.iter_mut() {
        if !gate.should_analyze(item) {
            tracing::debug!(content_id = %item.content_id, "below analysis gate, skipping");
            report.record_skipped(item);
            continue;
        }

        match analyzer.analyze_item(item).await {
            RouteOutcome::Analyzed(result) => {
                apply_result(item, &result);
                report.record_analyzed(item);
                results.push(result);
            }
            RouteOutcome::Skipped(reason) => {
                if reason == SkipReason::AnalysisFailed {
                    tracing::warn!(content_id = %item.content_id, reason = %reason, "item skipped");
                }
                report.record_skipped(item);
            }
        }
    }

    (results, report)
}

/// Write a result into the item's mutable payload. The category lands in
/// `content_type` or `niche_category` depending on the producing strategy,
/// never both.
pub fn apply_result(item: &mut ContentItem, result: &AnalysisResult) {
    item.analysis.general_analysis = Some(result.general_analysis.clone());
    item.analysis.score = Some(result.score);
    item.analysis.insights = Some(numbered_insights(&result.insights));
    item.analysis.analyzed = true;

    if result.strategy == MonitoringStrategy::NicheDeepDive {
        item.analysis.niche_category = Some(result.category.clone());
        item.analysis.content_type = None;
    } else {
        item.analysis.content_type = Some(result.category.clone());
        item.analysis.niche_category = None;
    }
}

/// Render insights back into the numbered text form the store keeps.
fn numbered_insights(insights: &[String]) -> String {
    insights
        .iter()
        .enumerate()
        .map(|(i, insight)| format!("{}. {insight}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
