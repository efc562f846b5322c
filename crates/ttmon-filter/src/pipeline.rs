//! Batch filtering with aggregate metrics.

use chrono::Utc;

use ttmon_core::{ContentItem, MonitoringTarget};

use crate::index::{find_matching_rule, RuleIndex};
use crate::thresholds::passes_thresholds;

/// Per-batch filtering summary. Reported once and discarded.
#[derive(Debug, Clone)]
pub struct FilterMetrics {
    pub total_scraped: usize,
    pub filtered_out: usize,
    pub saved: usize,
    /// The rule applied, or `None` when the batch passed through unfiltered.
    pub rule_used: Option<ttmon_core::FilterRule>,
}

/// Filter one target's batch of content against the rule index.
///
/// All items in a batch share the owning target, so the matcher runs once
/// with the first item as representative context. No matching rule means the
/// whole batch passes through unfiltered (fail-open, mirroring the per-rule
/// policy for missing thresholds).
#[must_use]
pub fn filter_content(
    items: Vec<ContentItem>,
    target: &MonitoringTarget,
    index: &RuleIndex,
) -> (Vec<ContentItem>, FilterMetrics) {
    let total_scraped = items.len();

    let Some(first) = items.first() else {
        return (
            Vec::new(),
            FilterMetrics {
                total_scraped: 0,
                filtered_out: 0,
                saved: 0,
                rule_used: None,
            },
        );
    };

    let Some(rule) = find_matching_rule(first, target, index).cloned() else {
        tracing::debug!(
            target_value = %target.target_value,
            total_scraped,
            "no filter rule matched, passing batch through"
        );
        let metrics = FilterMetrics {
            total_scraped,
            filtered_out: 0,
            saved: total_scraped,
            rule_used: None,
        };
        return (items, metrics);
    };

    let now = Utc::now();
    let mut kept = Vec::with_capacity(items.len());
    for mut item in items {
        if passes_thresholds(&mut item, &rule, now) {
            kept.push(item);
        }
    }

    let saved = kept.len();
    let metrics = FilterMetrics {
        total_scraped,
        filtered_out: total_scraped - saved,
        saved,
        rule_used: Some(rule),
    };

    tracing::info!(
        target_value = %target.target_value,
        total_scraped,
        saved,
        filtered_out = metrics.filtered_out,
        "filter applied"
    );

    (kept, metrics)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
