use super::*;
use crate::index::build_rule_index;
use ttmon_core::{AnalysisPayload, FilterRule, TargetKind};

const CI: &str = "Competitor Intelligence";

fn target() -> MonitoringTarget {
    MonitoringTarget {
        record_id: "rec1".to_string(),
        target_value: "@blinkist".to_string(),
        kind: TargetKind::Profile,
        active: true,
        results_limit: 10,
        monitoring_strategy: Some(CI.to_string()),
    }
}

fn item(views: u64) -> ContentItem {
    ContentItem {
        content_id: format!("id-{views}"),
        target_value: "@blinkist".to_string(),
        video_url: String::new(),
        author_username: String::new(),
        caption: String::new(),
        likes: 0,
        comments: 0,
        views,
        engagement_rate: 0.0,
        discovered_at: None,
        video_download_url: None,
        subtitle_url: None,
        monitoring_strategy: Some(CI.to_string()),
        analysis: AnalysisPayload::default(),
    }
}

fn min_views_rule(min_views: u64) -> FilterRule {
    FilterRule {
        monitoring_strategy: CI.to_string(),
        target_kind: None,
        target_value: None,
        min_likes: None,
        min_views: Some(min_views),
        min_engagement_rate: None,
        max_age_days: None,
        active: true,
    }
}

#[test]
fn empty_batch_yields_zero_metrics() {
    let index = build_rule_index(vec![min_views_rule(10)]);
    let (kept, metrics) = filter_content(Vec::new(), &target(), &index);
    assert!(kept.is_empty());
    assert_eq!(metrics.total_scraped, 0);
    assert_eq!(metrics.saved, 0);
    assert!(metrics.rule_used.is_none());
}

#[test]
fn no_matching_rule_passes_batch_through() {
    let index = build_rule_index(Vec::new());
    let items = vec![item(1), item(2)];
    let (kept, metrics) = filter_content(items, &target(), &index);
    assert_eq!(kept.len(), 2);
    assert_eq!(metrics.total_scraped, 2);
    assert_eq!(metrics.filtered_out, 0);
    assert_eq!(metrics.saved, 2);
    assert!(metrics.rule_used.is_none());
}

#[test]
fn strategy_level_rule_filters_by_views() {
    // Level-1 rule requiring min_views=10000; items on either side of it.
    let rule = min_views_rule(10_000);
    let index = build_rule_index(vec![rule.clone()]);
    let views = [5_000, 20_000, 9_999, 10_000, 50_000];
    let items: Vec<ContentItem> = views.iter().map(|&v| item(v)).collect();

    let (kept, metrics) = filter_content(items, &target(), &index);

    let kept_views: Vec<u64> = kept.iter().map(|c| c.views).collect();
    assert_eq!(kept_views, vec![20_000, 10_000, 50_000]);
    assert_eq!(metrics.total_scraped, 5);
    assert_eq!(metrics.filtered_out, 2);
    assert_eq!(metrics.saved, 3);
    assert_eq!(metrics.rule_used, Some(rule));
}

#[test]
fn target_without_strategy_passes_unfiltered() {
    let index = build_rule_index(vec![min_views_rule(10_000)]);
    let mut t = target();
    t.monitoring_strategy = None;
    let (kept, metrics) = filter_content(vec![item(1)], &t, &index);
    assert_eq!(kept.len(), 1);
    assert!(metrics.rule_used.is_none());
}
