//! Per-item threshold evaluation.

use chrono::{DateTime, Utc};

use ttmon_core::{ContentItem, FilterRule};

/// Decide pass/fail for one item against one rule.
///
/// A rule with no thresholds configured passes everything; absence of
/// thresholds means "no filtering configured", not "reject all". Otherwise
/// the item passes when ANY single configured threshold is met:
///
/// - `likes >= min_likes`
/// - `views >= min_views`
/// - `engagement_rate >= min_engagement_rate` (rate computed and cached on
///   first read)
/// - `age_days <= max_age_days` (only when a discovery timestamp exists)
///
/// The thresholds are independent ways to prove quality; requiring all of
/// them would reject items that are strong on one dimension only.
pub fn passes_thresholds(content: &mut ContentItem, rule: &FilterRule, now: DateTime<Utc>) -> bool {
    if !rule.has_thresholds() {
        return true;
    }

    if let Some(min_likes) = rule.min_likes {
        if content.likes >= min_likes {
            return true;
        }
    }

    if let Some(min_views) = rule.min_views {
        if content.views >= min_views {
            return true;
        }
    }

    if let Some(min_rate) = rule.min_engagement_rate {
        if content.engagement_rate() >= min_rate {
            return true;
        }
    }

    if let Some(max_age) = rule.max_age_days {
        if let Some(age) = content.age_days(now) {
            if age <= max_age {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use ttmon_core::AnalysisPayload;

    fn item(likes: u64, comments: u64, views: u64) -> ContentItem {
        ContentItem {
            content_id: "1".to_string(),
            target_value: "@blinkist".to_string(),
            video_url: String::new(),
            author_username: String::new(),
            caption: String::new(),
            likes,
            comments,
            views,
            engagement_rate: 0.0,
            discovered_at: None,
            video_download_url: None,
            subtitle_url: None,
            monitoring_strategy: None,
            analysis: AnalysisPayload::default(),
        }
    }

    fn rule() -> FilterRule {
        FilterRule {
            monitoring_strategy: "Competitor Intelligence".to_string(),
            target_kind: None,
            target_value: None,
            min_likes: None,
            min_views: None,
            min_engagement_rate: None,
            max_age_days: None,
            active: true,
        }
    }

    #[test]
    fn no_thresholds_passes_unconditionally() {
        let mut c = item(0, 0, 0);
        assert!(passes_thresholds(&mut c, &rule(), Utc::now()));
    }

    #[test]
    fn any_single_threshold_suffices() {
        let mut r = rule();
        r.min_likes = Some(100);
        // min_views unset: likes alone decide.
        let mut passing = item(150, 0, 10);
        let mut failing = item(50, 0, 10);
        assert!(passes_thresholds(&mut passing, &r, Utc::now()));
        assert!(!passes_thresholds(&mut failing, &r, Utc::now()));
    }

    #[test]
    fn strong_on_one_dimension_passes_despite_weak_others() {
        let mut r = rule();
        r.min_likes = Some(1_000_000);
        r.min_views = Some(10_000);
        // Viral by views, weak on likes.
        let mut c = item(3, 0, 50_000);
        assert!(passes_thresholds(&mut c, &r, Utc::now()));
    }

    #[test]
    fn engagement_rate_computed_on_demand() {
        let mut r = rule();
        r.min_engagement_rate = Some(5.0);
        // (90 + 10) / 1000 * 100 = 10%
        let mut c = item(90, 10, 1000);
        assert!(passes_thresholds(&mut c, &r, Utc::now()));
        assert!((c.engagement_rate - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn age_threshold_needs_timestamp() {
        let now = Utc::now();
        let mut r = rule();
        r.max_age_days = Some(7);

        let mut undated = item(0, 0, 0);
        assert!(!passes_thresholds(&mut undated, &r, now));

        let mut fresh = item(0, 0, 0);
        fresh.discovered_at = Some(now - Duration::days(3));
        assert!(passes_thresholds(&mut fresh, &r, now));

        let mut stale = item(0, 0, 0);
        stale.discovered_at = Some(now - Duration::days(30));
        assert!(!passes_thresholds(&mut stale, &r, now));
    }

    #[test]
    fn all_thresholds_missed_fails() {
        let mut r = rule();
        r.min_likes = Some(100);
        r.min_views = Some(10_000);
        r.min_engagement_rate = Some(5.0);
        let mut c = item(10, 0, 500);
        assert!(!passes_thresholds(&mut c, &r, Utc::now()));
    }
}
