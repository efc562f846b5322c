//! Normalization of raw dataset items into [`ContentItem`]s.
//!
//! Per-item failures are skipped with a warning; one malformed item never
//! loses the rest of the batch.

use chrono::{DateTime, Utc};
use regex::Regex;

use ttmon_core::{AnalysisPayload, ContentItem, MonitoringTarget};

use crate::error::ScraperError;
use crate::types::{ApifyItem, CountField, SubtitleLink};

/// Captions longer than this are truncated; the store's text column and the
/// analysis prompts need no more.
const MAX_CAPTION_CHARS: usize = 500;

/// Normalize a whole dataset. Slideshows are dropped silently (counted at
/// debug level); items without a recoverable content id are skipped with a
/// warning.
#[must_use]
pub fn normalize_items(
    items: &[ApifyItem],
    target: &MonitoringTarget,
    now: DateTime<Utc>,
) -> Vec<ContentItem> {
    let mut out = Vec::with_capacity(items.len());
    let mut slideshows = 0usize;

    for item in items {
        if item.is_slideshow {
            slideshows += 1;
            continue;
        }
        match normalize_item(item, target, now) {
            Ok(content) => out.push(content),
            Err(e) => {
                tracing::warn!(target = %target.target_value, error = %e, "skipping dataset item");
            }
        }
    }

    if slideshows > 0 {
        tracing::debug!(
            target = %target.target_value,
            slideshows,
            "filtered out photo slideshows"
        );
    }
    out
}

/// Normalize one dataset item.
///
/// # Errors
///
/// Returns [`ScraperError::MissingContentId`] when no id can be recovered
/// from the item or its share URL.
pub fn normalize_item(
    item: &ApifyItem,
    target: &MonitoringTarget,
    now: DateTime<Utc>,
) -> Result<ContentItem, ScraperError> {
    let video_url = item.web_video_url.clone().unwrap_or_default();

    let content_id = item
        .id
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| item.video_id.clone().filter(|s| !s.is_empty()))
        .or_else(|| extract_video_id(&video_url))
        .ok_or_else(|| ScraperError::MissingContentId {
            video_url: video_url.clone(),
        })?;

    let caption: String = item
        .text
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(MAX_CAPTION_CHARS)
        .collect();

    let author_username = item
        .author_meta
        .as_ref()
        .and_then(|m| m.name.as_deref())
        .unwrap_or("")
        .trim_start_matches('@')
        .to_string();

    let video_download_url = item
        .media_urls
        .first()
        .cloned()
        .filter(|u| !u.is_empty());

    let subtitle_url = item
        .video_meta
        .as_ref()
        .and_then(|m| select_subtitle_url(&m.subtitle_links));

    Ok(ContentItem {
        content_id,
        target_value: target.target_value.clone(),
        video_url,
        author_username,
        caption,
        likes: parse_count(&item.digg_count),
        comments: parse_count(&item.comment_count),
        views: parse_count(&item.play_count),
        engagement_rate: 0.0,
        discovered_at: Some(now),
        video_download_url,
        subtitle_url,
        monitoring_strategy: target.monitoring_strategy.clone(),
        analysis: AnalysisPayload::default(),
    })
}

/// Recover the post id from a share URL: the `/video/<digits>` segment, or
/// as a last resort the final path segment.
fn extract_video_id(video_url: &str) -> Option<String> {
    if video_url.is_empty() {
        return None;
    }
    let re = Regex::new(r"/video/(\d+)").expect("valid video id regex");
    if let Some(captures) = re.captures(video_url) {
        return Some(captures[1].to_string());
    }
    video_url
        .rsplit('/')
        .next()
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

/// Pick the subtitle download link: an English track when one exists,
/// otherwise the first track with a link.
fn select_subtitle_url(links: &[SubtitleLink]) -> Option<String> {
    let usable =
        |link: &SubtitleLink| link.download_link.clone().filter(|u| !u.is_empty());

    links
        .iter()
        .filter(|l| is_english(l.language.as_deref()))
        .find_map(usable)
        .or_else(|| links.iter().find_map(usable))
}

fn is_english(language: Option<&str>) -> bool {
    language.is_some_and(|lang| lang == "eng" || lang.to_lowercase().contains("en"))
}

/// Parse an engagement counter that may be a plain number or a display
/// string with thousands separators and a K/M/B suffix.
#[must_use]
pub fn parse_count(raw: &CountField) -> u64 {
    match raw {
        CountField::Number(n) => *n,
        CountField::Text(s) => parse_count_text(s),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count_text(s: &str) -> u64 {
    let cleaned = s.trim().to_uppercase().replace(',', "");
    let (digits, multiplier) = if let Some(p) = cleaned.strip_suffix('K') {
        (p, 1_000.0)
    } else if let Some(p) = cleaned.strip_suffix('M') {
        (p, 1_000_000.0)
    } else if let Some(p) = cleaned.strip_suffix('B') {
        (p, 1_000_000_000.0)
    } else {
        (cleaned.as_str(), 1.0)
    };

    digits.parse::<f64>().map_or(0, |v| {
        if v.is_sign_negative() {
            0
        } else {
            (v * multiplier) as u64
        }
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
