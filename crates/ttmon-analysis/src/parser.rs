//! Response parsing: recover structured fields from two-stage free text.
//!
//! The model's output has no format guarantee: casing drifts, markdown
//! emphasis comes and goes, trailing sections go missing. Every extraction
//! here is an independent pure function returning `Option`; the parse
//! functions compose them with defaults so the result is always complete,
//! never an error.

use regex::Regex;

use ttmon_core::{AnalysisResult, MonitoringStrategy};

/// Substituted when no score marker is found.
pub const DEFAULT_SCORE: u8 = 5;

/// Fixed vocabulary for the Niche Deep-Dive category. The last entry is the
/// catch-all default.
pub const NICHE_CATEGORIES: [&str; 7] = [
    "Podcasts & Audio Learning",
    "Books & Reading",
    "Productivity & Habits",
    "AI in Education",
    "Upskilling & Career",
    "Knowledge Management",
    "Other",
];

/// Parse a competitor-intelligence response.
#[must_use]
pub fn parse_competitor_response(content_id: &str, response: &str) -> AnalysisResult {
    AnalysisResult {
        content_id: content_id.to_owned(),
        strategy: MonitoringStrategy::CompetitorIntelligence,
        general_analysis: extract_stage1(response)
            .unwrap_or_else(|| fallback_summary(response)),
        score: extract_score(response).unwrap_or(DEFAULT_SCORE),
        category: extract_labeled_token(response, "content type")
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "other".to_string()),
        insights: extract_insights(response),
    }
}

/// Parse a niche deep-dive response. The category is validated against
/// [`NICHE_CATEGORIES`]; anything unrecognized becomes `"Other"`.
#[must_use]
pub fn parse_niche_response(content_id: &str, response: &str) -> AnalysisResult {
    AnalysisResult {
        content_id: content_id.to_owned(),
        strategy: MonitoringStrategy::NicheDeepDive,
        general_analysis: extract_stage1(response)
            .unwrap_or_else(|| fallback_summary(response)),
        score: extract_score(response).unwrap_or(DEFAULT_SCORE),
        category: extract_labeled_line(response, "niche category")
            .map_or_else(|| "Other".to_string(), |raw| canonical_niche_category(&raw)),
        insights: extract_insights(response),
    }
}

/// Stage-1 text: everything between the Stage-1 marker and the next Stage-2
/// marker (or end of text). Case-insensitive, tolerant of the marker's
/// trailing title text.
fn extract_stage1(text: &str) -> Option<String> {
    let re = Regex::new(r"(?is)\*\*stage\s*1[^*]*\*\*\s*(.*?)(?:\*\*stage\s*2|\z)")
        .expect("valid stage1 regex");
    re.captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

/// When no stage markers exist at all, the first 200 characters stand in for
/// the general analysis.
fn fallback_summary(text: &str) -> String {
    text.chars().take(200).collect::<String>().trim().to_string()
}

/// First integer after a "Score:" marker, clamped to `[0, 10]`. A negative
/// number is treated as absent, so no negative score ever surfaces.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn extract_score(text: &str) -> Option<u8> {
    let re = Regex::new(r"(?i)\bscore\b[^:\n]*:\**\s*(-?\d+)").expect("valid score regex");
    let raw: i64 = re.captures(text)?.get(1)?.as_str().parse().ok()?;
    if raw < 0 {
        return None;
    }
    Some(raw.min(10) as u8)
}

/// Single identifier-like token after `{label}:` (e.g. `book_content`).
fn extract_labeled_token(text: &str, label: &str) -> Option<String> {
    let pattern = format!(r"(?i){}:\**\s*\[?([A-Za-z_]+)", regex::escape(label));
    let re = Regex::new(&pattern).expect("valid labeled-token regex");
    re.captures(text).map(|c| c[1].trim().to_string())
}

/// Rest-of-line text after `{label}:` (for multi-word category values).
fn extract_labeled_line(text: &str, label: &str) -> Option<String> {
    let pattern = format!(r"(?i){}:\**\s*\[?([^\n*\]]+)", regex::escape(label));
    let re = Regex::new(&pattern).expect("valid labeled-line regex");
    re.captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Map a raw category string onto the fixed niche vocabulary: exact
/// case-insensitive match first, then substring containment in either
/// direction, else the catch-all.
#[must_use]
pub fn canonical_niche_category(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() {
        return "Other".to_string();
    }

    for category in NICHE_CATEGORIES {
        if category.to_lowercase() == lower {
            return category.to_string();
        }
    }
    for category in NICHE_CATEGORIES {
        let cat_lower = category.to_lowercase();
        if cat_lower.contains(&lower) || lower.contains(&cat_lower) {
            return category.to_string();
        }
    }
    "Other".to_string()
}

/// The numbered insight list after a "Strategic Insights:" marker.
///
/// The block runs to the next bold marker or end of text. Numbered items may
/// wrap across lines; each item runs to the start of the next. When the
/// block exists but holds no numbered items, the whole block is kept as a
/// single insight (degraded but not discarded). No marker means no insights.
fn extract_insights(text: &str) -> Vec<String> {
    let block_re = Regex::new(r"(?is)strategic\s*insights:\**\s*(.*?)(?:\n\s*\*\*|\z)")
        .expect("valid insights-block regex");
    let Some(block) = block_re.captures(text).map(|c| c[1].trim().to_string()) else {
        return Vec::new();
    };
    if block.is_empty() {
        return Vec::new();
    }

    let items = split_numbered(&block);
    if items.is_empty() {
        vec![block]
    } else {
        items
    }
}

/// Split a block on `N.` item starts, keeping wrapped continuation lines
/// with their item.
fn split_numbered(block: &str) -> Vec<String> {
    let start_re = Regex::new(r"(?m)^\s*\d+\.\s*").expect("valid item-start regex");
    let bounds: Vec<(usize, usize)> = start_re
        .find_iter(block)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut items = Vec::with_capacity(bounds.len());
    for (i, &(_, body_start)) in bounds.iter().enumerate() {
        let body_end = bounds.get(i + 1).map_or(block.len(), |&(next, _)| next);
        let item = block[body_start..body_end].trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }
    }
    items
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
