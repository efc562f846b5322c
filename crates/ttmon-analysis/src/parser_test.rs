use super::*;

const WELL_FORMED: &str = "\
**STAGE 1 - Content Analysis:**
A creator walks through three productivity books and what stuck after a month.

**STAGE 2 - Strategic Analysis:**

**Score:** 7/10

**Content Type:** book_content

**Strategic Insights:**
1. Opens with a question hook in the first three seconds.
2. Uses on-screen page counts to signal effort.
";

#[test]
fn well_formed_response_extracts_all_fields() {
    let result = parse_competitor_response("7301", WELL_FORMED);
    assert_eq!(result.content_id, "7301");
    assert_eq!(result.score, 7);
    assert_eq!(result.category, "book_content");
    assert_eq!(result.insights.len(), 2);
    assert!(result.insights[0].starts_with("Opens with a question hook"));
    assert!(result
        .general_analysis
        .starts_with("A creator walks through three productivity books"));
    assert!(!result.general_analysis.contains("STAGE 2"));
}

#[test]
fn no_markers_degrades_to_defaults() {
    let freeform = "The model decided to answer in plain prose without any of the requested \
structure, rambling about the video at length and never producing a score, a category, or a \
numbered list of insights. It kept going for quite a while in this register, well past the \
fallback summary cutoff point.";
    let result = parse_competitor_response("7301", freeform);
    assert_eq!(result.score, DEFAULT_SCORE);
    assert_eq!(result.category, "other");
    assert!(result.insights.is_empty());
    assert_eq!(result.general_analysis, freeform.chars().take(200).collect::<String>().trim());
    assert!(!result.general_analysis.is_empty());
}

#[test]
fn score_above_ten_clamps() {
    let result = parse_competitor_response("1", "**Score:** 15/10");
    assert_eq!(result.score, 10);
}

#[test]
fn negative_score_treated_as_absent() {
    let result = parse_competitor_response("1", "**Score:** -3");
    assert_eq!(result.score, DEFAULT_SCORE);
}

#[test]
fn score_marker_casing_and_emphasis_drift() {
    assert_eq!(parse_competitor_response("1", "score: 4").score, 4);
    assert_eq!(parse_competitor_response("1", "**SCORE:** 9").score, 9);
    assert_eq!(
        parse_competitor_response("1", "**Strategic Score (0-10):** 8").score,
        8
    );
}

#[test]
fn content_type_is_lowercased() {
    let result = parse_competitor_response("1", "**Content Type:** Book_Content");
    assert_eq!(result.category, "book_content");
}

#[test]
fn stage1_marker_casing_is_ignored() {
    let text = "**stage 1 - content analysis:**\nlowercase marker body\n**stage 2**";
    let result = parse_competitor_response("1", text);
    assert_eq!(result.general_analysis, "lowercase marker body");
}

#[test]
fn missing_trailing_sections_do_not_block_earlier_fields() {
    let text = "**STAGE 1 - Content Analysis:**\nDescription only, response was cut off";
    let result = parse_competitor_response("1", text);
    assert!(result.general_analysis.starts_with("Description only"));
    assert_eq!(result.score, DEFAULT_SCORE);
    assert!(result.insights.is_empty());
}

#[test]
fn insights_item_wrapping_across_lines_is_kept() {
    let text = "**Strategic Insights:**\n1. First insight that wraps\nonto a second line.\n2. Second insight.";
    let result = parse_competitor_response("1", text);
    assert_eq!(result.insights.len(), 2);
    assert!(result.insights[0].contains("onto a second line."));
}

#[test]
fn insights_without_numbering_fall_back_to_whole_block() {
    let text = "**Strategic Insights:**\nJust prose, no list here.\n\n**Next Section:**";
    let result = parse_competitor_response("1", text);
    assert_eq!(result.insights, vec!["Just prose, no list here.".to_string()]);
}

#[test]
fn insights_stop_at_next_bold_section() {
    let text = "**Strategic Insights:**\n1. Only one.\n\n**Afterword:** should not leak";
    let result = parse_competitor_response("1", text);
    assert_eq!(result.insights, vec!["Only one.".to_string()]);
}

#[test]
fn niche_category_exact_match() {
    let result = parse_niche_response("1", "**Niche Category:** Books & Reading");
    assert_eq!(result.category, "Books & Reading");
    assert_eq!(result.strategy, ttmon_core::MonitoringStrategy::NicheDeepDive);
}

#[test]
fn niche_category_case_insensitive_match() {
    let result = parse_niche_response("1", "**Niche Category:** books & reading");
    assert_eq!(result.category, "Books & Reading");
}

#[test]
fn niche_category_containment_both_directions() {
    // Response is a fragment of a vocabulary entry.
    assert_eq!(canonical_niche_category("Podcasts"), "Podcasts & Audio Learning");
    // Response contains a vocabulary entry plus extra words.
    assert_eq!(
        canonical_niche_category("mostly AI in Education content"),
        "AI in Education"
    );
}

#[test]
fn niche_category_unknown_defaults_to_other() {
    let result = parse_niche_response("1", "**Niche Category:** Cooking Videos");
    assert_eq!(result.category, "Other");
}

#[test]
fn niche_category_missing_marker_defaults_to_other() {
    let result = parse_niche_response("1", "no category marker anywhere");
    assert_eq!(result.category, "Other");
}

#[test]
fn bracketed_placeholder_style_values_parse() {
    let result = parse_niche_response("1", "**Niche Category:** [Knowledge Management]");
    assert_eq!(result.category, "Knowledge Management");
    let result = parse_competitor_response("1", "**Content Type:** [user_story]");
    assert_eq!(result.category, "user_story");
}
