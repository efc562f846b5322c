//! Prompt templates per monitoring strategy.
//!
//! Both strategies use the same two-stage shape: an objective Stage-1
//! description, then a structured Stage-2 block (score, category, numbered
//! insights) that the parser recovers field by field.

use ttmon_core::{ContentItem, MonitoringStrategy};

use crate::parser::NICHE_CATEGORIES;

/// Two-stage competitor-intelligence prompt.
#[must_use]
pub fn competitor_intelligence_prompt(item: &ContentItem, subtitles: &str) -> String {
    format!(
        "AIBRARY CONTEXT: AIbrary (aibrary.ai) is an AI-powered learning platform that transforms \
books into personalized podcasts and interactive learning experiences. Target audience: lifelong \
learners seeking flexible, book-based personal development.

Analyze this TikTok content using a two-stage approach:

{content_block}

STAGE 1 - OBJECTIVE CONTENT ANALYSIS:
Describe what this content is about without considering who created it. Focus on the actual \
topic, message, and format.

STAGE 2 - STRATEGIC COMPETITOR ANALYSIS:
Based on Stage 1, evaluate for AIbrary's competitive intelligence.

Strategic Score (0-10): How valuable is this content for AIbrary's competitive strategy? \
Balance topic relevance AND execution quality. BE CRITICAL - most content should score 4-7; \
reserve 9-10 for truly exceptional content combining high relevance and quality.

Content Type: Choose ONE that best fits:
- book_content: Book summaries, insights, key takeaways
- learning_feature: Platform features, tools, app functionality showcases
- educational_value: Tips, tutorials, how-tos (non-book)
- user_story: Testimonials, user experiences, reviews
- brand_marketing: Announcements, promotions, campaigns
- trend_engagement: Trending sounds/challenges, viral format participation
- community_culture: Behind-scenes, team, company culture
- productivity_lifestyle: Productivity, motivation, self-improvement
- other: Doesn't fit above categories

Strategic Insights: Provide EXACTLY 2-3 numbered insights about what AIbrary can learn from \
this content. Each insight should cover a DIFFERENT aspect. Be specific and varied.

FORMAT YOUR RESPONSE EXACTLY:

**STAGE 1 - Content Analysis:**
[Objective description of what the content is about]

**STAGE 2 - Strategic Analysis:**

**Score:** [number]/10

**Content Type:** [category]

**Strategic Insights:**
1. [First insight]
2. [Second insight]
3. [Third insight - optional but encouraged]",
        content_block = content_block(item, subtitles),
    )
}

/// Two-stage niche deep-dive prompt. Same structure; categorizes into the
/// fixed niche vocabulary instead of the content-type list.
#[must_use]
pub fn niche_deepdive_prompt(item: &ContentItem, subtitles: &str) -> String {
    let categories = NICHE_CATEGORIES
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "AIBRARY CONTEXT: AIbrary (aibrary.ai) is an AI-powered learning platform that transforms \
books into personalized podcasts and interactive learning experiences. This content comes from \
an adjacent niche AIbrary studies for content strategy.

Analyze this TikTok content using a two-stage approach:

{content_block}

STAGE 1 - OBJECTIVE CONTENT ANALYSIS:
Describe the topic, message, and format without considering who created it.

STAGE 2 - NICHE STRATEGY ANALYSIS:

Strategic Score (0-10): How useful are this content's strategies (hooks, format, engagement \
tactics) for AIbrary's own TikTok content? Be critical; most content scores 4-7.

Niche Category: Choose ONE that best fits:
{categories}

Strategic Insights: Provide EXACTLY 2-3 numbered insights on content strategies AIbrary could \
adapt from this niche. Each insight should cover a DIFFERENT aspect.

FORMAT YOUR RESPONSE EXACTLY:

**STAGE 1 - Content Analysis:**
[Objective description of what the content is about]

**STAGE 2 - Strategic Analysis:**

**Score:** [number]/10

**Niche Category:** [category]

**Strategic Insights:**
1. [First insight]
2. [Second insight]
3. [Third insight - optional but encouraged]",
        content_block = content_block(item, subtitles),
    )
}

/// Preamble prepended when video bytes accompany the prompt.
#[must_use]
pub fn video_context_preamble(strategy: MonitoringStrategy) -> &'static str {
    match strategy {
        MonitoringStrategy::NicheDeepDive => {
            "You are analyzing a TikTok VIDEO (visual + audio content).

Pay attention to:
- Visual presentation and editing style
- On-screen text and graphics
- Content strategy techniques (hooks, format, engagement tactics)
- Trending topics and themes in this niche space

"
        }
        _ => {
            "You are analyzing a TikTok VIDEO (visual + audio content).

Pay attention to:
- Visual presentation and editing style
- On-screen text and graphics
- Speaker delivery and energy
- Production quality and professionalism
- Visual storytelling techniques

"
        }
    }
}

fn content_block(item: &ContentItem, subtitles: &str) -> String {
    let author = if item.author_username.is_empty() {
        "Unknown"
    } else {
        &item.author_username
    };
    let caption = if item.caption.is_empty() {
        "No caption provided"
    } else {
        &item.caption
    };
    let subtitles = if subtitles.is_empty() {
        "No subtitles available"
    } else {
        subtitles
    };

    format!(
        "CONTENT:
Creator: {author}
Caption: {caption}
Subtitles: {subtitles}
Performance: {} likes, {} comments, {} views",
        item.likes, item.comments, item.views,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttmon_core::AnalysisPayload;

    fn item() -> ContentItem {
        ContentItem {
            content_id: "1".to_string(),
            target_value: "@blinkist".to_string(),
            video_url: String::new(),
            author_username: "blinkist".to_string(),
            caption: "5 books that changed my life".to_string(),
            likes: 1200,
            comments: 45,
            views: 90_000,
            engagement_rate: 0.0,
            discovered_at: None,
            video_download_url: None,
            subtitle_url: None,
            monitoring_strategy: None,
            analysis: AnalysisPayload::default(),
        }
    }

    #[test]
    fn competitor_prompt_embeds_content_fields() {
        let prompt = competitor_intelligence_prompt(&item(), "so today we cover");
        assert!(prompt.contains("Creator: blinkist"));
        assert!(prompt.contains("5 books that changed my life"));
        assert!(prompt.contains("so today we cover"));
        assert!(prompt.contains("1200 likes, 45 comments, 90000 views"));
        assert!(prompt.contains("**Content Type:**"));
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let mut i = item();
        i.author_username = String::new();
        i.caption = String::new();
        let prompt = competitor_intelligence_prompt(&i, "");
        assert!(prompt.contains("Creator: Unknown"));
        assert!(prompt.contains("No caption provided"));
        assert!(prompt.contains("No subtitles available"));
    }

    #[test]
    fn niche_prompt_lists_all_categories() {
        let prompt = niche_deepdive_prompt(&item(), "");
        for category in NICHE_CATEGORIES {
            assert!(prompt.contains(category), "missing category {category}");
        }
        assert!(prompt.contains("**Niche Category:**"));
    }
}
