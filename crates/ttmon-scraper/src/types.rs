//! Apify TikTok actor dataset item types.
//!
//! ## Observed shape from live actor runs
//!
//! ### Content id
//! `id` is the post id as a **string**. Some runs populate `videoId` instead,
//! and older items carry neither; the id is then recoverable from the
//! `/video/<digits>` segment of `webVideoUrl`. All three are modeled as
//! optional; normalization tries them in that order.
//!
//! ### Engagement counts
//! `diggCount` / `commentCount` / `playCount` are plain JSON numbers on most
//! items, but the actor occasionally passes through TikTok's display strings
//! (`"1.2K"`, `"3.4M"`, `"1,234"`). [`CountField`] accepts both; suffix
//! parsing happens in normalization.
//!
//! ### Media
//! `mediaUrls` holds the watermark-free downloads requested via
//! `shouldDownloadVideos`; the first entry is the video itself. Subtitles
//! arrive under `videoMeta.subtitleLinks` as `{language, downloadLink}`
//! pairs; language codes observed include `"eng"`, `"en"`, and regional
//! variants like `"en-US"`.
//!
//! ### Slideshows
//! Photo carousels come back with `isSlideshow: true` and no usable video.
//! They are dropped during normalization.

use serde::{Deserialize, Serialize};

/// One dataset item from the TikTok actor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApifyItem {
    /// Post id as a string. May be absent; see module docs.
    #[serde(default)]
    pub id: Option<String>,

    /// Alternate id field populated by some actor versions.
    #[serde(default)]
    pub video_id: Option<String>,

    /// Public share URL of the post.
    #[serde(default)]
    pub web_video_url: Option<String>,

    /// Post caption. Can run to thousands of characters; truncated to 500
    /// during normalization.
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub author_meta: Option<AuthorMeta>,

    #[serde(default)]
    pub video_meta: Option<VideoMeta>,

    /// Watermark-free download URLs; first entry is the video.
    #[serde(default)]
    pub media_urls: Vec<String>,

    #[serde(default)]
    pub digg_count: CountField,

    #[serde(default)]
    pub comment_count: CountField,

    #[serde(default)]
    pub play_count: CountField,

    /// `true` for photo carousels, which carry no video.
    #[serde(default)]
    pub is_slideshow: bool,
}

/// Author block on a dataset item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorMeta {
    /// Handle, sometimes with a leading `@`.
    #[serde(default)]
    pub name: Option<String>,
}

/// Video metadata block on a dataset item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMeta {
    #[serde(default)]
    pub subtitle_links: Vec<SubtitleLink>,
}

/// One downloadable subtitle track.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleLink {
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub download_link: Option<String>,
}

/// An engagement counter that may arrive as a number or a display string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CountField {
    Number(u64),
    Text(String),
}

impl Default for CountField {
    fn default() -> Self {
        CountField::Number(0)
    }
}

/// Run input for the TikTok actor's synchronous endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    pub profiles: Vec<String>,
    pub results_per_page: u32,
    /// Only the videos section; skips the profile's reposts and likes tabs.
    pub profile_scrape_sections: Vec<String>,
    pub should_download_videos: bool,
    pub should_download_covers: bool,
    pub should_download_subtitles: bool,
    /// Off: photo carousels are useless for video analysis.
    pub should_download_slideshow_images: bool,
    pub proxy_configuration: ProxyConfiguration,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfiguration {
    pub use_apify_proxy: bool,
}

impl RunInput {
    /// Run input for scraping one profile's videos tab. The handle is
    /// normalized to exactly one leading `@`.
    #[must_use]
    pub fn profile(handle: &str, results_limit: u32) -> Self {
        let username = handle.trim().trim_start_matches('@');
        Self {
            profiles: vec![format!("@{username}")],
            results_per_page: results_limit,
            profile_scrape_sections: vec!["videos".to_string()],
            should_download_videos: true,
            should_download_covers: true,
            should_download_subtitles: true,
            should_download_slideshow_images: false,
            proxy_configuration: ProxyConfiguration {
                use_apify_proxy: true,
            },
        }
    }
}
