//! Application configuration shape.

#[derive(Clone)]
pub struct AppConfig {
    pub lark_app_id: String,
    pub lark_app_secret: String,
    pub lark_base_id: String,
    pub apify_token: String,
    /// Apify actor id of the TikTok scraper.
    pub tiktok_actor_id: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Timeout for synchronous scrape runs (the actor call blocks until the
    /// dataset is ready).
    pub scrape_timeout_secs: u64,
    /// Timeout for video/subtitle downloads.
    pub media_timeout_secs: u64,
    /// Cost-control gate: analyze only when engagement rate or views clear
    /// these minimums.
    pub analysis_min_engagement_rate: f64,
    pub analysis_min_views: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("lark_app_id", &self.lark_app_id)
            .field("lark_app_secret", &"[redacted]")
            .field("lark_base_id", &self.lark_base_id)
            .field("apify_token", &"[redacted]")
            .field("tiktok_actor_id", &self.tiktok_actor_id)
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("scrape_timeout_secs", &self.scrape_timeout_secs)
            .field("media_timeout_secs", &self.media_timeout_secs)
            .field(
                "analysis_min_engagement_rate",
                &self.analysis_min_engagement_rate,
            )
            .field("analysis_min_views", &self.analysis_min_views)
            .finish()
    }
}
