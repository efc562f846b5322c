//! The full monitoring run: scrape, filter, analyze, persist.
//!
//! Per-target failures are logged and skipped rather than propagated so a
//! single bad target does not abort the whole run.

use ttmon_analysis::{analyze_batch, AnalysisGate, Analyzer, GeminiClient, MediaFetcher};
use ttmon_core::AppConfig;
use ttmon_filter::{build_rule_index, filter_content};
use ttmon_scraper::{ApifyClient, Scraper, ScraperError};
use ttmon_store::LarkClient;

/// Store calls are short record reads/writes, unlike the minutes-long
/// synchronous scrape.
pub(crate) const STORE_TIMEOUT_SECS: u64 = 30;

/// Upper bound for one model call; video analysis routinely takes over a
/// minute per item.
pub(crate) const ANALYSIS_TIMEOUT_SECS: u64 = 300;

pub(crate) async fn run_pipeline(config: &AppConfig) -> anyhow::Result<()> {
    let store = LarkClient::new(
        &config.lark_app_id,
        &config.lark_app_secret,
        &config.lark_base_id,
        STORE_TIMEOUT_SECS,
    )?;

    let targets = store.get_active_targets().await?;
    if targets.is_empty() {
        tracing::warn!("no active monitoring targets, nothing to do");
        return Ok(());
    }

    let rules = store.get_filter_rules().await?;
    let index = build_rule_index(rules);

    let apify = ApifyClient::new(&config.apify_token, config.scrape_timeout_secs)?;
    let scraper = Scraper::new(apify, &config.tiktok_actor_id);

    let model = GeminiClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
        ANALYSIS_TIMEOUT_SECS,
    )?;
    let analyzer = Analyzer::new(model, MediaFetcher::new(config.media_timeout_secs)?);
    let gate = AnalysisGate {
        min_engagement_rate: config.analysis_min_engagement_rate,
        min_views: config.analysis_min_views,
    };

    let mut total_scraped = 0usize;
    let mut total_filtered_out = 0usize;
    let mut total_analyzed = 0usize;
    let mut total_saved = 0usize;

    for target in &targets {
        let items = match scraper.scrape_target(target).await {
            Ok(items) => items,
            Err(ScraperError::UnsupportedTarget { kind }) => {
                tracing::warn!(
                    target = %target.target_value,
                    %kind,
                    "target kind not supported yet, skipping"
                );
                continue;
            }
            Err(e) => {
                tracing::warn!(target = %target.target_value, error = %e, "scrape failed, skipping target");
                continue;
            }
        };

        let (mut kept, metrics) = filter_content(items, target, &index);
        total_scraped += metrics.total_scraped;
        total_filtered_out += metrics.filtered_out;
        if kept.is_empty() {
            continue;
        }

        let (_, report) = analyze_batch(&analyzer, &mut kept, &gate).await;
        report.log_summary();
        total_analyzed += report.total_analyzed();

        match store.save_content(&mut kept, Some(&target.record_id)).await {
            Ok(saved) => total_saved += saved,
            Err(e) => {
                tracing::warn!(target = %target.target_value, error = %e, "failed to persist batch");
            }
        }
    }

    tracing::info!(
        targets = targets.len(),
        scraped = total_scraped,
        filtered_out = total_filtered_out,
        analyzed = total_analyzed,
        saved = total_saved,
        "monitoring run complete"
    );
    Ok(())
}
