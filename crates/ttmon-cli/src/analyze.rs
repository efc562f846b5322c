//! Analysis-only run over content already in the store.
//!
//! Useful after prompt changes: clear the analysis columns and re-run
//! without scraping anything.

use ttmon_analysis::{analyze_batch, AnalysisGate, Analyzer, GeminiClient, MediaFetcher};
use ttmon_core::AppConfig;
use ttmon_store::LarkClient;

use crate::run::{ANALYSIS_TIMEOUT_SECS, STORE_TIMEOUT_SECS};

pub(crate) async fn run_analyze(config: &AppConfig) -> anyhow::Result<()> {
    let store = LarkClient::new(
        &config.lark_app_id,
        &config.lark_app_secret,
        &config.lark_base_id,
        STORE_TIMEOUT_SECS,
    )?;

    let records = store.get_content_items().await?;
    let total = records.len();
    let pending: Vec<_> = records
        .into_iter()
        .filter(|(_, item)| !item.analysis.analyzed)
        .collect();

    tracing::info!(total, pending = pending.len(), "loaded stored content");
    if pending.is_empty() {
        tracing::info!("all content already analyzed");
        return Ok(());
    }

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

    let (record_ids, mut items): (Vec<String>, Vec<_>) = pending.into_iter().unzip();
    let (_, report) = analyze_batch(&analyzer, &mut items, &gate).await;
    report.log_summary();

    let mut updated = 0usize;
    for (record_id, item) in record_ids.iter().zip(&items) {
        if !item.analysis.analyzed {
            continue;
        }
        match store.update_content(record_id, item).await {
            Ok(()) => updated += 1,
            Err(e) => {
                tracing::warn!(content_id = %item.content_id, error = %e, "failed to update record");
            }
        }
    }

    tracing::info!(updated, "analysis-only run complete");
    Ok(())
}
