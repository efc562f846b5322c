//! HTTP client for the Lark Base (Bitable) API.
//!
//! Wraps `reqwest` with tenant-token acquisition and caching, table-id
//! lookup by display name, and typed decoding of the three tables the
//! pipeline uses. Every response is checked for the `{code, msg, data}`
//! envelope; `code != 0` surfaces as [`StoreError::Api`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use ttmon_core::{ContentItem, FilterRule, MonitoringTarget, TargetKind};

use crate::decode::{
    bool_field, f64_field, i64_field, link_field, select_field, text_field, u64_field,
};
use crate::error::StoreError;
use crate::types::{ApiEnvelope, RecordsData, TablesData, TokenResponse};

const DEFAULT_BASE_URL: &str = "https://open.larksuite.com/";

/// Table display names in the monitoring base.
pub const MONITORING_TARGETS_TABLE: &str = "Monitoring_Targets";
pub const TIKTOK_CONTENT_TABLE: &str = "TikTok_Content";
pub const FILTER_RULES_TABLE: &str = "Filter_Rules";

/// Tokens are refreshed this many seconds before their stated expiry.
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Client for one Bitable base.
///
/// Use [`LarkClient::new`] for production or [`LarkClient::with_base_url`]
/// to point at a mock server in tests.
pub struct LarkClient {
    client: Client,
    app_id: String,
    app_secret: String,
    base_id: String,
    base_url: Url,
    token: Mutex<Option<CachedToken>>,
    table_ids: Mutex<HashMap<String, String>>,
}

impl LarkClient {
    /// Creates a client pointed at the production Lark API.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        app_id: &str,
        app_secret: &str,
        base_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        Self::with_base_url(app_id, app_secret, base_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        app_id: &str,
        app_secret: &str,
        base_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ttmon/0.1 (tiktok-monitoring)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| StoreError::InvalidUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            app_id: app_id.to_owned(),
            app_secret: app_secret.to_owned(),
            base_id: base_id.to_owned(),
            base_url,
            token: Mutex::new(None),
            table_ids: Mutex::new(HashMap::new()),
        })
    }

    /// Active monitoring targets. Inactive records are dropped; records with
    /// an unknown `target_type` are skipped with a warning so one bad row
    /// never blocks the run.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or table-lookup error.
    pub async fn get_active_targets(&self) -> Result<Vec<MonitoringTarget>, StoreError> {
        let records = self.list_records(MONITORING_TARGETS_TABLE).await?;
        let mut targets = Vec::new();

        for record in records.items {
            let fields = &record.fields;
            if !bool_field(fields, "active") {
                continue;
            }

            let raw_kind = text_field(fields, "target_type").unwrap_or_default();
            let kind = match TargetKind::parse(&raw_kind) {
                Ok(kind) => kind,
                Err(e) => {
                    tracing::warn!(record_id = %record.record_id, error = %e, "skipping target");
                    continue;
                }
            };

            let results_limit = u64_field(fields, "results_limit")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(10);
            targets.push(MonitoringTarget {
                record_id: record.record_id,
                target_value: text_field(fields, "target_value").unwrap_or_default(),
                kind,
                active: true,
                results_limit,
                monitoring_strategy: select_field(fields, "monitoring_strategy"),
            });
        }

        tracing::info!(targets = targets.len(), "loaded active monitoring targets");
        Ok(targets)
    }

    /// All filter rules, active and inactive. The rule index builder decides
    /// what to keep.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or table-lookup error.
    pub async fn get_filter_rules(&self) -> Result<Vec<FilterRule>, StoreError> {
        let records = self.list_records(FILTER_RULES_TABLE).await?;
        let mut rules = Vec::new();

        for record in records.items {
            let fields = &record.fields;
            let Some(strategy) = select_field(fields, "monitoring_strategy") else {
                tracing::warn!(record_id = %record.record_id, "rule without strategy, skipping");
                continue;
            };

            rules.push(FilterRule {
                monitoring_strategy: strategy,
                target_kind: select_field(fields, "target_type"),
                target_value: text_field(fields, "target_value"),
                min_likes: u64_field(fields, "min_likes"),
                min_views: u64_field(fields, "min_views"),
                min_engagement_rate: f64_field(fields, "min_engagement_rate"),
                max_age_days: i64_field(fields, "max_age_days"),
                active: bool_field(fields, "active"),
            });
        }

        tracing::info!(rules = rules.len(), "loaded filter rules");
        Ok(rules)
    }

    /// Record id of the content row with this `content_id`, if one exists.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or table-lookup error.
    pub async fn content_record_id(&self, content_id: &str) -> Result<Option<String>, StoreError> {
        let records = self.list_records(TIKTOK_CONTENT_TABLE).await?;
        Ok(records
            .items
            .into_iter()
            .find(|r| text_field(&r.fields, "content_id").as_deref() == Some(content_id))
            .map(|r| r.record_id))
    }

    /// Stored content rows, decoded for analysis-only runs. Rows without a
    /// `content_id` are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or table-lookup error.
    pub async fn get_content_items(&self) -> Result<Vec<(String, ContentItem)>, StoreError> {
        let records = self.list_records(TIKTOK_CONTENT_TABLE).await?;
        let mut items = Vec::new();

        for record in records.items {
            let fields = &record.fields;
            let Some(content_id) = text_field(fields, "content_id") else {
                tracing::warn!(record_id = %record.record_id, "content row without id, skipping");
                continue;
            };

            let analysis_text = text_field(fields, "Analysis");
            let mut item = ContentItem {
                content_id,
                target_value: text_field(fields, "target_value").unwrap_or_default(),
                video_url: link_field(fields, "video_url").unwrap_or_default(),
                author_username: text_field(fields, "author_username").unwrap_or_default(),
                caption: text_field(fields, "caption").unwrap_or_default(),
                likes: u64_field(fields, "likes").unwrap_or(0),
                comments: u64_field(fields, "comments").unwrap_or(0),
                views: u64_field(fields, "views").unwrap_or(0),
                engagement_rate: f64_field(fields, "engagement_rate").unwrap_or(0.0),
                discovered_at: None,
                video_download_url: link_field(fields, "video_downlaod_url"),
                subtitle_url: link_field(fields, "subtitle_url"),
                monitoring_strategy: select_field(fields, "monitoring_strategy"),
                analysis: ttmon_core::AnalysisPayload::default(),
            };
            item.analysis.analyzed = analysis_text.is_some();
            item.analysis.general_analysis = analysis_text;
            items.push((record.record_id, item));
        }

        Ok(items)
    }

    /// Save a batch: update rows that already exist, create the rest. Returns
    /// the number of items persisted; per-item failures are logged and
    /// counted out rather than aborting the batch.
    ///
    /// # Errors
    ///
    /// Only batch-level failures (table lookup); per-item save errors are
    /// downgraded to warnings.
    pub async fn save_content(
        &self,
        items: &mut [ContentItem],
        target_record_id: Option<&str>,
    ) -> Result<usize, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }
        let table_id = self.table_id(TIKTOK_CONTENT_TABLE).await?;
        let mut saved = 0usize;

        for item in items.iter_mut() {
            let outcome = match self.content_record_id(&item.content_id).await? {
                Some(record_id) => self.update_content(&record_id, item).await,
                None => self.create_content(&table_id, item, target_record_id).await,
            };
            match outcome {
                Ok(()) => saved += 1,
                Err(e) => {
                    tracing::warn!(content_id = %item.content_id, error = %e, "failed to save content");
                }
            }
        }

        tracing::info!(saved, total = items.len(), "content batch persisted");
        Ok(saved)
    }

    /// Update an existing row with the item's analysis fields only. A row
    /// with nothing to write is left untouched.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or table-lookup error.
    pub async fn update_content(
        &self,
        record_id: &str,
        item: &ContentItem,
    ) -> Result<(), StoreError> {
        let fields = analysis_fields(item);
        if fields.is_empty() {
            tracing::debug!(content_id = %item.content_id, "no analysis fields to update");
            return Ok(());
        }

        let table_id = self.table_id(TIKTOK_CONTENT_TABLE).await?;
        let path = format!(
            "open-apis/bitable/v1/apps/{}/tables/{table_id}/records/{record_id}",
            self.base_id
        );
        let body = json!({ "fields": Value::Object(fields) });
        let _: Value = self
            .request(Method::PUT, &path, Some(&body), "update content record")
            .await?;
        Ok(())
    }

    async fn create_content(
        &self,
        table_id: &str,
        item: &mut ContentItem,
        target_record_id: Option<&str>,
    ) -> Result<(), StoreError> {
        let rate = round2(item.engagement_rate());

        let mut fields = serde_json::Map::new();
        fields.insert("content_id".into(), json!(item.content_id));
        let links: Vec<&str> = target_record_id.into_iter().collect();
        fields.insert("Target".into(), json!(links));
        fields.insert("video_url".into(), json!({ "link": item.video_url }));
        fields.insert("author_username".into(), json!(item.author_username));
        fields.insert("caption".into(), json!(item.caption));
        fields.insert("likes".into(), json!(item.likes));
        fields.insert("comments".into(), json!(item.comments));
        fields.insert("views".into(), json!(item.views));
        fields.insert("engagement_rate".into(), json!(rate));
        fields.insert(
            "Analysis".into(),
            json!(item.analysis.general_analysis.as_deref().unwrap_or("")),
        );
        for (name, value) in analysis_fields(item) {
            fields.insert(name, value);
        }
        if let Some(url) = item.video_download_url.as_deref().filter(|u| !u.is_empty()) {
            // The URL column in the base is named with this typo; keep it.
            fields.insert("video_downlaod_url".into(), json!({ "link": url }));
        }
        if let Some(url) = item.subtitle_url.as_deref().filter(|u| !u.is_empty()) {
            fields.insert("subtitle_url".into(), json!({ "link": url }));
        }

        let path = format!(
            "open-apis/bitable/v1/apps/{}/tables/{table_id}/records",
            self.base_id
        );
        let body = json!({ "fields": Value::Object(fields) });
        let _: Value = self
            .request(Method::POST, &path, Some(&body), "create content record")
            .await?;
        Ok(())
    }

    async fn list_records(&self, table_name: &str) -> Result<RecordsData, StoreError> {
        let table_id = self.table_id(table_name).await?;
        let path = format!(
            "open-apis/bitable/v1/apps/{}/tables/{table_id}/records",
            self.base_id
        );
        self.request(
            Method::GET,
            &path,
            None,
            &format!("records of {table_name}"),
        )
        .await
    }

    /// Table id for a display name, cached after the first lookup.
    async fn table_id(&self, table_name: &str) -> Result<String, StoreError> {
        if let Some(id) = self
            .table_ids
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(table_name)
        {
            return Ok(id.clone());
        }

        let path = format!("open-apis/bitable/v1/apps/{}/tables", self.base_id);
        let tables: TablesData = self.request(Method::GET, &path, None, "table list").await?;

        let mut cache = self
            .table_ids
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for table in &tables.items {
            cache.insert(table.name.clone(), table.table_id.clone());
        }
        cache
            .get(table_name)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound {
                name: table_name.to_owned(),
            })
    }

    /// Current tenant access token, refreshed when missing or near expiry.
    async fn access_token(&self) -> Result<String, StoreError> {
        {
            let cached = self
                .token
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(token) = cached.as_ref() {
                if Instant::now() < token.expires_at {
                    return Ok(token.value.clone());
                }
            }
        }

        let url = self
            .join("open-apis/auth/v3/tenant_access_token/internal")?;
        let response = self
            .client
            .post(url.clone())
            .json(&json!({ "app_id": self.app_id, "app_secret": self.app_secret }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
                context: "tenant access token".to_string(),
                source: e,
            })?;
        if parsed.code != 0 {
            return Err(StoreError::Api {
                code: parsed.code,
                message: parsed.msg,
            });
        }
        let value = parsed.tenant_access_token.ok_or(StoreError::Api {
            code: 0,
            message: "token response without tenant_access_token".to_string(),
        })?;

        let lifetime = parsed
            .expire
            .unwrap_or(TOKEN_EXPIRY_MARGIN_SECS)
            .saturating_sub(TOKEN_EXPIRY_MARGIN_SECS);
        let mut cached = self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *cached = Some(CachedToken {
            value: value.clone(),
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        });
        Ok(value)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        context: &str,
    ) -> Result<T, StoreError> {
        let token = self.access_token().await?;
        let url = self.join(path)?;

        let mut request = self.client.request(method, url.clone()).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&text).map_err(|e| StoreError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        if envelope.code != 0 {
            return Err(StoreError::Api {
                code: envelope.code,
                message: envelope.msg,
            });
        }
        envelope.data.ok_or_else(|| StoreError::Api {
            code: 0,
            message: format!("missing data in response for {context}"),
        })
    }

    fn join(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url.join(path).map_err(|e| StoreError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })
    }
}

/// The analysis payload as Bitable fields, present values only.
fn analysis_fields(item: &ContentItem) -> serde_json::Map<String, Value> {
    let mut fields = serde_json::Map::new();
    let analysis = &item.analysis;

    if let Some(text) = analysis.general_analysis.as_deref().filter(|s| !s.is_empty()) {
        fields.insert("Analysis".into(), json!(text));
    }
    if let Some(score) = analysis.score {
        fields.insert("strategic_score".into(), json!(f64::from(score)));
    }
    if let Some(content_type) = analysis.content_type.as_deref().filter(|s| !s.is_empty()) {
        fields.insert("content_type".into(), json!(content_type));
    }
    if let Some(insights) = analysis.insights.as_deref().filter(|s| !s.is_empty()) {
        fields.insert("strategic_insights".into(), json!(insights));
    }
    if let Some(niche) = analysis.niche_category.as_deref().filter(|s| !s.is_empty()) {
        fields.insert("niche_category".into(), json!(niche));
    }
    fields
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
