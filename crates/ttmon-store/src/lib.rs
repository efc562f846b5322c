//! Lark Base (Bitable) persistence for the monitoring pipeline.
//!
//! [`LarkClient`] reads monitoring targets and filter rules, checks content
//! existence by id, and creates or updates content rows with engagement
//! stats and analysis payloads.

pub mod client;
pub mod decode;
pub mod error;
pub mod types;

pub use client::{
    LarkClient, FILTER_RULES_TABLE, MONITORING_TARGETS_TABLE, TIKTOK_CONTENT_TABLE,
};
pub use error::StoreError;
