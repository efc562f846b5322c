//! Core data model and configuration for the TTMON monitoring pipeline.
//!
//! Everything downstream (filtering, analysis, scraping, storage) speaks the
//! types in this crate: [`MonitoringTarget`], [`ContentItem`], [`FilterRule`],
//! and [`AnalysisResult`]. Configuration is loaded from environment variables
//! via [`load_app_config`].

pub mod app_config;
pub mod config;
pub mod models;
pub mod strategy;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use models::{
    AnalysisPayload, AnalysisResult, ContentItem, CoreError, FilterRule, MonitoringTarget,
    TargetKind,
};
pub use strategy::MonitoringStrategy;
