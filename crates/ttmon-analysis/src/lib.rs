//! Strategy-routed AI analysis of filtered content.
//!
//! Each content item carries a monitoring-strategy label that selects a
//! prompt template and a response parser. The router dispatches on the
//! closed strategy set (unknown or unassigned labels become documented
//! skips, never errors), optionally enriches the request with downloaded
//! video bytes and subtitle text, calls the model behind the
//! [`AnalysisModel`] trait, and recovers a structurally complete
//! [`AnalysisResult`] from the free-text response; every field has a
//! default, so malformed responses degrade instead of failing.
//!
//! [`AnalysisResult`]: ttmon_core::AnalysisResult

pub mod error;
pub mod gemini;
pub mod media;
pub mod model;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod router;

pub use error::AnalysisError;
pub use gemini::GeminiClient;
pub use media::MediaFetcher;
pub use model::AnalysisModel;
pub use orchestrator::{analyze_batch, AnalysisGate, BatchReport, StrategyTally};
pub use parser::{parse_competitor_response, parse_niche_response, NICHE_CATEGORIES};
pub use router::{Analyzer, RouteOutcome, SkipReason};
