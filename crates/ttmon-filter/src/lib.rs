//! Quality filtering for scraped content.
//!
//! Operator-authored [`FilterRule`]s are compiled into a hierarchical index
//! keyed by (strategy, target kind, target value) with explicit wildcards.
//! Matching tries the most specific key first; threshold evaluation uses OR
//! semantics: content passes when ANY configured threshold is met. Both
//! layers fail open: no rule, or a rule without thresholds, passes content
//! through unfiltered.
//!
//! [`FilterRule`]: ttmon_core::FilterRule

pub mod index;
pub mod pipeline;
pub mod thresholds;

pub use index::{build_rule_index, find_matching_rule, KeyPart, RuleIndex, RuleKey};
pub use pipeline::{filter_content, FilterMetrics};
pub use thresholds::passes_thresholds;
