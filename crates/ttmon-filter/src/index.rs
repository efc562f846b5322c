//! Hierarchical rule index and matcher.

use std::collections::HashMap;

use ttmon_core::{ContentItem, FilterRule, MonitoringTarget, TargetKind};

/// One part of a rule key. A dedicated wildcard variant (rather than an
/// empty string) keeps "not narrowed" distinct from any stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Wildcard,
    Value(String),
}

impl KeyPart {
    /// Normalize an optional field from a rule: absent or empty means
    /// wildcard.
    #[must_use]
    pub fn from_field(field: Option<&str>) -> Self {
        match field {
            Some(s) if !s.trim().is_empty() => KeyPart::Value(s.trim().to_string()),
            _ => KeyPart::Wildcard,
        }
    }

    /// Normalize a rule's target-kind field. The kind column is a select
    /// whose options may be capitalized ("Profile"); the matcher looks up
    /// the canonical lowercase [`TargetKind::as_str`] form, so the index
    /// must store the same. An unrecognized kind keeps its trimmed
    /// lowercase form and never matches anything.
    #[must_use]
    pub fn from_kind_field(field: Option<&str>) -> Self {
        match field {
            Some(s) if !s.trim().is_empty() => match TargetKind::parse(s) {
                Ok(kind) => KeyPart::value(kind.as_str()),
                Err(_) => KeyPart::Value(s.trim().to_lowercase()),
            },
            _ => KeyPart::Wildcard,
        }
    }

    #[must_use]
    pub fn value(s: &str) -> Self {
        KeyPart::Value(s.to_string())
    }
}

/// Composite lookup key: (strategy, target kind or wildcard, target value or
/// wildcard). Strategy is always exact; a rule cannot apply across
/// strategies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub strategy: String,
    pub kind: KeyPart,
    pub value: KeyPart,
}

pub type RuleIndex = HashMap<RuleKey, FilterRule>;

/// Compile a flat list of filter rules into the hierarchical index.
///
/// Inactive rules are ignored. Rules with identical (strategy, kind, value)
/// triples collapse to the last one inserted; the overwrite is logged at
/// debug level but is not an error; the latest load reflects the source of
/// truth.
#[must_use]
pub fn build_rule_index(rules: Vec<FilterRule>) -> RuleIndex {
    let mut index = RuleIndex::new();

    for rule in rules {
        if !rule.active {
            continue;
        }
        let key = RuleKey {
            strategy: rule.monitoring_strategy.clone(),
            kind: KeyPart::from_kind_field(rule.target_kind.as_deref()),
            value: KeyPart::from_field(rule.target_value.as_deref()),
        };
        if index.contains_key(&key) {
            tracing::debug!(strategy = %rule.monitoring_strategy, "duplicate rule key, last one wins");
        }
        index.insert(key, rule);
    }

    index
}

/// Find the single most specific rule matching this content and its owning
/// target.
///
/// Tries three keys in strict specificity order, returning on first hit:
/// 1. (strategy, kind, value): exact target match
/// 2. (strategy, kind, wildcard): kind-level match
/// 3. (strategy, wildcard, wildcard): strategy-level match
///
/// A target with no strategy label cannot be filtered; returns `None`.
#[must_use]
pub fn find_matching_rule<'a>(
    content: &ContentItem,
    target: &MonitoringTarget,
    index: &'a RuleIndex,
) -> Option<&'a FilterRule> {
    let strategy = match target.monitoring_strategy.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return None,
    };

    let kind = target.kind.as_str();

    let levels = [
        (KeyPart::value(kind), KeyPart::value(&content.target_value)),
        (KeyPart::value(kind), KeyPart::Wildcard),
        (KeyPart::Wildcard, KeyPart::Wildcard),
    ];

    for (kind, value) in levels {
        let key = RuleKey {
            strategy: strategy.to_string(),
            kind,
            value,
        };
        if let Some(rule) = index.get(&key) {
            return Some(rule);
        }
    }

    None
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
