//! Monitoring strategy labels.
//!
//! Targets (and, via lookup, content items) are tagged with one of a closed
//! set of strategies. The label strings are operator-facing and come from the
//! store verbatim; parsing into the enum happens at the routing boundary so
//! that an unrecognized label is a skip, never an error.

/// A named analysis objective. Selects both the filter-rule scope and the
/// analysis prompt/parser variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitoringStrategy {
    CompetitorIntelligence,
    TrendDiscovery,
    NicheDeepDive,
}

impl MonitoringStrategy {
    /// All known strategies, in display order.
    pub const ALL: [MonitoringStrategy; 3] = [
        MonitoringStrategy::CompetitorIntelligence,
        MonitoringStrategy::TrendDiscovery,
        MonitoringStrategy::NicheDeepDive,
    ];

    /// The canonical operator-facing label for this strategy.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MonitoringStrategy::CompetitorIntelligence => "Competitor Intelligence",
            MonitoringStrategy::TrendDiscovery => "Trend Discovery",
            MonitoringStrategy::NicheDeepDive => "Niche Deep-Dive",
        }
    }

    /// Parse an operator-facing label. Returns `None` for anything outside
    /// the known set; callers decide whether that is a skip or an error.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Competitor Intelligence" => Some(MonitoringStrategy::CompetitorIntelligence),
            "Trend Discovery" => Some(MonitoringStrategy::TrendDiscovery),
            "Niche Deep-Dive" => Some(MonitoringStrategy::NicheDeepDive),
            _ => None,
        }
    }
}

impl std::fmt::Display for MonitoringStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_labels() {
        for strategy in MonitoringStrategy::ALL {
            assert_eq!(
                MonitoringStrategy::parse_label(strategy.label()),
                Some(strategy)
            );
        }
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(
            MonitoringStrategy::parse_label("  Competitor Intelligence "),
            Some(MonitoringStrategy::CompetitorIntelligence)
        );
    }

    #[test]
    fn parse_unknown_label_is_none() {
        assert_eq!(MonitoringStrategy::parse_label("Brand Safety"), None);
        assert_eq!(MonitoringStrategy::parse_label(""), None);
    }
}
