//! Win counts per option text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cumulative win counts keyed by option text.
///
/// Independent of the option list: entries outlive removal of the option
/// they count. Serializes as a flat `{ "text": count }` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsLog {
    counts: BTreeMap<String, u32>,
}

impl StatisticsLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more win for `text`. Returns the new count.
    pub fn record(&mut self, text: &str) -> u32 {
        let count = self.counts.entry(text.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Wins recorded for `text` (exact match).
    pub fn count(&self, text: &str) -> u32 {
        self.counts.get(text).copied().unwrap_or(0)
    }

    /// Total wins across all options.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }

    /// Entries sorted by count descending, ties by text ascending.
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Number of distinct winners.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no spin has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Forget every count.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_creates_and_increments() {
        let mut log = StatisticsLog::new();
        assert_eq!(log.record("A"), 1);
        assert_eq!(log.record("A"), 2);
        assert_eq!(log.count("A"), 2);
        assert_eq!(log.count("missing"), 0);
    }

    #[test]
    fn increments_are_additive_and_independent() {
        let mut log = StatisticsLog::new();
        log.record("B");
        log.record("B");
        for _ in 0..7 {
            log.record("A");
        }
        assert_eq!(log.count("A"), 7);
        assert_eq!(log.count("B"), 2);
        assert_eq!(log.total(), 9);
    }

    #[test]
    fn sorted_by_count_then_text() {
        let mut log = StatisticsLog::new();
        log.record("c");
        log.record("b");
        log.record("a");
        log.record("a");
        assert_eq!(log.sorted(), vec![("a", 2), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn flat_json_shape() {
        let mut log = StatisticsLog::new();
        log.record("Pizza");
        log.record("Pizza");
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"{"Pizza":2}"#);
        let back: StatisticsLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn clear_empties() {
        let mut log = StatisticsLog::new();
        log.record("x");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
