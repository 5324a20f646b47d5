use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for one search orchestrator. Every field may change at runtime through
/// `SearchOrchestrator::set_config` without losing cached results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Queries with fewer chars than this are never searched.
    pub min_length: usize,
    /// Debounce window applied after throttling.
    pub delay_ms: u64,
    /// Minimum spacing between dispatched searches.
    pub throttle_ms: u64,
    pub use_cache: bool,
    pub prompt_text: String,
    pub search_text: String,
    pub empty_label: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_length: 2,
            delay_ms: 200,
            throttle_ms: 0,
            use_cache: true,
            prompt_text: "Type to search...".to_string(),
            search_text: "Searching...".to_string(),
            empty_label: "No matches found.".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Whether `query` is long enough to be searched.
    pub fn is_searchable(&self, query: &str) -> bool {
        !query.is_empty() && query.chars().count() >= self.min_length
    }

    /// Changes that invalidate the dispatcher built from the previous config.
    pub(crate) fn requires_rebuild(&self, other: &SearchConfig) -> bool {
        self.delay_ms != other.delay_ms
            || self.throttle_ms != other.throttle_ms
            || self.min_length != other.min_length
            || self.use_cache != other.use_cache
    }
}
