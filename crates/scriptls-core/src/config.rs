//! The facade's configuration surface (§6, §9): a debounce window, the
//! completion dispatcher's `maxItems`, and the default `MergeStrategy` for
//! `TypeAggregate` queries. Nothing else in this core is parameterized.

use scriptls_completion::CompletionConfig;
use scriptls_store::MergeStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_debounce_ms() -> u64 {
    250
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Quiet-period length before a document's pending edits are reparsed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub merge_strategy: MergeStrategy,
}

impl CoreConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms(), completion: CompletionConfig::default(), merge_strategy: MergeStrategy::default() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_debounce_is_250ms() {
        assert_eq!(CoreConfig::default().debounce(), Duration::from_millis(250));
    }

    #[test]
    fn deserializes_with_all_fields_defaulted() {
        let config: CoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.completion.max_items, CompletionConfig::default().max_items);
        assert_eq!(config.merge_strategy, MergeStrategy::First);
    }
}
