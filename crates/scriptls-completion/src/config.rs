//! Completion-specific configuration (§3's `CoreConfig`, this crate's slice of it).

use serde::{Deserialize, Serialize};

fn default_max_items() -> usize {
    50
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self { max_items: default_max_items() }
    }
}
