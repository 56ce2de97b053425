//! Store configuration
//!
//! Loading from disk lives in the `unistate-config` crate; this is only the value.

use serde::{Deserialize, Serialize};

/// Tunables for a [`Store`](crate::Store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum nesting of re-entrant dispatches before the store panics
    #[serde(default = "default_max_dispatch_depth")]
    pub max_dispatch_depth: usize,

    /// Log every dispatched action through the logging middleware
    #[serde(default)]
    pub log_actions: bool,
}

fn default_max_dispatch_depth() -> usize {
    128
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_dispatch_depth: default_max_dispatch_depth(),
            log_actions: false,
        }
    }
}
