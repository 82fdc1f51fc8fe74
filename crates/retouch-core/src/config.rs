//! Session configuration.

use serde::{Deserialize, Serialize};

/// Settings for an [`EditSession`](crate::EditSession).
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of undo snapshots kept. `None` keeps every snapshot;
    /// with a limit, the oldest snapshot is evicted first.
    pub history_limit: Option<usize>,
}

impl SessionConfig {
    /// Default configuration: unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit undo depth to `limit` snapshots.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}
