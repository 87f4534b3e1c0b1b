//! Sync status snapshot for display

use board_model::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the sync engine state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Whether a document has been loaded
    pub initialized: bool,
    /// Operations waiting for the next flush
    pub pending_ops: usize,
    /// Whether a flush is waiting on the store
    pub flush_in_flight: bool,
    /// Version of the last document read or written
    pub last_known_version: Version,
    /// Time of the last successful flush
    pub last_flush_at: Option<DateTime<Utc>>,
    /// Most recent failure, cleared by the next successful store access
    pub last_error: Option<String>,
}

impl SyncStatus {
    /// Whether the indicator should be shown
    ///
    /// Returns true if there are unsynced changes or the last access failed
    pub fn needs_attention(&self) -> bool {
        self.pending_ops > 0 || self.flush_in_flight || self.last_error.is_some()
    }

    /// Short human-readable status line
    pub fn status_message(&self) -> String {
        if !self.initialized {
            return "Not loaded".to_string();
        }
        if self.flush_in_flight {
            return "Saving...".to_string();
        }
        if let Some(ref error) = self.last_error {
            return format!("Sync error: {}", error);
        }
        if self.pending_ops > 0 {
            return format!("{} pending changes", self.pending_ops);
        }
        format!("Synced ({})", self.last_known_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> SyncStatus {
        SyncStatus {
            initialized: true,
            pending_ops: 0,
            flush_in_flight: false,
            last_known_version: Version::new(3),
            last_flush_at: None,
            last_error: None,
        }
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(status().status_message(), "Synced (v3)");
        assert!(!status().needs_attention());

        let pending = SyncStatus { pending_ops: 2, ..status() };
        assert_eq!(pending.status_message(), "2 pending changes");
        assert!(pending.needs_attention());

        let failed = SyncStatus { last_error: Some("offline".into()), ..status() };
        assert_eq!(failed.status_message(), "Sync error: offline");

        let saving = SyncStatus { flush_in_flight: true, ..status() };
        assert_eq!(saving.status_message(), "Saving...");

        let fresh = SyncStatus { initialized: false, ..status() };
        assert_eq!(fresh.status_message(), "Not loaded");
    }
}
