//! Activity log entries shown on the dashboard feed

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of entries retained per account
pub const ACTIVITY_LOG_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Spend,
    Deposit,
    Credit,
    Repay,
    Badge,
    Yield,
    Settings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

/// A single dashboard activity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub amount: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
    pub tx_hash: Option<String>,
    pub status: ActivityStatus,
    pub details: Option<String>,
}

impl ActivityEntry {
    pub fn new(
        address: impl Into<String>,
        kind: ActivityKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            address: address.into(),
            kind,
            description: description.into(),
            amount: None,
            timestamp: Utc::now(),
            tx_hash: None,
            status: ActivityStatus::Completed,
            details: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_tx_hash(mut self, tx_hash: impl Into<String>) -> Self {
        self.tx_hash = Some(tx_hash.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Bounded, newest-first activity feed
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_LOG_CAPACITY),
        }
    }

    /// Push an entry to the front, dropping the oldest past capacity
    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, newest first
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_newest_first() {
        let mut log = ActivityLog::new();
        log.push(ActivityEntry::new("0xabc", ActivityKind::Spend, "first"));
        log.push(ActivityEntry::new("0xabc", ActivityKind::Repay, "second"));

        let entries = log.entries();
        assert_eq!(entries[0].description, "second");
        assert_eq!(entries[1].description, "first");
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = ActivityLog::new();
        for i in 0..(ACTIVITY_LOG_CAPACITY + 5) {
            log.push(ActivityEntry::new("0xabc", ActivityKind::Yield, format!("tick {}", i)));
        }

        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log.entries()[0].description, format!("tick {}", ACTIVITY_LOG_CAPACITY + 4));
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let entry = ActivityEntry::new("0xabc", ActivityKind::Badge, "upgrade");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "badge");
        assert_eq!(json["status"], "completed");
    }
}
