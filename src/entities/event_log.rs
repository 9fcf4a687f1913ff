// 📜 Event Log - Bounded feed of what the store did
//
// Display-only. Newest entry first, oldest evicted once the cap is hit.
// The "service" tags are labels, nothing talks to a real service.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of entries kept
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    #[serde(rename = "Wallet Service")]
    WalletService,
    #[serde(rename = "Category Service")]
    CategoryService,
    #[serde(rename = "Transaction Service")]
    TransactionService,
    System,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::WalletService => "Wallet Service",
            EventSource::CategoryService => "Category Service",
            EventSource::TransactionService => "Transaction Service",
            EventSource::System => "System",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Pending,
    Info,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Success => "success",
            EventStatus::Pending => "pending",
            EventStatus::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: String,
    /// Machine-ish title, e.g. "transaction_added"
    pub title: String,
    pub description: String,
    pub source: EventSource,
    pub time: DateTime<FixedOffset>,
    pub status: EventStatus,
}

impl EventLogEntry {
    pub fn new(
        title: &str,
        description: String,
        source: EventSource,
        time: DateTime<FixedOffset>,
        status: EventStatus,
    ) -> Self {
        EventLogEntry {
            id: format!("event-{}", uuid::Uuid::new_v4()),
            title: title.to_string(),
            description,
            source,
            time,
            status,
        }
    }
}

/// Most-recent-first bounded log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
    capacity: usize,
}

impl EventLog {
    /// A capacity of 0 is bumped to 1; the config layer rejects 0 earlier
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        EventLog {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert as the newest entry, evicting the oldest beyond capacity
    pub fn push(&mut self, entry: EventLogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Push several entries; the first one ends up newest, like a
    /// `[a, b, c, ...old]` prepend
    pub fn extend_front(&mut self, batch: Vec<EventLogEntry>) {
        for entry in batch.into_iter().rev() {
            self.entries.push_front(entry);
        }
        self.entries.truncate(self.capacity);
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&EventLogEntry> {
        self.entries.front()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> EventLogEntry {
        EventLogEntry::new(
            title,
            String::new(),
            EventSource::System,
            DateTime::parse_from_rfc3339("2024-06-18T08:15:12+07:00").unwrap(),
            EventStatus::Info,
        )
    }

    #[test]
    fn test_push_is_newest_first() {
        let mut log = EventLog::default();
        log.push(entry("first"));
        log.push(entry("second"));

        let titles: Vec<&str> = log.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(log.latest().unwrap().title, "second");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = EventLog::with_capacity(12);
        for i in 0..20 {
            log.push(entry(&format!("e{}", i)));
        }

        assert_eq!(log.len(), 12);
        assert_eq!(log.latest().unwrap().title, "e19");
        assert_eq!(log.iter().last().unwrap().title, "e8");
    }

    #[test]
    fn test_extend_front_keeps_batch_order() {
        let mut log = EventLog::with_capacity(4);
        log.push(entry("old1"));
        log.push(entry("old2"));
        log.extend_front(vec![entry("a"), entry("b"), entry("c")]);

        let titles: Vec<&str> = log.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c", "old2"]);
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let mut log = EventLog::with_capacity(0);
        log.push(entry("x"));
        log.push(entry("y"));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_enum_spellings() {
        assert_eq!(serde_json::to_string(&EventStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(
            serde_json::to_string(&EventSource::TransactionService).unwrap(),
            "\"Transaction Service\""
        );
    }
}
