//! Recently analyzed notices, newest first.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::notice::NoticeRecord;
use crate::upload::UploadedFile;

/// Default number of entries kept.
pub const HISTORY_LIMIT: usize = 10;

/// One past analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Creation time in milliseconds since the Unix epoch. Unique within a history.
    pub id: u64,
    pub record: &'static NoticeRecord,
    pub file: UploadedFile,
}

/// Bounded most-recent-first list. Pushing past the limit drops the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
    last_id: u64,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
            last_id: 0,
        }
    }

    /// Prepend a new entry and return it.
    pub fn push(&mut self, record: &'static NoticeRecord, file: UploadedFile) -> &HistoryEntry {
        let id = self.next_id(now_millis());
        self.entries.push_front(HistoryEntry { id, record, file });
        while self.entries.len() > self.limit {
            self.entries.pop_back();
        }
        &self.entries[0]
    }

    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every entry. Ids keep increasing across a clear.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Timestamp ids, bumped forward when two entries land in the same millisecond.
    fn next_id(&mut self, now: u64) -> u64 {
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
