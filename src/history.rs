//! Analysis history
//!
//! A bounded, newest-first list of past single-text analyses, persisted as a
//! JSON array under [`HISTORY_KEY`] after every mutation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::sentiment::Sentiment;
use crate::store::{KeyValueStore, StoreResult};

/// Storage key holding the serialized history
pub const HISTORY_KEY: &str = "socialpulse_history";

/// Maximum number of entries kept
pub const HISTORY_CAPACITY: usize = 20;

/// One past analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sentiment: Sentiment,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Newest-first history backed by a [`KeyValueStore`]
pub struct History {
    entries: Vec<HistoryEntry>,
    store: Arc<dyn KeyValueStore>,
}

impl History {
    /// Load the history from `store`.
    ///
    /// A missing key, an unreadable store or a corrupt payload all yield an
    /// empty history; the latter two are logged.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_CAPACITY);
                    entries
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable history");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read history, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = entries.len(), "Loaded history");
        Self { entries, store }
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend an entry stamped with the current time, evict past capacity, persist.
    ///
    /// The in-memory list is updated even when persisting fails.
    pub fn record(&mut self, text: impl Into<String>, sentiment: Sentiment) -> StoreResult<()> {
        self.push(HistoryEntry::new(text, sentiment))
    }

    /// Prepend an already-built entry, evict past capacity, persist
    pub fn push(&mut self, entry: HistoryEntry) -> StoreResult<()> {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.save()
    }

    /// Drop every entry and remove the persisted key
    pub fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &json)
    }
}
