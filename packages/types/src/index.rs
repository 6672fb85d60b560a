//! The shared index document: last-writer pointer plus history log.

use serde::{Deserialize, Serialize};

use crate::VERSION;

/// One accepted write, as recorded in the index history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The writer that produced the update.
    pub updated_by: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

/// The shared pointer document other writers consult to find the
/// authoritative copy of a record.
///
/// One index exists per record kind (profile, preferences) and store domain.
/// `last_updated_by` names the writer whose scoped document holds the
/// currently indexed payload; the two fields are updated in the same logical
/// step. `history_log` is append-only and insertion-ordered; once an index
/// exists its log is always present, an empty sequence rather than absent.
///
/// The index is an ordinary document in the same store, with the same
/// lost-update exposure as any other key: concurrent writers re-reading and
/// re-writing it can overwrite each other's pointer or history entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument<T> {
    pub version: u32,
    /// The currently indexed record.
    pub payload: T,
    /// The writer that produced `payload`. Empty until the first write.
    pub last_updated_by: String,
    /// Append-only update history, oldest first. Unbounded by design.
    #[serde(default = "Vec::new")]
    pub history_log: Vec<HistoryEntry>,
}

impl<T: Default> Default for IndexDocument<T> {
    fn default() -> Self {
        Self {
            version: VERSION,
            payload: T::default(),
            last_updated_by: String::new(),
            history_log: Vec::new(),
        }
    }
}

impl<T> IndexDocument<T> {
    /// Point the index at a new payload and append the matching history
    /// entry in one step.
    pub fn record_update(&mut self, payload: T, writer: &str, timestamp: i64) {
        self.payload = payload;
        self.last_updated_by = writer.to_string();
        self.history_log.push(HistoryEntry {
            updated_by: writer.to_string(),
            timestamp,
        });
    }

    /// Whether any writer has ever produced an indexed payload.
    pub fn has_writer(&self) -> bool {
        !self.last_updated_by.is_empty()
    }
}
