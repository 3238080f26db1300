//! Transcript store trait and the in-process implementation.

use async_trait::async_trait;
use nursebot_core::transcript::TranscriptEntry;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Storage seam for per-user transcripts.
///
/// Implementations keep entries in insertion order and never hold more than
/// their configured cap per user, evicting the oldest first. Operations are
/// infallible from the caller's point of view: a backend that can fail is
/// expected to log and carry on.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append an entry, creating the transcript if absent, then trim to the cap.
    async fn append(&self, user_id: &str, entry: TranscriptEntry);

    /// The last `limit` entries for a user, oldest first.
    async fn recent(&self, user_id: &str, limit: usize) -> Vec<TranscriptEntry>;

    /// Full transcript for a user, oldest first.
    async fn history(&self, user_id: &str) -> Vec<TranscriptEntry> {
        self.recent(user_id, usize::MAX).await
    }

    /// Number of stored entries for a user (0 when unknown).
    async fn len(&self, user_id: &str) -> usize;

    async fn is_empty(&self, user_id: &str) -> bool {
        self.len(user_id).await == 0
    }
}

/// Process-local transcript map. Contents are lost on restart.
pub struct InMemoryStore {
    transcripts: Mutex<HashMap<String, VecDeque<TranscriptEntry>>>,
    max_entries: usize,
}

impl InMemoryStore {
    /// Create a store holding at most `max_entries` per user (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            transcripts: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Number of users with a transcript.
    pub fn user_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<TranscriptEntry>>> {
        // A panic mid-append leaves the map structurally intact.
        self.transcripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TranscriptStore for InMemoryStore {
    async fn append(&self, user_id: &str, entry: TranscriptEntry) {
        let mut map = self.lock();
        let transcript = map.entry(user_id.to_string()).or_default();
        transcript.push_back(entry);
        while transcript.len() > self.max_entries {
            transcript.pop_front();
        }
        debug!("memory: {user_id} now holds {} entries", transcript.len());
    }

    async fn recent(&self, user_id: &str, limit: usize) -> Vec<TranscriptEntry> {
        let map = self.lock();
        match map.get(user_id) {
            Some(transcript) => {
                let skip = transcript.len().saturating_sub(limit);
                transcript.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    async fn len(&self, user_id: &str) -> usize {
        self.lock().get(user_id).map_or(0, VecDeque::len)
    }
}
