//! Safety and history tracking for each user.
//!
//! The tracker is the only writer to the transcript store. It records every
//! exchanged message, short-circuits emergencies with a scripted reply, and
//! builds the system prompt from the recent transcript.

use super::keywords;
use super::prompt::{self, SUMMARY_WINDOW};
use chrono::{Local, Timelike};
use nursebot_core::transcript::{Role, TranscriptEntry};
use nursebot_memory::TranscriptStore;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Tracker {
    store: Arc<dyn TranscriptStore>,
}

impl Tracker {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    /// The backing store, for read-only inspection.
    #[cfg(test)]
    pub fn store(&self) -> &Arc<dyn TranscriptStore> {
        &self.store
    }

    /// Append a timestamped entry to the user's transcript.
    pub async fn record_message(&self, user_id: &str, role: Role, content: &str) {
        self.store
            .append(user_id, TranscriptEntry::now(role, content))
            .await;
    }

    /// System prompt using the current local hour for the greeting.
    pub async fn build_prompt(&self, user_id: &str) -> String {
        self.build_prompt_at(user_id, Local::now().hour()).await
    }

    /// System prompt for an explicit local hour (0-23).
    pub async fn build_prompt_at(&self, user_id: &str, hour: u32) -> String {
        let recent = self.store.recent(user_id, SUMMARY_WINDOW).await;
        let summary = prompt::conversation_summary(&recent);
        prompt::render_system_prompt(prompt::greeting_for_hour(hour), &summary)
    }

    /// Record the user's message and answer it directly if it is an emergency.
    ///
    /// Returns `None` when the message should go on to the completion service.
    pub async fn handle_incoming(&self, user_id: &str, text: &str) -> Option<String> {
        self.record_message(user_id, Role::User, text).await;

        if !keywords::is_emergency(text) {
            debug!("tracker: no emergency keywords for {user_id}");
            return None;
        }

        warn!("tracker: emergency keywords detected for {user_id}");
        let reply = keywords::emergency_reply();
        self.record_message(user_id, Role::Assistant, reply).await;
        Some(reply.to_string())
    }
}
