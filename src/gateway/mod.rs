//! Gateway: routes each inbound message through the safety tracker and,
//! when it is not an emergency, on to the completion provider.

pub mod keywords;
mod prompt;
mod tracker;

#[cfg(test)]
mod tests;

pub use tracker::Tracker;

use nursebot_core::{
    config::OpenAiConfig,
    context::{CompletionRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE},
    transcript::Role,
    traits::Provider,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Reply used whenever the completion service fails, whatever the cause.
pub const APOLOGY_REPLY: &str =
    "I apologize, but I'm having trouble processing your request. Please try again later.";

/// Sampling settings sent with every completion request.
#[derive(Debug, Clone, Copy)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&OpenAiConfig> for Sampling {
    fn from(cfg: &OpenAiConfig) -> Self {
        Self {
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        }
    }
}

/// The message router shared by every connection.
pub struct Gateway {
    tracker: Tracker,
    provider: Arc<dyn Provider>,
    sampling: Sampling,
}

impl Gateway {
    pub fn new(tracker: Tracker, provider: Arc<dyn Provider>, sampling: Sampling) -> Self {
        info!(
            "gateway ready | provider: {} | temperature: {} | max_tokens: {}",
            provider.name(),
            sampling.temperature,
            sampling.max_tokens
        );
        Self {
            tracker,
            provider,
            sampling,
        }
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Produce the reply for one inbound message. Always returns text.
    pub async fn respond(&self, user_id: &str, text: &str) -> String {
        if let Some(reply) = self.tracker.handle_incoming(user_id, text).await {
            return reply;
        }

        let system_prompt = self.tracker.build_prompt(user_id).await;
        let request = CompletionRequest::new(system_prompt, text)
            .with_sampling(self.sampling.temperature, self.sampling.max_tokens);

        debug!(
            "gateway: completing for {user_id}: {}",
            text.chars().take(50).collect::<String>()
        );

        let reply = match self.provider.complete(&request).await {
            Ok(completion) => {
                let meta = &completion.metadata;
                debug!(
                    "gateway: {} replied in {}ms | model: {} | tokens: {}",
                    meta.provider_used,
                    meta.processing_time_ms,
                    meta.model.as_deref().unwrap_or("unknown"),
                    meta.tokens_used.map_or_else(|| "n/a".to_string(), |t| t.to_string())
                );
                completion.text
            }
            Err(e) => {
                error!("gateway: completion failed for {user_id}: {e}");
                APOLOGY_REPLY.to_string()
            }
        };

        self.tracker
            .record_message(user_id, Role::Assistant, &reply)
            .await;
        reply
    }
}
