use serde::{Deserialize, Serialize};

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Output token cap used when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// A single-turn request for the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instruction placed ahead of the user message.
    pub system_prompt: String,
    /// The raw text the user sent.
    pub user_message: String,
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// A structured message for API-based providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// "system" or "user".
    pub role: String,
    /// The message content.
    pub content: String,
}

impl CompletionRequest {
    /// Create a request with the default sampling settings.
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override temperature and output cap.
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Convert to the two-message layout chat APIs expect. The system message
    /// is omitted when the instruction is empty.
    pub fn to_api_messages(&self) -> Vec<ApiMessage> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.is_empty() {
            messages.push(ApiMessage {
                role: "system".to_string(),
                content: self.system_prompt.clone(),
            });
        }
        messages.push(ApiMessage {
            role: "user".to_string(),
            content: self.user_message.clone(),
        });
        messages
    }
}

/// A successful reply from the completion service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
    pub metadata: CompletionMetadata,
}

/// Metadata about how a completion was generated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompletionMetadata {
    /// Which provider produced this response.
    pub provider_used: String,
    /// Token count (if available from the provider).
    pub tokens_used: Option<u64>,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Model identifier (if reported).
    pub model: Option<String>,
}
