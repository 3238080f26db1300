use crate::{
    context::{Completion, CompletionRequest},
    error::NurseError,
};
use async_trait::async_trait;

/// Completion provider trait.
///
/// Every language-model backend implements this trait so the gateway can
/// stay ignorant of wire formats. Failures of any kind come back as
/// [`NurseError::Provider`]; callers decide how to recover.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Send a single-turn completion request and get the generated reply.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, NurseError>;

    /// Check if the provider is available and ready.
    async fn is_available(&self) -> bool;
}
