use thiserror::Error;

/// Top-level error type for NurseBot.
#[derive(Debug, Error)]
pub enum NurseError {
    /// Error from the completion provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Session cookie error.
    #[error("session error: {0}")]
    Session(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
