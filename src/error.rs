//! Error type for the registry and model handles.

use thiserror::Error;

/// Errors surfaced by registry construction and model calls.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Live mode needs an OpenRouter key and none was configured.
    #[error("No API key found for OpenRouter. Set OPENROUTER_API_KEY or configure it in config.toml")]
    MissingApiKey,

    /// A role key outside the fixed set.
    #[error("Unknown role: {0}. Supported: chat-model, chat-model-reasoning, title-model, artifact-model")]
    UnknownRole(String),

    /// An attribution header value that cannot be sent over HTTP.
    #[error("Invalid value for header {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("Failed to create OpenRouter client: {0}")]
    Client(String),

    #[error("Generation failed: {0}")]
    Generation(String),
}
