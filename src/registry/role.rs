//! The fixed set of model roles.

use std::fmt;
use std::str::FromStr;

use crate::error::GatewayError;

/// Semantic purpose a model handle is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// General chat.
    Chat,
    /// Chat with a separate reasoning channel.
    ChatReasoning,
    /// Conversation titling.
    Title,
    /// Artifact/content generation.
    Artifact,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 4] = [Role::Chat, Role::ChatReasoning, Role::Title, Role::Artifact];

    /// Canonical key, as used by callers and the CLI.
    pub fn key(self) -> &'static str {
        match self {
            Role::Chat => "chat-model",
            Role::ChatReasoning => "chat-model-reasoning",
            Role::Title => "title-model",
            Role::Artifact => "artifact-model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = GatewayError;

    /// Parses a canonical role key. Matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.key() == s)
            .ok_or_else(|| GatewayError::UnknownRole(s.to_string()))
    }
}
