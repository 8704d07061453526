//! Role-to-model registry.
//!
//! [`ModelRegistry::build`] binds each [`Role`] to exactly one model handle,
//! either the scripted test doubles or live OpenRouter models, and the
//! result is never mutated afterwards. Callers hold the registry by value
//! or behind an `Arc` and resolve handles from it.

mod role;

#[cfg(test)]
mod tests;

pub use role::Role;

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::model::{ExtractReasoning, LanguageModel, MockModel};
use crate::provider::OpenRouterClient;

/// Shared, read-only model handle.
pub type ModelHandle = Arc<dyn LanguageModel>;

/// Which set of models the registry was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryMode {
    Test,
    Live,
}

impl RegistryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistryMode::Test => "test",
            RegistryMode::Live => "live",
        }
    }
}

/// Immutable mapping from every [`Role`] to its model handle.
#[derive(Clone)]
pub struct ModelRegistry {
    mode: RegistryMode,
    chat: ModelHandle,
    chat_reasoning: ModelHandle,
    title: ModelHandle,
    artifact: ModelHandle,
}

impl ModelRegistry {
    /// Builds the registry selected by `config.test_mode`.
    ///
    /// # Errors
    ///
    /// In live mode, fails when the OpenRouter client cannot be created,
    /// most commonly [`GatewayError::MissingApiKey`].
    pub fn build(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let registry = if config.test_mode {
            Self::test_doubles()
        } else {
            Self::live(config)?
        };

        tracing::info!(mode = registry.mode.as_str(), "model registry ready");
        for (role, handle) in registry.entries() {
            tracing::debug!(role = role.key(), model = handle.model_id(), "bound role");
        }
        Ok(registry)
    }

    /// Binds every role to its scripted stand-in.
    pub fn test_doubles() -> Self {
        Self {
            mode: RegistryMode::Test,
            chat: Arc::new(MockModel::chat()),
            chat_reasoning: Arc::new(MockModel::reasoning()),
            title: Arc::new(MockModel::title()),
            artifact: Arc::new(MockModel::artifact()),
        }
    }

    /// Binds every role to a live OpenRouter model sharing one client.
    /// The reasoning role is wrapped with reasoning extraction.
    pub fn live(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = OpenRouterClient::new(config)?;
        let models = &config.models;

        let reasoning = ExtractReasoning::new(
            client.chat(&models.chat_reasoning),
            config.reasoning.clone(),
        );

        Ok(Self {
            mode: RegistryMode::Live,
            chat: Arc::new(client.chat(&models.chat)),
            chat_reasoning: Arc::new(reasoning),
            title: Arc::new(client.chat(&models.title)),
            artifact: Arc::new(client.chat(&models.artifact)),
        })
    }

    pub fn mode(&self) -> RegistryMode {
        self.mode
    }

    /// Returns the handle bound to `role`.
    pub fn resolve(&self, role: Role) -> ModelHandle {
        let handle = match role {
            Role::Chat => &self.chat,
            Role::ChatReasoning => &self.chat_reasoning,
            Role::Title => &self.title,
            Role::Artifact => &self.artifact,
        };
        Arc::clone(handle)
    }

    /// Resolves a role by its string key.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownRole`] for keys outside the fixed set.
    pub fn resolve_key(&self, key: &str) -> Result<ModelHandle, GatewayError> {
        Ok(self.resolve(key.parse()?))
    }

    /// All roles with their handles, in [`Role::ALL`] order.
    pub fn entries(&self) -> impl Iterator<Item = (Role, ModelHandle)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.resolve(role)))
    }
}
