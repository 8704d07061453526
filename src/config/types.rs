//! Struct definitions and serde defaults for modelgate configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ARTIFACT_MODEL, DEFAULT_CHAT_MODEL, DEFAULT_REASONING_MODEL, DEFAULT_TITLE_MODEL,
};
use crate::model::ReasoningOptions;

/// On-disk configuration, deserialized from `config.toml` or `modelgate.toml`.
///
/// Every field is optional so a project file only needs to name the values
/// it overrides.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FileConfig {
    /// Forces test doubles instead of live models.
    #[serde(default)]
    pub test_mode: Option<bool>,
    /// OpenRouter credentials and attribution.
    #[serde(default)]
    pub openrouter: OpenRouterEntry,
    /// Per-role model identifier overrides.
    #[serde(default)]
    pub models: ModelsEntry,
    /// Reasoning extraction settings for the reasoning role.
    #[serde(default)]
    pub reasoning: ReasoningEntry,
}

/// Connection details for the OpenRouter gateway.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OpenRouterEntry {
    /// API key for authentication. Can also be set via `OPENROUTER_API_KEY`.
    pub api_key: Option<String>,
    /// Sent as `HTTP-Referer` for OpenRouter analytics.
    pub site_url: Option<String>,
    /// Sent as `X-Title` for OpenRouter analytics.
    pub app_name: Option<String>,
    /// Custom base URL (useful for proxies).
    pub base_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModelsEntry {
    pub chat: Option<String>,
    pub chat_reasoning: Option<String>,
    pub title: Option<String>,
    pub artifact: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ReasoningEntry {
    pub tag_name: Option<String>,
    pub separator: Option<String>,
    pub starts_with_reasoning: Option<bool>,
}

/// Model identifiers bound to each role in live mode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoleModels {
    pub chat: String,
    pub chat_reasoning: String,
    pub title: String,
    pub artifact: String,
}

impl Default for RoleModels {
    fn default() -> Self {
        Self {
            chat: DEFAULT_CHAT_MODEL.to_string(),
            chat_reasoning: DEFAULT_REASONING_MODEL.to_string(),
            title: DEFAULT_TITLE_MODEL.to_string(),
            artifact: DEFAULT_ARTIFACT_MODEL.to_string(),
        }
    }
}

/// Fully resolved configuration consumed by [`crate::registry::ModelRegistry::build`].
///
/// Built from defaults, config files and the environment by
/// [`GatewayConfig::load`], or directly as a struct literal in tests.
#[derive(Debug, Serialize, Clone, Default)]
pub struct GatewayConfig {
    /// Bind test doubles instead of live models.
    pub test_mode: bool,
    pub api_key: Option<String>,
    pub site_url: Option<String>,
    pub app_name: Option<String>,
    pub base_url: Option<String>,
    pub models: RoleModels,
    pub reasoning: ReasoningOptions,
}

impl GatewayConfig {
    /// The configured API key, treating an empty string as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Returns a copy safe to print, with the API key masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api_key().is_some() {
            copy.api_key = Some("********".to_string());
        }
        copy
    }
}
