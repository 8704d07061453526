//! Centralized constants for modelgate.
//!
//! Environment variable names, default model identifiers and gateway
//! headers live here so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "modelgate";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "modelgate.toml";

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

// --- Environment ---

/// OpenRouter API key.
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";

/// Site URL sent as `HTTP-Referer` for OpenRouter attribution.
pub const ENV_SITE_URL: &str = "OPENROUTER_SITE_URL";

/// Application name sent as `X-Title` for OpenRouter attribution.
pub const ENV_APP_NAME: &str = "OPENROUTER_APP_NAME";

/// Optional override for the OpenRouter API base URL.
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";

/// Any of these set to a truthy value switches the registry to test doubles.
pub const TEST_MODE_VARS: &[&str] = &[
    "MODELGATE_TEST_MODE",
    "PLAYWRIGHT",
    "PLAYWRIGHT_TEST_BASE_URL",
    "CI_PLAYWRIGHT",
];

// --- Attribution headers ---

pub const HEADER_REFERER: &str = "http-referer";
pub const HEADER_TITLE: &str = "x-title";

// --- Live model identifiers ---

/// General chat model.
pub const DEFAULT_CHAT_MODEL: &str = "z-ai/glm-4.5-air:free";

/// Reasoning model; its output carries `<think>` blocks.
pub const DEFAULT_REASONING_MODEL: &str = "deepseek/deepseek-r1-0528:free";

/// Lightweight titling model.
pub const DEFAULT_TITLE_MODEL: &str = "qwen/qwen3-coder:free";

/// Artifact/content generation model.
pub const DEFAULT_ARTIFACT_MODEL: &str = "z-ai/glm-4.5-air:free";

// --- Reasoning extraction ---

/// Tag whose contents are moved into the reasoning channel.
pub const DEFAULT_REASONING_TAG: &str = "think";

/// Joins reasoning blocks and the text around removed blocks.
pub const DEFAULT_REASONING_SEPARATOR: &str = "\n";
