//! File loading and merging for modelgate configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{FileConfig, ModelsEntry, OpenRouterEntry, ReasoningEntry};

impl FileConfig {
    /// Loads the global config from `~/.config/modelgate/config.toml`.
    ///
    /// A missing file yields an empty config; the loader never writes one.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no global config file");
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Look for modelgate.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Self>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Self::load_file(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: FileConfig, project: FileConfig) -> FileConfig {
        FileConfig {
            test_mode: project.test_mode.or(global.test_mode),
            openrouter: OpenRouterEntry {
                api_key: project.openrouter.api_key.or(global.openrouter.api_key),
                site_url: project.openrouter.site_url.or(global.openrouter.site_url),
                app_name: project.openrouter.app_name.or(global.openrouter.app_name),
                base_url: project.openrouter.base_url.or(global.openrouter.base_url),
            },
            models: ModelsEntry {
                chat: project.models.chat.or(global.models.chat),
                chat_reasoning: project
                    .models
                    .chat_reasoning
                    .or(global.models.chat_reasoning),
                title: project.models.title.or(global.models.title),
                artifact: project.models.artifact.or(global.models.artifact),
            },
            reasoning: ReasoningEntry {
                tag_name: project.reasoning.tag_name.or(global.reasoning.tag_name),
                separator: project.reasoning.separator.or(global.reasoning.separator),
                starts_with_reasoning: project
                    .reasoning
                    .starts_with_reasoning
                    .or(global.reasoning.starts_with_reasoning),
            },
        }
    }
}
