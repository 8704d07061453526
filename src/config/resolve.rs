//! Environment variable substitution and layering onto [`GatewayConfig`].

use super::types::{FileConfig, GatewayConfig};
use crate::constants::{ENV_API_KEY, ENV_APP_NAME, ENV_BASE_URL, ENV_SITE_URL, TEST_MODE_VARS};

impl FileConfig {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub fn resolve_substitutions(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        let entry = &mut self.openrouter;
        for field in [
            &mut entry.api_key,
            &mut entry.site_url,
            &mut entry.app_name,
            &mut entry.base_url,
        ] {
            if let Some(value) = field {
                *value = resolve_str(value, lookup);
            }
        }
    }
}

/// Replace {env:VAR} with the environment variable value.
/// Unset variables become the empty string. Substituted values are not
/// scanned again.
fn resolve_str(s: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("{env:") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 5..start + end];
        result.push_str(&lookup(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Whether an environment flag value switches a feature on.
pub(crate) fn is_truthy(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl GatewayConfig {
    /// Builds a config from defaults plus the given environment lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.apply_env(&lookup);
        config
    }

    /// Lays file values over the defaults.
    pub fn from_file(file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            test_mode: file.test_mode.unwrap_or(defaults.test_mode),
            api_key: non_empty(file.openrouter.api_key),
            site_url: non_empty(file.openrouter.site_url),
            app_name: non_empty(file.openrouter.app_name),
            base_url: non_empty(file.openrouter.base_url),
            models: crate::config::RoleModels {
                chat: file.models.chat.unwrap_or(defaults.models.chat),
                chat_reasoning: file
                    .models
                    .chat_reasoning
                    .unwrap_or(defaults.models.chat_reasoning),
                title: file.models.title.unwrap_or(defaults.models.title),
                artifact: file.models.artifact.unwrap_or(defaults.models.artifact),
            },
            reasoning: crate::model::ReasoningOptions {
                tag_name: file
                    .reasoning
                    .tag_name
                    .unwrap_or(defaults.reasoning.tag_name),
                separator: file
                    .reasoning
                    .separator
                    .unwrap_or(defaults.reasoning.separator),
                starts_with_reasoning: file
                    .reasoning
                    .starts_with_reasoning
                    .unwrap_or(defaults.reasoning.starts_with_reasoning),
            },
        }
    }

    /// Environment values override whatever is already set.
    /// Empty variables are ignored. Set test flags override the file value.
    pub fn apply_env(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        if let Some(key) = non_empty(lookup(ENV_API_KEY)) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(lookup(ENV_SITE_URL)) {
            self.site_url = Some(url);
        }
        if let Some(name) = non_empty(lookup(ENV_APP_NAME)) {
            self.app_name = Some(name);
        }
        if let Some(url) = non_empty(lookup(ENV_BASE_URL)) {
            self.base_url = Some(url);
        }
        // Any set flag decides; a truthy one wins over an explicit off.
        let flags: Vec<bool> = TEST_MODE_VARS
            .iter()
            .filter_map(|var| non_empty(lookup(var)))
            .map(|v| is_truthy(&v))
            .collect();
        if !flags.is_empty() {
            self.test_mode = flags.contains(&true);
        }
    }
}
