//! Configuration types and loading for modelgate.
//!
//! Settings come from defaults, an optional global TOML file at the
//! platform's XDG config path (e.g. `~/.config/modelgate/config.toml`), an
//! optional per-project `modelgate.toml`, and finally the environment.

mod loader;
mod paths;
mod resolve;
mod types;


pub use types::{
    FileConfig, GatewayConfig, ModelsEntry, OpenRouterEntry, ReasoningEntry, RoleModels,
};

use anyhow::Result;

impl GatewayConfig {
    /// Load config with precedence: environment > project > global > defaults.
    pub fn load() -> Result<Self> {
        let env = |name: &str| std::env::var(name).ok();

        let mut file = FileConfig::load_global()?;
        if let Some(project) = FileConfig::load_project()? {
            file = FileConfig::merge(file, project);
        }
        file.resolve_substitutions(&env);

        let mut config = Self::from_file(file);
        config.apply_env(&env);
        Ok(config)
    }
}
