//! Command-line interface definition and dispatch for modelgate.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand
//! builds the registry from the loaded config and works against it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use modelgate::output::StdoutRenderer;
use modelgate::{GatewayConfig, GenerateRequest, LanguageModel, ModelRegistry, Role};

/// Top-level CLI structure for modelgate.
#[derive(Parser)]
#[command(name = "modelgate", about = "Role-based model registry for OpenRouter")]
pub struct Cli {
    /// Use scripted test models instead of live ones
    #[arg(long, global = true)]
    pub test_mode: bool,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the modelgate CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// List each role and the model bound to it
    Roles {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send a prompt to the model bound to a role
    Ask {
        /// The prompt to send
        prompt: Vec<String>,
        /// Role to use (chat-model, chat-model-reasoning, title-model, artifact-model)
        #[arg(short, long, default_value = "chat-model")]
        role: String,
        /// System prompt
        #[arg(short, long)]
        system: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective config
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

fn load_config(force_test_mode: bool) -> Result<GatewayConfig> {
    let mut config = GatewayConfig::load()?;
    if force_test_mode {
        config.test_mode = true;
    }
    Ok(config)
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.test_mode)?;

    match cli.command {
        Commands::Roles { json } => {
            let registry = ModelRegistry::build(&config)?;
            if json {
                let roles: serde_json::Map<String, serde_json::Value> = registry
                    .entries()
                    .map(|(role, handle)| (role.key().to_string(), handle.model_id().into()))
                    .collect();
                let out = serde_json::json!({
                    "mode": registry.mode().as_str(),
                    "roles": roles,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!(
                    "{} [mode: {}]\n",
                    "modelgate".bold().cyan(),
                    registry.mode().as_str().yellow()
                );
                for (role, handle) in registry.entries() {
                    println!("  {:<22} {}", role.key().bold(), handle.model_id());
                }
            }
            Ok(())
        }
        Commands::Ask {
            prompt,
            role,
            system,
        } => {
            let prompt = prompt.join(" ");
            if prompt.is_empty() {
                anyhow::bail!("No prompt provided. Usage: modelgate ask \"your question here\"");
            }
            let role: Role = role.parse()?;
            let registry = ModelRegistry::build(&config)?;
            let model = registry.resolve(role);

            println!(
                "{} [role: {}, model: {}]",
                "modelgate".bold().cyan(),
                role.key().yellow(),
                model.model_id().yellow(),
            );
            println!();
            println!("{} {}", ">".green().bold(), prompt);
            println!();

            let mut request = GenerateRequest::new(prompt);
            if let Some(system) = system {
                request = request.with_system(system);
            }

            let mut renderer = StdoutRenderer::new();
            match model.stream(&request, &mut renderer).await {
                Ok(generation) => {
                    renderer.render_done(&generation);
                    Ok(())
                }
                Err(err) => {
                    renderer.render_error(&err.to_string());
                    Err(err).context("Request failed")
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let path = modelgate::config::FileConfig::config_path()?;
                println!("{} {}", "Config path:".bold(), path.display());
                println!();
                let toml_str = toml::to_string_pretty(&config.redacted())?;
                println!("{}", toml_str);
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_defaults_to_chat_role() {
        let cli = Cli::try_parse_from(["modelgate", "ask", "hello", "there"]).unwrap();
        match cli.command {
            Commands::Ask { prompt, role, system } => {
                assert_eq!(prompt, vec!["hello", "there"]);
                assert_eq!(role, "chat-model");
                assert!(system.is_none());
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["modelgate", "roles", "--json", "--test-mode"]).unwrap();
        assert!(cli.test_mode);
        assert!(matches!(cli.command, Commands::Roles { json: true }));
    }
}
