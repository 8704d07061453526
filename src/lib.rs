//! modelgate: role-based model registry for the OpenRouter LLM gateway.
//!
//! Build a [`ModelRegistry`] from a [`GatewayConfig`] once at startup, then
//! resolve a [`Role`] to get the model handle for that purpose:
//!
//! ```no_run
//! use modelgate::{GatewayConfig, GenerateRequest, LanguageModel, ModelRegistry, Role};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = GatewayConfig::load()?;
//! let registry = ModelRegistry::build(&config)?;
//! let title = registry
//!     .resolve(Role::Title)
//!     .generate(&GenerateRequest::new("Summarize: how do magnets work?"))
//!     .await?;
//! println!("{}", title.text);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod output;
pub mod provider;
pub mod registry;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use model::{
    extract_reasoning, ExtractReasoning, GenerateRequest, Generation, LanguageModel, MockModel,
    ReasoningOptions, StreamPart, StreamSink, TagSplitter,
};
pub use provider::{OpenRouterClient, OpenRouterModel};
pub use registry::{ModelHandle, ModelRegistry, RegistryMode, Role};
