//! OpenRouter provider for modelgate.
//!
//! Wraps rig-core's OpenRouter client behind [`OpenRouterClient`], keeping
//! provider-specific details out of the registry.

mod client;

pub use client::{attribution_headers, OpenRouterClient, OpenRouterModel};
