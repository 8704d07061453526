//! Model handle abstraction for modelgate.
//!
//! Every role in the registry is bound to an `Arc<dyn LanguageModel>`. Remote
//! OpenRouter models, the reasoning-extraction wrapper and the test doubles
//! all implement the same trait, so callers never see which one they hold.

mod mock;
mod reasoning;

pub use mock::MockModel;
pub use reasoning::{extract_reasoning, ExtractReasoning, ReasoningOptions, TagSplitter};

use crate::error::GatewayError;

/// A single generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Optional system prompt used as the agent preamble.
    pub system: Option<String>,
    pub prompt: String,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// The complete output of a generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Primary output shown to the user.
    pub text: String,
    /// Reasoning channel, if the model produced one.
    pub reasoning: Option<String>,
}

/// One incremental piece of a streamed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamPart {
    Text(String),
    Reasoning(String),
}

/// Receives stream parts as they arrive.
pub trait StreamSink: Send {
    fn on_part(&mut self, part: StreamPart);
}

/// Collects stream parts into a whole [`Generation`].
#[derive(Debug, Default)]
pub struct Collector {
    text: String,
    reasoning: String,
}

impl Collector {
    pub fn push(&mut self, part: &StreamPart) {
        match part {
            StreamPart::Text(t) => self.text.push_str(t),
            StreamPart::Reasoning(r) => self.reasoning.push_str(r),
        }
    }

    pub fn finish(self) -> Generation {
        Generation {
            text: self.text,
            reasoning: (!self.reasoning.is_empty()).then_some(self.reasoning),
        }
    }
}

impl StreamSink for Vec<StreamPart> {
    fn on_part(&mut self, part: StreamPart) {
        self.push(part);
    }
}

/// Capability shared by every model handle.
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider-qualified model identifier (e.g. `z-ai/glm-4.5-air:free`).
    fn model_id(&self) -> &str;

    /// Runs a request to completion and returns the whole output.
    async fn generate(&self, request: &GenerateRequest) -> Result<Generation, GatewayError>;

    /// Streams a request, handing each part to `sink`, and returns the
    /// accumulated output once the stream ends.
    async fn stream(
        &self,
        request: &GenerateRequest,
        sink: &mut dyn StreamSink,
    ) -> Result<Generation, GatewayError>;
}
