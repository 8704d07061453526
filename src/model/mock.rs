//! Scripted stand-in models bound to every role in test mode.
//!
//! Responses are fixed so UI and pipeline tests can assert on exact output
//! without network access.

use super::{Collector, GenerateRequest, Generation, LanguageModel, StreamPart, StreamSink};
use crate::error::GatewayError;

/// A model that replays a fixed list of stream parts.
#[derive(Debug, Clone)]
pub struct MockModel {
    id: String,
    parts: Vec<StreamPart>,
}

/// Splits `text` into word-sized text parts, keeping the spaces.
fn words(text: &str) -> Vec<StreamPart> {
    text.split_inclusive(' ')
        .map(|w| StreamPart::Text(w.to_string()))
        .collect()
}

impl MockModel {
    pub fn new(id: impl Into<String>, parts: Vec<StreamPart>) -> Self {
        Self {
            id: id.into(),
            parts,
        }
    }

    /// Streams each chunk verbatim as text.
    pub fn scripted(id: impl Into<String>, chunks: &[&str]) -> Self {
        let parts = chunks
            .iter()
            .map(|c| StreamPart::Text(c.to_string()))
            .collect();
        Self::new(id, parts)
    }

    pub fn chat() -> Self {
        Self::new("mock/chat-model", words("Hello, world!"))
    }

    /// Reasoning double: a reasoning part followed by the answer.
    pub fn reasoning() -> Self {
        let mut parts = vec![StreamPart::Reasoning(
            "The user is greeting me, so I will greet them back.".to_string(),
        )];
        parts.extend(words("Hello, world!"));
        Self::new("mock/chat-model-reasoning", parts)
    }

    pub fn title() -> Self {
        Self::new("mock/title-model", words("This is a test title"))
    }

    pub fn artifact() -> Self {
        Self::new("mock/artifact-model", words("This is a test artifact"))
    }

    fn collect(&self) -> Generation {
        let mut collector = Collector::default();
        for part in &self.parts {
            collector.push(part);
        }
        collector.finish()
    }
}

#[async_trait::async_trait]
impl LanguageModel for MockModel {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Generation, GatewayError> {
        tracing::debug!(model = %self.id, prompt_len = request.prompt.len(), "mock generate");
        Ok(self.collect())
    }

    async fn stream(
        &self,
        request: &GenerateRequest,
        sink: &mut dyn StreamSink,
    ) -> Result<Generation, GatewayError> {
        tracing::debug!(model = %self.id, prompt_len = request.prompt.len(), "mock stream");
        for part in &self.parts {
            sink.on_part(part.clone());
        }
        Ok(self.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_double_streams_words() {
        let model = MockModel::chat();
        let mut parts: Vec<StreamPart> = Vec::new();
        let g = model
            .stream(&GenerateRequest::new("hi"), &mut parts)
            .await
            .unwrap();
        assert_eq!(g.text, "Hello, world!");
        assert!(g.reasoning.is_none());
        assert_eq!(parts.len(), 2);
    }

    #[tokio::test]
    async fn test_reasoning_double_has_reasoning() {
        let g = MockModel::reasoning()
            .generate(&GenerateRequest::new("hi"))
            .await
            .unwrap();
        assert_eq!(g.text, "Hello, world!");
        assert!(g.reasoning.unwrap().contains("greeting"));
    }

    #[tokio::test]
    async fn test_scripted_concatenates_chunks() {
        let g = MockModel::scripted("s", &["a", "b", "c"])
            .generate(&GenerateRequest::new(""))
            .await
            .unwrap();
        assert_eq!(g.text, "abc");
    }
}
