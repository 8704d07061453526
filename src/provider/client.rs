//! OpenRouter client and remote model handles.
//!
//! [`OpenRouterClient`] is built once from the gateway config and hands out
//! [`OpenRouterModel`] handles that share it. Requests go through rig-core
//! agents; rig owns the wire protocol, auth transport and SSE parsing.

use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use rig::agent::MultiTurnStreamItem;
use rig::client::CompletionClient;
use rig::message::Text;
use rig::providers::openrouter;
use rig::streaming::{StreamedAssistantContent, StreamingPrompt};

use crate::config::GatewayConfig;
use crate::constants::{HEADER_REFERER, HEADER_TITLE, MAX_TOKENS};
use crate::error::GatewayError;
use crate::model::{Collector, GenerateRequest, Generation, LanguageModel, StreamPart, StreamSink};

/// Builds an agent from the given client, model, and optional system prompt,
/// then executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let $agent = if let Some(sys) = $sys {
            $client
                .agent($model)
                .preamble(sys)
                .max_tokens(MAX_TOKENS)
                .build()
        } else {
            $client.agent($model).max_tokens(MAX_TOKENS).build()
        };
        $body
    }};
}

/// Builds the optional OpenRouter attribution headers.
///
/// `HTTP-Referer` carries the site URL and `X-Title` the app name; each is
/// only set when configured.
pub fn attribution_headers(config: &GatewayConfig) -> Result<HeaderMap, GatewayError> {
    let mut headers = HeaderMap::new();
    let pairs = [
        (HEADER_REFERER, config.site_url.as_deref()),
        (HEADER_TITLE, config.app_name.as_deref()),
    ];
    for (name, value) in pairs {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };
        let value = HeaderValue::from_str(value).map_err(|e| GatewayError::InvalidHeader {
            name,
            reason: e.to_string(),
        })?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}

/// A configured OpenRouter gateway client.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: openrouter::Client,
}

impl OpenRouterClient {
    /// Creates the client from the gateway config.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingApiKey`] when no non-empty key is
    /// configured, [`GatewayError::InvalidHeader`] for unusable attribution
    /// values, and [`GatewayError::Client`] if rig fails to build the client.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config.api_key().ok_or(GatewayError::MissingApiKey)?;
        let headers = attribution_headers(config)?;

        let builder = openrouter::Client::builder()
            .api_key(api_key)
            .http_headers(headers);
        let builder = match config.base_url.as_deref() {
            Some(url) => builder.base_url(url),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        tracing::debug!(
            referer = config.site_url.is_some(),
            title = config.app_name.is_some(),
            "created OpenRouter client"
        );
        Ok(Self { client })
    }

    /// Returns a chat model handle for `model_id`.
    pub fn chat(&self, model_id: &str) -> OpenRouterModel {
        OpenRouterModel {
            client: self.client.clone(),
            model: model_id.to_string(),
        }
    }
}

/// A remote model reached through OpenRouter.
pub struct OpenRouterModel {
    client: openrouter::Client,
    model: String,
}

#[async_trait::async_trait]
impl LanguageModel for OpenRouterModel {
    fn model_id(&self) -> &str {
        &self.model
    }

    /// Runs the request as a stream so provider reasoning deltas are kept.
    async fn generate(&self, request: &GenerateRequest) -> Result<Generation, GatewayError> {
        let mut parts: Vec<StreamPart> = Vec::new();
        self.stream(request, &mut parts).await
    }

    async fn stream(
        &self,
        request: &GenerateRequest,
        sink: &mut dyn StreamSink,
    ) -> Result<Generation, GatewayError> {
        tracing::debug!(model = %self.model, "stream");
        let mut collected = Collector::default();

        let mut stream = with_agent!(self.client, &self.model, request.system.as_deref(), |agent| {
            agent.stream_prompt(request.prompt.as_str()).await
        });

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                    Text { text, .. },
                ))) => {
                    let part = StreamPart::Text(text);
                    collected.push(&part);
                    sink.on_part(part);
                }
                Ok(MultiTurnStreamItem::StreamAssistantItem(
                    StreamedAssistantContent::ReasoningDelta { reasoning, .. },
                )) => {
                    let part = StreamPart::Reasoning(reasoning);
                    collected.push(&part);
                    sink.on_part(part);
                }
                Ok(MultiTurnStreamItem::FinalResponse(_)) => {
                    // Stream complete
                }
                Err(err) => {
                    tracing::warn!(model = %self.model, error = %err, "stream failed");
                    return Err(GatewayError::Generation(err.to_string()));
                }
                _ => {
                    // Tool calls; OpenRouter sends reasoning as deltas only
                }
            }
        }

        Ok(collected.finish())
    }
}
