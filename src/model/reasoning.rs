//! Reasoning-extraction middleware.
//!
//! Reasoning models such as DeepSeek-R1 inline their chain of thought as
//! `<think>...</think>` blocks. [`ExtractReasoning`] wraps any
//! [`LanguageModel`] and moves those blocks into the reasoning channel,
//! leaving the rest as the primary output. Streaming goes through
//! [`TagSplitter`], which copes with tags split across chunk boundaries.

use serde::{Deserialize, Serialize};

use super::{Collector, GenerateRequest, Generation, LanguageModel, StreamPart, StreamSink};
use crate::constants::{DEFAULT_REASONING_SEPARATOR, DEFAULT_REASONING_TAG};
use crate::error::GatewayError;

/// How reasoning blocks are recognised and joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningOptions {
    /// Tag name without angle brackets (`think` matches `<think>`).
    pub tag_name: String,
    /// Inserted between reasoning blocks and between the text pieces
    /// left on either side of a removed block.
    pub separator: String,
    /// Treat output as already inside a reasoning block, for models that
    /// omit the opening tag.
    pub starts_with_reasoning: bool,
}

impl Default for ReasoningOptions {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_REASONING_TAG.to_string(),
            separator: DEFAULT_REASONING_SEPARATOR.to_string(),
            starts_with_reasoning: false,
        }
    }
}

impl ReasoningOptions {
    pub fn open_tag(&self) -> String {
        format!("<{}>", self.tag_name)
    }

    pub fn close_tag(&self) -> String {
        format!("</{}>", self.tag_name)
    }
}

/// Splits a complete model output into text and reasoning.
///
/// Only closed blocks count; an unclosed opening tag stays in the text.
/// Without any block the input is returned unchanged with no reasoning.
pub fn extract_reasoning(raw: &str, options: &ReasoningOptions) -> Generation {
    let open = options.open_tag();
    let close = options.close_tag();

    let prefixed;
    let text = if options.starts_with_reasoning {
        prefixed = format!("{open}{raw}");
        prefixed.as_str()
    } else {
        raw
    };

    // (block start, block end, content start, content end)
    let mut blocks: Vec<(usize, usize, usize, usize)> = Vec::new();
    let mut pos = 0;
    while let Some(rel) = text[pos..].find(&open) {
        let content_start = pos + rel + open.len();
        let Some(close_rel) = text[content_start..].find(&close) else {
            break;
        };
        let content_end = content_start + close_rel;
        let end = content_end + close.len();
        blocks.push((pos + rel, end, content_start, content_end));
        pos = end;
    }

    if blocks.is_empty() {
        return Generation {
            text: raw.to_string(),
            reasoning: None,
        };
    }

    let reasoning = blocks
        .iter()
        .map(|&(_, _, cs, ce)| &text[cs..ce])
        .collect::<Vec<_>>()
        .join(options.separator.as_str());

    // Remove blocks back to front so earlier offsets stay valid.
    let mut remaining = text.to_string();
    for &(start, end, _, _) in blocks.iter().rev() {
        let before = &remaining[..start];
        let after = &remaining[end..];
        let joiner = if !before.is_empty() && !after.is_empty() {
            options.separator.as_str()
        } else {
            ""
        };
        remaining = format!("{before}{joiner}{after}");
    }

    Generation {
        text: remaining,
        reasoning: Some(reasoning),
    }
}

/// Incremental splitter for streamed output.
#[derive(Debug)]
pub struct TagSplitter {
    open: String,
    close: String,
    separator: String,
    in_reasoning: bool,
    buffer: String,
    after_switch: bool,
    text_started: bool,
    reasoning_started: bool,
}

impl TagSplitter {
    pub fn new(options: &ReasoningOptions) -> Self {
        Self {
            open: options.open_tag(),
            close: options.close_tag(),
            separator: options.separator.clone(),
            in_reasoning: options.starts_with_reasoning,
            buffer: String::new(),
            after_switch: false,
            text_started: false,
            reasoning_started: false,
        }
    }

    /// Feeds one chunk and returns the parts that can be decided so far.
    pub fn push(&mut self, chunk: &str) -> Vec<StreamPart> {
        let mut out = Vec::new();
        self.buffer.push_str(chunk);
        loop {
            let tag = if self.in_reasoning {
                &self.close
            } else {
                &self.open
            };
            let Some(start) = potential_start_index(&self.buffer, tag) else {
                let rest = std::mem::take(&mut self.buffer);
                self.publish(&rest, &mut out);
                break;
            };

            let full_match = start + tag.len() <= self.buffer.len();
            let tag_len = tag.len();
            let head: String = self.buffer.drain(..start).collect();
            self.publish(&head, &mut out);

            if full_match {
                self.buffer.drain(..tag_len);
                self.in_reasoning = !self.in_reasoning;
                self.after_switch = true;
            } else {
                // Possible partial tag; wait for more input.
                break;
            }
        }
        out
    }

    /// Flushes whatever is still buffered into the current channel.
    pub fn finish(&mut self) -> Vec<StreamPart> {
        let mut out = Vec::new();
        let rest = std::mem::take(&mut self.buffer);
        self.publish(&rest, &mut out);
        out
    }

    fn publish(&mut self, text: &str, out: &mut Vec<StreamPart>) {
        if text.is_empty() {
            return;
        }
        let started = if self.in_reasoning {
            self.reasoning_started
        } else {
            self.text_started
        };
        let prefix = if self.after_switch && started {
            self.separator.as_str()
        } else {
            ""
        };
        let delta = format!("{prefix}{text}");
        if self.in_reasoning {
            self.reasoning_started = true;
            out.push(StreamPart::Reasoning(delta));
        } else {
            self.text_started = true;
            out.push(StreamPart::Text(delta));
        }
        self.after_switch = false;
    }
}

/// Index where `search` starts in `text`, or where a suffix of `text` that
/// is a prefix of `search` starts.
fn potential_start_index(text: &str, search: &str) -> Option<usize> {
    if let Some(i) = text.find(search) {
        return Some(i);
    }
    text.char_indices()
        .map(|(i, _)| i)
        .find(|&i| search.starts_with(&text[i..]))
}

/// Wraps a model so `<tag>` blocks in its output become reasoning.
pub struct ExtractReasoning<M> {
    inner: M,
    options: ReasoningOptions,
}

impl<M: LanguageModel> ExtractReasoning<M> {
    pub fn new(inner: M, options: ReasoningOptions) -> Self {
        Self { inner, options }
    }

    pub fn options(&self) -> &ReasoningOptions {
        &self.options
    }
}

/// Sink adapter that runs text deltas through a [`TagSplitter`].
struct SplittingSink<'a> {
    splitter: TagSplitter,
    downstream: &'a mut dyn StreamSink,
    collected: Collector,
}

impl SplittingSink<'_> {
    fn forward(&mut self, parts: Vec<StreamPart>) {
        for part in parts {
            self.collected.push(&part);
            self.downstream.on_part(part);
        }
    }
}

impl StreamSink for SplittingSink<'_> {
    fn on_part(&mut self, part: StreamPart) {
        match part {
            StreamPart::Text(text) => {
                let parts = self.splitter.push(&text);
                self.forward(parts);
            }
            // Native reasoning from the provider passes straight through.
            reasoning @ StreamPart::Reasoning(_) => self.forward(vec![reasoning]),
        }
    }
}

#[async_trait::async_trait]
impl<M: LanguageModel> LanguageModel for ExtractReasoning<M> {
    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Generation, GatewayError> {
        let raw = self.inner.generate(request).await?;
        let mut generation = extract_reasoning(&raw.text, &self.options);
        if let Some(native) = raw.reasoning {
            generation.reasoning = Some(match generation.reasoning {
                Some(tagged) => format!("{native}{}{tagged}", self.options.separator),
                None => native,
            });
        }
        Ok(generation)
    }

    async fn stream(
        &self,
        request: &GenerateRequest,
        sink: &mut dyn StreamSink,
    ) -> Result<Generation, GatewayError> {
        let mut splitting = SplittingSink {
            splitter: TagSplitter::new(&self.options),
            downstream: sink,
            collected: Collector::default(),
        };
        self.inner.stream(request, &mut splitting).await?;
        let tail = splitting.splitter.finish();
        splitting.forward(tail);
        Ok(splitting.collected.finish())
    }
}
