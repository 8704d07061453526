//! Terminal rendering for streamed generations.
//!
//! [`StdoutRenderer`] is a [`StreamSink`] that prints text deltas as they
//! arrive and reasoning deltas dimmed, so the two channels stay visually
//! apart.

use colored::Colorize;
use std::io::{self, Write};

use crate::model::{Generation, StreamPart, StreamSink};

/// Renders streaming LLM output directly to stdout.
///
/// Each part is printed immediately with an explicit flush so the user
/// sees a "typing" effect.
pub struct StdoutRenderer {
    part_count: usize,
    in_reasoning: bool,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self {
            part_count: 0,
            in_reasoning: false,
        }
    }

    /// Returns the total number of parts rendered.
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    /// Called when the full response is complete.
    pub fn render_done(&mut self, generation: &Generation) {
        println!(); // Final newline after stream ends
        println!();
        let reasoning_chars = generation
            .reasoning
            .as_deref()
            .map(|r| r.chars().count())
            .unwrap_or(0);
        println!(
            "{}",
            format!(
                "[{} parts, {} reasoning chars]",
                self.part_count, reasoning_chars
            )
            .dimmed()
        );
    }

    /// Called when an error occurs during streaming.
    pub fn render_error(&mut self, err: &str) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}

impl Default for StdoutRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSink for StdoutRenderer {
    fn on_part(&mut self, part: StreamPart) {
        match part {
            StreamPart::Reasoning(text) => {
                if !self.in_reasoning {
                    print!("{}", "thinking: ".dimmed().italic());
                    self.in_reasoning = true;
                }
                print!("{}", text.dimmed());
            }
            StreamPart::Text(text) => {
                if self.in_reasoning {
                    println!();
                    println!();
                    self.in_reasoning = false;
                }
                print!("{}", text);
            }
        }
        // Flush immediately so each part appears as it arrives
        io::stdout().flush().ok();
        self.part_count += 1;
    }
}
