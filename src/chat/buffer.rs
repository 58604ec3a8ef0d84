//! The accumulated prompt buffer for a chat session.
//!
//! The fine-tuned model was trained on prompt/completion pairs where every
//! prompt ends with the ` ->` separator and every completion starts with a
//! space and ends with a newline. The buffer reproduces that framing exactly
//! so the full conversation can be replayed as the next prompt.

/// Append-only text buffer holding the entire dialogue so far.
///
/// Mutated once per human submission and once per received reply; never
/// truncated or persisted. `snapshot` is the verbatim prompt payload for the
/// next completion request.
#[derive(Debug, Default)]
pub struct ConversationBuffer(String);

impl ConversationBuffer {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Append a human turn as `" {text} ->"`. The trailing separator tells
    /// the model where the prompt ends. Empty input is accepted as-is.
    pub fn push_human(&mut self, text: &str) {
        self.0.push(' ');
        self.0.push_str(text);
        self.0.push_str(" ->");
    }

    /// Append a model reply as `" {text} \n"`. The leading space matches the
    /// completion format the model was tuned on and the newline marks the end
    /// of the completed turn.
    pub fn push_agent(&mut self, text: &str) {
        self.0.push(' ');
        self.0.push_str(text);
        self.0.push_str(" \n");
    }

    /// The current buffer contents, verbatim.
    pub fn snapshot(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
