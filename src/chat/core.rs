use anyhow::{Result, bail};

use super::buffer::ConversationBuffer;
use super::models::{Transcript, Turn};
use crate::openai::{GenerationParams, completion};

/// Where a session is in its request/response cycle. There is no terminal
/// state; a failed turn returns to `Idle` and the session stays usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionState {
    Idle,
    AwaitingReply,
}

/// One chat session against the fine-tuned completion model.
///
/// Owns the prompt buffer and the visible transcript and runs exactly one
/// completion round trip per submission. Turns are serialized: a submission
/// made while a reply is outstanding is rejected rather than interleaved.
///
/// Use `Session::builder()` to construct a valid `Session`.
pub struct Session {
    api_hostname: String,
    api_key: String,
    model: String,
    params: GenerationParams,
    buffer: ConversationBuffer,
    transcript: Transcript,
    state: SessionState,
}

impl Session {
    pub fn builder(api_hostname: &str, api_key: &str, model: &str) -> SessionBuilder {
        SessionBuilder::new(api_hostname, api_key, model)
    }

    /// Run one turn: append the human input, send the whole buffer as the
    /// prompt, append the reply, and return the reply text for rendering.
    ///
    /// Any input is accepted, including the empty string. On failure
    /// (transport error, non-2xx, missing choices) the already-appended
    /// human turn stays in the buffer (the next prompt is still well formed,
    /// just missing a reply for that turn) and the error is returned.
    pub async fn submit(&mut self, user_input: &str) -> Result<String> {
        if self.state == SessionState::AwaitingReply {
            bail!("a reply is still in flight; submissions are serialized per session");
        }

        self.buffer.push_human(user_input);
        self.transcript.push(Turn::human(user_input));
        self.state = SessionState::AwaitingReply;

        tracing::debug!(prompt = self.buffer.snapshot(), "Requesting completion");

        let result = completion(
            self.buffer.snapshot(),
            &self.params,
            &self.api_hostname,
            &self.api_key,
            &self.model,
        )
        .await;
        self.state = SessionState::Idle;

        let reply = result?.first_text()?.to_string();

        self.buffer.push_agent(&reply);
        self.transcript.push(Turn::agent(&reply));

        Ok(reply)
    }

    /// The visible message list for this session.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The accumulated prompt, verbatim.
    pub fn prompt(&self) -> &str {
        self.buffer.snapshot()
    }
}

#[derive(Default)]
pub struct SessionBuilder {
    api_hostname: String,
    api_key: String,
    model: String,
    params: GenerationParams,
}

impl SessionBuilder {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            params: GenerationParams::default(),
        }
    }

    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn build(self) -> Session {
        Session {
            api_hostname: self.api_hostname,
            api_key: self.api_key,
            model: self.model,
            params: self.params,
            buffer: ConversationBuffer::new(),
            transcript: Transcript::new(),
            state: SessionState::Idle,
        }
    }
}
