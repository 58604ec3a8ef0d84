//! The rendering-facing view of a chat session.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "agent")]
    Agent,
}

/// One human submission or one model reply, holding the raw text without any
/// of the buffer's turn markers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn human(text: &str) -> Self {
        Self {
            speaker: Speaker::Human,
            text: text.to_string(),
        }
    }

    pub fn agent(text: &str) -> Self {
        Self {
            speaker: Speaker::Agent,
            text: text.to_string(),
        }
    }
}

/// The ordered message list shown to the user. Kept separate from the prompt
/// buffer so rendering never has to re-parse the marker protocol.
#[derive(Default, Clone, Debug)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.0.clone()
    }

    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_keep_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::human("Hello"));
        transcript.push(Turn::agent("Hi there"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0], Turn::human("Hello"));
        assert_eq!(transcript.turns()[1], Turn::agent("Hi there"));
    }

    #[test]
    fn test_turn_serializes_with_speaker_tag() {
        let json = serde_json::to_string(&Turn::human("hey")).unwrap();
        assert_eq!(json, r#"{"speaker":"human","text":"hey"}"#);
    }
}
