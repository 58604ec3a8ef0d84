//! Conversation state and the per-turn request/response cycle.
mod buffer;
mod core;
mod models;

pub use buffer::ConversationBuffer;
pub use core::{Session, SessionBuilder};
pub use models::{Speaker, Transcript, Turn};
