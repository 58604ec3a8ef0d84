//! Incremental display of finished replies.
mod typewriter;

pub use typewriter::{DEFAULT_TICK, Typewriter};
