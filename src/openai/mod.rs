//! Client for an OpenAI compatible legacy completions API.
mod core;

pub use core::{Choice, CompletionResponse, GenerationParams, completion};
